//! Segment error contexts

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::codes::{DataElementErrorCode, SegmentErrorCode};
use crate::context::ErrorContext;
use crate::element::DataElementError;

/// Identity of one segment occurrence within a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentKey {
    /// Segment tag
    pub name: String,
    /// Position of the segment within the message (1-indexed)
    pub position: usize,
}

impl SegmentKey {
    /// Create a new key
    #[must_use]
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.position)
    }
}

/// All violations recorded against one segment occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentErrorContext {
    name: String,
    position: usize,
    #[serde(default)]
    value: String,
    #[serde(default)]
    codes: Vec<SegmentErrorCode>,
    #[serde(default)]
    element_errors: Vec<DataElementError>,
}

impl SegmentErrorContext {
    /// Create a context with no violations yet
    #[must_use]
    pub fn new(name: impl Into<String>, position: usize, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            value: value.into(),
            codes: Vec::new(),
            element_errors: Vec::new(),
        }
    }

    /// Create a context holding one segment-level code
    #[must_use]
    pub fn with_code(
        name: impl Into<String>,
        position: usize,
        value: impl Into<String>,
        code: SegmentErrorCode,
    ) -> Self {
        let mut context = Self::new(name, position, value);
        context.codes.push(code);
        context
    }

    /// Append a data element violation
    pub fn add_element_error(
        &mut self,
        name: impl Into<String>,
        position: usize,
        code: DataElementErrorCode,
        component_position: Option<usize>,
        repetition_position: Option<usize>,
        value: impl Into<String>,
    ) {
        self.push_element_error(DataElementError {
            name: name.into(),
            position,
            component_position,
            repetition_position,
            code,
            value: value.into(),
        });
    }

    /// Append an already built data element record
    pub fn push_element_error(&mut self, error: DataElementError) {
        trace!(
            segment = %self.name,
            position = self.position,
            element = %error.name,
            code = error.code.code(),
            "Recorded data element error"
        );
        self.element_errors.push(error);
    }

    /// Append a segment-level code
    pub fn add_code(&mut self, code: SegmentErrorCode) {
        trace!(
            segment = %self.name,
            position = self.position,
            code = code.code(),
            "Recorded segment error"
        );
        self.codes.push(code);
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Raw segment text, empty when unknown
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn codes(&self) -> &[SegmentErrorCode] {
        &self.codes
    }

    /// Data element violations in the order they were reported
    #[must_use]
    pub fn element_errors(&self) -> &[DataElementError] {
        &self.element_errors
    }

    /// Identity of this segment occurrence
    #[must_use]
    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.name.clone(), self.position)
    }

    pub(crate) fn into_element_errors(self) -> Vec<DataElementError> {
        self.element_errors
    }
}

impl ErrorContext for SegmentErrorContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_errors(&self) -> bool {
        !self.codes.is_empty() || !self.element_errors.is_empty()
    }
}
