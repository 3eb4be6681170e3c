//! Violation records
//!
//! One [`Violation`] corresponds to one `add_*` call on a
//! [`MessageErrorContext`](crate::MessageErrorContext). Parsers that cannot
//! hold a mutable context while scanning can emit these and replay them with
//! [`MessageErrorContext::record`](crate::MessageErrorContext::record).

use serde::{Deserialize, Serialize};

use crate::codes::{DataElementErrorCode, MessageErrorCode, SegmentErrorCode, ViolationTier};
use crate::element::DataElementError;

/// A single pre-classified violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Violation {
    /// Violation of the message as a whole
    Message { code: MessageErrorCode },

    /// Violation of a segment occurrence
    Segment {
        segment: String,
        position: usize,
        #[serde(default)]
        value: String,
        code: SegmentErrorCode,
    },

    /// Violation of a data element within a segment occurrence
    Element {
        segment: String,
        segment_position: usize,
        #[serde(default)]
        segment_value: String,
        #[serde(flatten)]
        error: DataElementError,
    },
}

impl Violation {
    #[must_use]
    pub fn message(code: MessageErrorCode) -> Self {
        Self::Message { code }
    }

    #[must_use]
    pub fn segment(
        segment: impl Into<String>,
        position: usize,
        value: impl Into<String>,
        code: SegmentErrorCode,
    ) -> Self {
        Self::Segment {
            segment: segment.into(),
            position,
            value: value.into(),
            code,
        }
    }

    #[must_use]
    pub fn element(
        segment: impl Into<String>,
        segment_position: usize,
        segment_value: impl Into<String>,
        error: DataElementError,
    ) -> Self {
        Self::Element {
            segment: segment.into(),
            segment_position,
            segment_value: segment_value.into(),
            error,
        }
    }

    /// Nesting level of the violation
    #[must_use]
    pub fn tier(&self) -> ViolationTier {
        match self {
            Self::Message { .. } => ViolationTier::Message,
            Self::Segment { .. } => ViolationTier::Segment,
            Self::Element { .. } => ViolationTier::Element,
        }
    }

    /// Element-level code, if this is an element violation
    #[must_use]
    pub fn element_code(&self) -> Option<DataElementErrorCode> {
        match self {
            Self::Element { error, .. } => Some(error.code),
            _ => None,
        }
    }
}
