//! Message error contexts
//!
//! A [`MessageErrorContext`] collects every violation found in one message
//! instance. Segment occurrences are keyed by [`SegmentKey`]; all reports for
//! the same key converge into a single [`SegmentErrorContext`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::codes::{MessageErrorCode, SegmentErrorCode};
use crate::context::ErrorContext;
use crate::element::DataElementError;
use crate::segment::{SegmentErrorContext, SegmentKey};
use crate::violation::Violation;

/// Accumulated violations for one message instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageErrorContext {
    name: String,
    #[serde(default)]
    control_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default)]
    codes: Vec<MessageErrorCode>,
    #[serde(default, with = "segment_list")]
    segments: HashMap<SegmentKey, SegmentErrorContext>,
}

impl MessageErrorContext {
    /// Create an empty context for a message
    #[must_use]
    pub fn new(name: impl Into<String>, control_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            control_number: control_number.into(),
            ..Self::default()
        }
    }

    /// Create a context carrying a description of a failure that could not
    /// be attributed to a segment
    #[must_use]
    pub fn with_message(
        name: impl Into<String>,
        control_number: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut context = Self::new(name, control_number);
        context.message = Some(message.into());
        context
    }

    /// Same as [`with_message`](Self::with_message), also recording a message-level code
    #[must_use]
    pub fn with_message_code(
        name: impl Into<String>,
        control_number: impl Into<String>,
        message: impl Into<String>,
        code: MessageErrorCode,
    ) -> Self {
        let mut context = Self::with_message(name, control_number, message);
        context.codes.push(code);
        context
    }

    #[must_use]
    pub fn control_number(&self) -> &str {
        &self.control_number
    }

    /// Message-level codes in the order they were reported
    #[must_use]
    pub fn codes(&self) -> &[MessageErrorCode] {
        &self.codes
    }

    /// Segment contexts, in no particular order
    pub fn segments(&self) -> impl Iterator<Item = &SegmentErrorContext> {
        self.segments.values()
    }

    /// Segment contexts ordered by position, then by name
    #[must_use]
    pub fn sorted_segments(&self) -> Vec<&SegmentErrorContext> {
        let mut segments: Vec<_> = self.segments.values().collect();
        segments.sort_by(|a, b| {
            a.position()
                .cmp(&b.position())
                .then_with(|| a.name().cmp(b.name()))
        });
        segments
    }

    /// Look up the context for one segment occurrence
    #[must_use]
    pub fn segment(&self, name: &str, position: usize) -> Option<&SegmentErrorContext> {
        self.segments.get(&SegmentKey::new(name, position))
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Record a message-level violation. Repeated codes are kept.
    pub fn add_message_error(&mut self, code: MessageErrorCode) {
        trace!(
            message = %self.name,
            control_number = %self.control_number,
            code = code.code(),
            "Recorded message error"
        );
        self.codes.push(code);
    }

    /// Record a segment-level violation against `(segment_name, segment_position)`.
    ///
    /// The raw `value` is only used when the segment is seen for the first time.
    pub fn add_segment_error(
        &mut self,
        segment_name: impl Into<String>,
        segment_position: usize,
        value: impl Into<String>,
        code: SegmentErrorCode,
    ) {
        match self
            .segments
            .entry(SegmentKey::new(segment_name, segment_position))
        {
            Entry::Occupied(mut entry) => entry.get_mut().add_code(code),
            Entry::Vacant(entry) => {
                let key = entry.key();
                trace!(segment = %key, code = code.code(), "Recorded segment error");
                let context =
                    SegmentErrorContext::with_code(key.name.clone(), key.position, value, code);
                entry.insert(context);
            }
        }
    }

    /// Record a data element violation within `(segment_name, segment_position)`.
    ///
    /// A segment seen for the first time is created without segment-level codes.
    pub fn add_element_error(
        &mut self,
        segment_name: impl Into<String>,
        segment_position: usize,
        segment_value: impl Into<String>,
        error: DataElementError,
    ) {
        let key = SegmentKey::new(segment_name, segment_position);
        segment_entry(&mut self.segments, key, segment_value).push_element_error(error);
    }

    /// Record a violation described by a [`Violation`] record
    pub fn record(&mut self, violation: Violation) {
        match violation {
            Violation::Message { code } => self.add_message_error(code),
            Violation::Segment {
                segment,
                position,
                value,
                code,
            } => self.add_segment_error(segment, position, value, code),
            Violation::Element {
                segment,
                segment_position,
                segment_value,
                error,
            } => self.add_element_error(segment, segment_position, segment_value, error),
        }
    }

    /// Merge a segment context produced elsewhere.
    ///
    /// An unseen key is inserted whole, codes included. For a key that is
    /// already present only the incoming element errors are appended; its
    /// segment-level codes are dropped.
    pub fn merge(&mut self, segment: SegmentErrorContext) {
        merge_segment(&mut self.segments, segment);
    }

    /// Merge each segment context in order
    pub fn merge_all(&mut self, segments: impl IntoIterator<Item = SegmentErrorContext>) {
        for segment in segments {
            self.merge(segment);
        }
    }

    /// Fold another context for the same message into this one.
    ///
    /// Message-level codes are appended in order, then segments go through
    /// [`merge_all`](Self::merge_all). Identity is kept from `self`; the
    /// description is adopted from `other` only if `self` has none.
    pub fn merge_context(&mut self, other: MessageErrorContext) {
        debug!(
            message = %self.name,
            control_number = %self.control_number,
            incoming_codes = other.codes.len(),
            incoming_segments = other.segments.len(),
            "Merging message error context"
        );
        if self.message.is_none() {
            self.message = other.message;
        }
        self.codes.extend(other.codes);
        self.merge_all(other.segments.into_values());
    }
}

impl ErrorContext for MessageErrorContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn has_errors(&self) -> bool {
        !self.codes.is_empty() || !self.segments.is_empty()
    }
}

fn segment_entry(
    segments: &mut HashMap<SegmentKey, SegmentErrorContext>,
    key: SegmentKey,
    value: impl Into<String>,
) -> &mut SegmentErrorContext {
    match segments.entry(key) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            let key = entry.key();
            let context = SegmentErrorContext::new(key.name.clone(), key.position, value);
            entry.insert(context)
        }
    }
}

fn merge_segment(
    segments: &mut HashMap<SegmentKey, SegmentErrorContext>,
    incoming: SegmentErrorContext,
) {
    match segments.entry(incoming.key()) {
        Entry::Occupied(mut entry) => {
            debug!(
                segment = %entry.key(),
                dropped_codes = incoming.codes().len(),
                element_errors = incoming.element_errors().len(),
                "Segment already present, re-applying element errors"
            );
            let existing = entry.get_mut();
            for error in incoming.into_element_errors() {
                existing.push_element_error(error);
            }
        }
        Entry::Vacant(entry) => {
            entry.insert(incoming);
        }
    }
}

/// Serializes the segment map as a list ordered by position and name.
/// Deserialization folds the list back through the merge path.
mod segment_list {
    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::merge_segment;
    use crate::segment::{SegmentErrorContext, SegmentKey};

    pub(super) fn serialize<S>(
        segments: &HashMap<SegmentKey, SegmentErrorContext>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entries: Vec<_> = segments.iter().collect();
        entries.sort_by(|(a, _), (b, _)| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.name.cmp(&b.name))
        });
        let list: Vec<_> = entries.into_iter().map(|(_, segment)| segment).collect();
        list.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<HashMap<SegmentKey, SegmentErrorContext>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<SegmentErrorContext>::deserialize(deserializer)?;
        let mut segments = HashMap::with_capacity(list.len());
        for segment in list {
            merge_segment(&mut segments, segment);
        }
        Ok(segments)
    }
}
