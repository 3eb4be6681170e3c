//! Data element error records

use serde::{Deserialize, Serialize};

use crate::codes::DataElementErrorCode;

/// A single data element violation observed within a segment.
///
/// Records are plain values. Two records with the same positions are not
/// merged; every reported violation produces its own record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataElementError {
    /// Element identifier (e.g. `REF02`)
    pub name: String,

    /// Position of the element within its segment (1-indexed)
    pub position: usize,

    /// Position within a composite element (1-indexed), `None` if not composite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_position: Option<usize>,

    /// Position among repeated occurrences (1-indexed), `None` if not repeated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition_position: Option<usize>,

    /// Violation code
    pub code: DataElementErrorCode,

    /// Offending raw value (may be empty)
    #[serde(default)]
    pub value: String,
}

impl DataElementError {
    /// Create a record for a simple, non-repeated element
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        position: usize,
        code: DataElementErrorCode,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            component_position: None,
            repetition_position: None,
            code,
            value: value.into(),
        }
    }

    /// Set the component position. `0` means the element is not composite.
    #[must_use]
    pub fn with_component_position(mut self, component_position: usize) -> Self {
        self.component_position = ordinal(component_position);
        self
    }

    /// Set the repetition position. `0` means the element is not repeated.
    #[must_use]
    pub fn with_repetition_position(mut self, repetition_position: usize) -> Self {
        self.repetition_position = ordinal(repetition_position);
        self
    }

    /// Whether the violation was reported against a component of a composite
    #[must_use]
    pub fn is_component(&self) -> bool {
        self.component_position.is_some()
    }

    /// Whether the violation was reported against a repetition
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        self.repetition_position.is_some()
    }
}

fn ordinal(position: usize) -> Option<usize> {
    (position > 0).then_some(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_element_record() {
        let err = DataElementError::new("REF02", 2, DataElementErrorCode::InvalidCodeValue, "123");

        assert_eq!(err.name, "REF02");
        assert_eq!(err.position, 2);
        assert_eq!(err.code, DataElementErrorCode::InvalidCodeValue);
        assert_eq!(err.value, "123");
        assert!(!err.is_component());
        assert!(!err.is_repetition());
    }

    #[test]
    fn test_zero_positions_mean_absent() {
        let err = DataElementError::new("N101", 1, DataElementErrorCode::DataElementTooLong, "")
            .with_component_position(0)
            .with_repetition_position(0);

        assert_eq!(err.component_position, None);
        assert_eq!(err.repetition_position, None);
    }

    #[test]
    fn test_component_and_repetition_positions() {
        let err = DataElementError::new("C040", 4, DataElementErrorCode::InvalidCharacter, "A~B")
            .with_component_position(2)
            .with_repetition_position(3);

        assert_eq!(err.component_position, Some(2));
        assert_eq!(err.repetition_position, Some(3));
        assert!(err.is_component());
        assert!(err.is_repetition());
    }

    #[test]
    fn test_serialization_omits_absent_positions() {
        let err = DataElementError::new("DTM02", 2, DataElementErrorCode::InvalidDate, "20261340");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["name"], "DTM02");
        assert_eq!(json["code"], "invalid_date");
        assert!(json.get("component_position").is_none());
        assert!(json.get("repetition_position").is_none());
    }
}
