//! Violation taxonomies
//!
//! The three tiers are defined independently of each other. Code values
//! follow the X12 implementation acknowledgment code lists (IK5 for
//! messages, IK3 for segments, IK4 for data elements).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Nesting level a violation code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationTier {
    /// Whole message (transaction set)
    Message,
    /// Segment occurrence
    Segment,
    /// Data element, component, or repetition
    Element,
}

impl fmt::Display for ViolationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Segment => write!(f, "segment"),
            Self::Element => write!(f, "data element"),
        }
    }
}

/// Message-level syntax errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageErrorCode {
    TransactionSetNotSupported,
    TransactionSetTrailerMissing,
    ControlNumberMismatch,
    IncludedSegmentCountMismatch,
    OneOrMoreSegmentsInError,
    InvalidTransactionSetIdentifier,
    InvalidControlNumber,
    DuplicateControlNumber,
}

impl MessageErrorCode {
    /// All message-level codes in code-list order.
    pub const ALL: [Self; 8] = [
        Self::TransactionSetNotSupported,
        Self::TransactionSetTrailerMissing,
        Self::ControlNumberMismatch,
        Self::IncludedSegmentCountMismatch,
        Self::OneOrMoreSegmentsInError,
        Self::InvalidTransactionSetIdentifier,
        Self::InvalidControlNumber,
        Self::DuplicateControlNumber,
    ];

    /// Code value as it appears in an acknowledgment.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::TransactionSetNotSupported => "1",
            Self::TransactionSetTrailerMissing => "2",
            Self::ControlNumberMismatch => "3",
            Self::IncludedSegmentCountMismatch => "4",
            Self::OneOrMoreSegmentsInError => "5",
            Self::InvalidTransactionSetIdentifier => "6",
            Self::InvalidControlNumber => "7",
            Self::DuplicateControlNumber => "23",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::TransactionSetNotSupported => "Transaction set not supported",
            Self::TransactionSetTrailerMissing => "Transaction set trailer missing",
            Self::ControlNumberMismatch => {
                "Transaction set control number in header and trailer do not match"
            }
            Self::IncludedSegmentCountMismatch => "Number of included segments does not match",
            Self::OneOrMoreSegmentsInError => "One or more segments in error",
            Self::InvalidTransactionSetIdentifier => {
                "Missing or invalid transaction set identifier"
            }
            Self::InvalidControlNumber => "Missing or invalid transaction set control number",
            Self::DuplicateControlNumber => "Duplicate transaction set control number",
        }
    }
}

impl fmt::Display for MessageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

impl FromStr for MessageErrorCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s.trim())
            .ok_or_else(|| Error::unknown_code(ViolationTier::Message, s))
    }
}

/// Segment-level syntax errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentErrorCode {
    UnrecognizedSegmentId,
    UnexpectedSegment,
    RequiredSegmentMissing,
    LoopOccursOverMaximumTimes,
    SegmentExceedsMaximumUse,
    SegmentNotInDefinedTransactionSet,
    SegmentNotInProperSequence,
    SegmentHasDataElementErrors,
}

impl SegmentErrorCode {
    /// All segment-level codes in code-list order.
    pub const ALL: [Self; 8] = [
        Self::UnrecognizedSegmentId,
        Self::UnexpectedSegment,
        Self::RequiredSegmentMissing,
        Self::LoopOccursOverMaximumTimes,
        Self::SegmentExceedsMaximumUse,
        Self::SegmentNotInDefinedTransactionSet,
        Self::SegmentNotInProperSequence,
        Self::SegmentHasDataElementErrors,
    ];

    /// Code value as it appears in an acknowledgment.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::UnrecognizedSegmentId => "1",
            Self::UnexpectedSegment => "2",
            Self::RequiredSegmentMissing => "3",
            Self::LoopOccursOverMaximumTimes => "4",
            Self::SegmentExceedsMaximumUse => "5",
            Self::SegmentNotInDefinedTransactionSet => "6",
            Self::SegmentNotInProperSequence => "7",
            Self::SegmentHasDataElementErrors => "8",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::UnrecognizedSegmentId => "Unrecognized segment ID",
            Self::UnexpectedSegment => "Unexpected segment",
            Self::RequiredSegmentMissing => "Required segment missing",
            Self::LoopOccursOverMaximumTimes => "Loop occurs over maximum times",
            Self::SegmentExceedsMaximumUse => "Segment exceeds maximum use",
            Self::SegmentNotInDefinedTransactionSet => "Segment not in defined transaction set",
            Self::SegmentNotInProperSequence => "Segment not in proper sequence",
            Self::SegmentHasDataElementErrors => "Segment has data element errors",
        }
    }
}

impl fmt::Display for SegmentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

impl FromStr for SegmentErrorCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s.trim())
            .ok_or_else(|| Error::unknown_code(ViolationTier::Segment, s))
    }
}

/// Data element syntax errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataElementErrorCode {
    RequiredDataElementMissing,
    ConditionalRequiredDataElementMissing,
    TooManyDataElements,
    DataElementTooShort,
    DataElementTooLong,
    InvalidCharacter,
    InvalidCodeValue,
    InvalidDate,
    InvalidTime,
    ExclusionConditionViolated,
    TooManyRepetitions,
    TooManyComponents,
}

impl DataElementErrorCode {
    /// All data element codes in code-list order.
    pub const ALL: [Self; 12] = [
        Self::RequiredDataElementMissing,
        Self::ConditionalRequiredDataElementMissing,
        Self::TooManyDataElements,
        Self::DataElementTooShort,
        Self::DataElementTooLong,
        Self::InvalidCharacter,
        Self::InvalidCodeValue,
        Self::InvalidDate,
        Self::InvalidTime,
        Self::ExclusionConditionViolated,
        Self::TooManyRepetitions,
        Self::TooManyComponents,
    ];

    /// Code value as it appears in an acknowledgment.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::RequiredDataElementMissing => "1",
            Self::ConditionalRequiredDataElementMissing => "2",
            Self::TooManyDataElements => "3",
            Self::DataElementTooShort => "4",
            Self::DataElementTooLong => "5",
            Self::InvalidCharacter => "6",
            Self::InvalidCodeValue => "7",
            Self::InvalidDate => "8",
            Self::InvalidTime => "9",
            Self::ExclusionConditionViolated => "10",
            Self::TooManyRepetitions => "12",
            Self::TooManyComponents => "13",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::RequiredDataElementMissing => "Required data element missing",
            Self::ConditionalRequiredDataElementMissing => {
                "Conditional required data element missing"
            }
            Self::TooManyDataElements => "Too many data elements",
            Self::DataElementTooShort => "Data element too short",
            Self::DataElementTooLong => "Data element too long",
            Self::InvalidCharacter => "Invalid character in data element",
            Self::InvalidCodeValue => "Invalid code value",
            Self::InvalidDate => "Invalid date",
            Self::InvalidTime => "Invalid time",
            Self::ExclusionConditionViolated => "Exclusion condition violated",
            Self::TooManyRepetitions => "Too many repetitions",
            Self::TooManyComponents => "Too many components",
        }
    }
}

impl fmt::Display for DataElementErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

impl FromStr for DataElementErrorCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s.trim())
            .ok_or_else(|| Error::unknown_code(ViolationTier::Element, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values_are_unique_per_tier() {
        let mut message: Vec<_> = MessageErrorCode::ALL.iter().map(|c| c.code()).collect();
        message.sort_unstable();
        message.dedup();
        assert_eq!(message.len(), MessageErrorCode::ALL.len());

        let mut element: Vec<_> = DataElementErrorCode::ALL.iter().map(|c| c.code()).collect();
        element.sort_unstable();
        element.dedup();
        assert_eq!(element.len(), DataElementErrorCode::ALL.len());
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(
            "23".parse::<MessageErrorCode>().unwrap(),
            MessageErrorCode::DuplicateControlNumber
        );
        assert_eq!(
            " 3 ".parse::<SegmentErrorCode>().unwrap(),
            SegmentErrorCode::RequiredSegmentMissing
        );
        assert_eq!(
            "12".parse::<DataElementErrorCode>().unwrap(),
            DataElementErrorCode::TooManyRepetitions
        );
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "11".parse::<DataElementErrorCode>().unwrap_err();
        match err {
            Error::UnknownCode { tier, code } => {
                assert_eq!(tier, ViolationTier::Element);
                assert_eq!(code, "11");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_includes_code_and_description() {
        assert_eq!(
            SegmentErrorCode::UnexpectedSegment.to_string(),
            "2 (Unexpected segment)"
        );
        assert_eq!(
            DataElementErrorCode::InvalidDate.to_string(),
            "8 (Invalid date)"
        );
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(ViolationTier::Message.to_string(), "message");
        assert_eq!(ViolationTier::Element.to_string(), "data element");
    }
}
