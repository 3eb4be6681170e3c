#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-error-context
//!
//! Message, segment, and data element error contexts for EDI validation results.
//!
//! A parser or validator reports every syntax violation it discovers into a
//! [`MessageErrorContext`]. The context resolves the segment occurrence the
//! violation belongs to and guarantees that each `(segment name, position)`
//! pair is represented by exactly one [`SegmentErrorContext`], however many
//! passes touched it.
//!
//! ## Example Usage
//!
//! ```rust
//! use edi_error_context::{
//!     DataElementError, DataElementErrorCode, ErrorContext, MessageErrorContext,
//!     SegmentErrorCode,
//! };
//!
//! let mut context = MessageErrorContext::new("850", "0001");
//! context.add_segment_error("REF", 3, "REF*ZZ*123~", SegmentErrorCode::RequiredSegmentMissing);
//! context.add_element_error(
//!     "REF",
//!     3,
//!     "REF*ZZ*123~",
//!     DataElementError::new("REF02", 2, DataElementErrorCode::InvalidCodeValue, "123"),
//! );
//!
//! assert!(context.has_errors());
//! assert_eq!(context.segment_count(), 1);
//! let segment = context.segment("REF", 3).unwrap();
//! assert_eq!(segment.codes(), &[SegmentErrorCode::RequiredSegmentMissing]);
//! assert_eq!(segment.element_errors().len(), 1);
//! ```

/// Technical acknowledgment policy consumed by acknowledgment generators.
pub mod ack;
/// Violation taxonomies for the message, segment, and data element tiers.
pub mod codes;
/// Report configuration loading.
pub mod config;
/// Shared behaviour of message and segment error contexts.
pub mod context;
/// Data element error records.
pub mod element;
/// Message-level error context and its merge operations.
pub mod message;
/// Text and JSON rendering of message error contexts.
pub mod reporter;
/// Segment-level error context and its identity key.
pub mod segment;
/// Serializable violation records replayed into a message context.
pub mod violation;

pub use ack::TechnicalAcknowledgment;
pub use codes::{DataElementErrorCode, MessageErrorCode, SegmentErrorCode, ViolationTier};
pub use config::{ReportConfig, ReportFormat};
pub use context::ErrorContext;
pub use element::DataElementError;
pub use message::MessageErrorContext;
pub use reporter::ErrorReporter;
pub use segment::{SegmentErrorContext, SegmentKey};
pub use violation::Violation;

use thiserror::Error;

/// Errors raised while parsing codes, loading configuration, or rendering reports.
///
/// Recording violations into a context never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown {tier} error code '{code}'")]
    UnknownCode { tier: ViolationTier, code: String },

    #[error("Unknown technical acknowledgment policy '{0}'")]
    UnknownAcknowledgment(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Report rendering failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an unknown-code error for the given tier.
    pub fn unknown_code(tier: ViolationTier, code: impl Into<String>) -> Self {
        Self::UnknownCode {
            tier,
            code: code.into(),
        }
    }
}

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Error>;
