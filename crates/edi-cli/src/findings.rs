//! Findings documents
//!
//! A findings document lists the violations reported by one or more
//! validation passes over a single message.

use std::path::Path;

use anyhow::Context;
use edi_error_context::{MessageErrorContext, Violation};
use serde::Deserialize;
use tracing::{debug, info};

/// Violations collected for one message, grouped by validation pass
#[derive(Debug, Clone, Deserialize)]
pub struct Findings {
    /// Message type (e.g. `850`)
    pub name: String,

    #[serde(default)]
    pub control_number: String,

    /// Description of a failure not tied to a segment
    #[serde(default)]
    pub message: Option<String>,

    /// Whether the interchange header asked for a technical acknowledgment
    #[serde(default)]
    pub ack_requested: bool,

    /// Violations per pass, in pass order
    #[serde(default)]
    pub passes: Vec<Vec<Violation>>,
}

impl Findings {
    /// Read a findings document; `.yaml`/`.yml` is parsed as YAML, anything else as JSON
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read findings from {}", path.display()))?;

        let findings = if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML findings in {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON findings in {}", path.display()))?
        };
        Ok(findings)
    }

    /// Replay each pass into its own context and reduce them in order
    pub fn reduce(self) -> MessageErrorContext {
        let mut report = match self.message {
            Some(message) => {
                MessageErrorContext::with_message(&self.name, &self.control_number, message)
            }
            None => MessageErrorContext::new(&self.name, &self.control_number),
        };

        for (index, pass) in self.passes.into_iter().enumerate() {
            debug!(pass = index + 1, violations = pass.len(), "Replaying validation pass");
            let mut context = MessageErrorContext::new(&self.name, &self.control_number);
            for violation in pass {
                context.record(violation);
            }
            report.merge_context(context);
        }

        info!(
            message = %self.name,
            control_number = %self.control_number,
            segments = report.segment_count(),
            "Reduced validation passes"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edi_error_context::{ErrorContext, SegmentErrorCode};

    const FINDINGS: &str = r"
name: '850'
control_number: '0001'
ack_requested: true
passes:
  - - level: segment
      segment: REF
      position: 3
      value: REF*ZZ*123~
      code: required_segment_missing
  - - level: segment
      segment: REF
      position: 3
      code: unexpected_segment
    - level: element
      segment: REF
      segment_position: 3
      name: REF02
      position: 2
      code: invalid_code_value
      value: '123'
";

    #[test]
    fn test_parse_yaml_findings() {
        let findings: Findings = serde_yaml::from_str(FINDINGS).unwrap();

        assert_eq!(findings.name, "850");
        assert_eq!(findings.control_number, "0001");
        assert!(findings.ack_requested);
        assert!(findings.message.is_none());
        assert_eq!(findings.passes.len(), 2);
        assert_eq!(findings.passes[1].len(), 2);
    }

    #[test]
    fn test_reduce_merges_passes_per_segment() {
        let findings: Findings = serde_yaml::from_str(FINDINGS).unwrap();
        let report = findings.reduce();

        assert_eq!(report.name(), "850");
        assert_eq!(report.segment_count(), 1);
        let segment = report.segment("REF", 3).unwrap();
        // Second pass collides on REF@3, so only its element errors survive.
        assert_eq!(segment.codes(), &[SegmentErrorCode::RequiredSegmentMissing]);
        assert_eq!(segment.element_errors().len(), 1);
        assert_eq!(segment.value(), "REF*ZZ*123~");
    }

    #[test]
    fn test_reduce_without_passes() {
        let findings: Findings =
            serde_json::from_str(r#"{"name": "810", "message": "unparsed"}"#).unwrap();
        let report = findings.reduce();

        assert_eq!(report.message(), Some("unparsed"));
        assert!(!report.has_errors());
    }
}
