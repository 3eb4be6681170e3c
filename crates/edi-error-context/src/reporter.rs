//! Error report rendering

use std::fmt::Write as _;

use crate::config::{ReportConfig, ReportFormat};
use crate::context::ErrorContext;
use crate::element::DataElementError;
use crate::message::MessageErrorContext;
use crate::{Error, Result};

/// Renders message error contexts for display or hand-off
#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    format: ReportFormat,
}

impl ErrorReporter {
    /// Create a reporter producing text output
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reporter for the given format
    #[must_use]
    pub fn with_format(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Create a reporter from report configuration
    #[must_use]
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::with_format(config.format)
    }

    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Render a context in the configured format
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if JSON serialization fails.
    pub fn render(&self, context: &MessageErrorContext) -> Result<String> {
        match self.format {
            ReportFormat::Text => Ok(render_text(context)),
            ReportFormat::Json => {
                serde_json::to_string_pretty(context).map_err(|e| Error::Render(e.to_string()))
            }
        }
    }
}

fn render_text(context: &MessageErrorContext) -> String {
    let mut out = String::new();
    let control_number = if context.control_number().is_empty() {
        "<none>"
    } else {
        context.control_number()
    };

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Message {} (control number {control_number}): {}",
        context.name(),
        if context.has_errors() {
            "rejected"
        } else {
            "accepted"
        }
    );
    if let Some(message) = context.message() {
        let _ = writeln!(out, "  note: {message}");
    }
    for code in context.codes() {
        let _ = writeln!(out, "  message error {code}");
    }

    for segment in context.sorted_segments() {
        let _ = write!(
            out,
            "  segment {} at position {}",
            segment.name(),
            segment.position()
        );
        if segment.value().is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, ": {}", segment.value());
        }
        for code in segment.codes() {
            let _ = writeln!(out, "    segment error {code}");
        }
        for error in segment.element_errors() {
            let _ = writeln!(out, "    {}", describe_element(error));
        }
    }

    out
}

fn describe_element(error: &DataElementError) -> String {
    let mut line = format!("element {} at position {}", error.name, error.position);
    if let Some(component) = error.component_position {
        let _ = write!(line, ", component {component}");
    }
    if let Some(repetition) = error.repetition_position {
        let _ = write!(line, ", repetition {repetition}");
    }
    let _ = write!(line, ": {}", error.code);
    if !error.value.is_empty() {
        let _ = write!(line, " value '{}'", error.value);
    }
    line
}
