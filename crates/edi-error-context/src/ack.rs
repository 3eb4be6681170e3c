//! Technical acknowledgment policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Whether an interchange-level technical acknowledgment is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalAcknowledgment {
    /// Always generate, regardless of what the interchange requests
    Enforce,
    /// Generate only when the interchange header requests it
    #[default]
    Default,
    /// Never generate
    Suppress,
}

impl TechnicalAcknowledgment {
    /// Decide whether to generate given the interchange's own request flag
    #[must_use]
    pub fn resolve(self, requested: bool) -> bool {
        match self {
            Self::Enforce => true,
            Self::Default => requested,
            Self::Suppress => false,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enforce => "enforce",
            Self::Default => "default",
            Self::Suppress => "suppress",
        }
    }
}

impl fmt::Display for TechnicalAcknowledgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechnicalAcknowledgment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" => Ok(Self::Enforce),
            "default" => Ok(Self::Default),
            "suppress" => Ok(Self::Suppress),
            _ => Err(Error::UnknownAcknowledgment(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert!(TechnicalAcknowledgment::Enforce.resolve(false));
        assert!(TechnicalAcknowledgment::Enforce.resolve(true));
        assert!(!TechnicalAcknowledgment::Suppress.resolve(true));
        assert!(TechnicalAcknowledgment::Default.resolve(true));
        assert!(!TechnicalAcknowledgment::Default.resolve(false));
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(
            TechnicalAcknowledgment::default(),
            TechnicalAcknowledgment::Default
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Enforce".parse::<TechnicalAcknowledgment>().unwrap(),
            TechnicalAcknowledgment::Enforce
        );
        assert_eq!(
            "SUPPRESS".parse::<TechnicalAcknowledgment>().unwrap(),
            TechnicalAcknowledgment::Suppress
        );
        assert!("always".parse::<TechnicalAcknowledgment>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TechnicalAcknowledgment::Suppress).unwrap();
        assert_eq!(json, "\"suppress\"");
    }
}
