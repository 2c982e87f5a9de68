//! Logger configuration.

use serde::{Deserialize, Serialize};

use crate::Severity;

/// Declarative logger settings, typically embedded in an app's JSON config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity emitted.
    pub threshold: Severity,

    /// Render ANSI colors on the terminal console.
    pub color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::Verbose,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.threshold, Severity::Verbose);
        assert!(config.color);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: LoggerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.threshold, Severity::Verbose);
        assert!(config.color);

        let config: LoggerConfig =
            serde_json::from_str(r#"{"threshold": "warning"}"#).unwrap();
        assert_eq!(config.threshold, Severity::Warning);
        assert!(config.color);
    }

    #[test]
    fn roundtrip() {
        let config = LoggerConfig {
            threshold: Severity::Error,
            color: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"threshold\":\"error\""));
        let parsed: LoggerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.threshold, Severity::Error);
        assert!(!parsed.color);
    }
}
