//! Severity-gated logger in front of a console sink.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::Value;

use crate::console::{self, AnsiConsole, Console, LogLine, StyledSegment};
use crate::{LoggerConfig, Severity, ThresholdError};

/// Marker glyph prefixed to every emitted line.
pub const MARKER: &str = "»";

/// Auxiliary structured fields attached to a log call.
pub type Fields = serde_json::Map<String, Value>;

/// Severity-gated console logger.
///
/// Holds a mutable threshold; calls on a channel below the threshold are
/// discarded, calls at or above it are formatted with a color-tagged
/// prefix and forwarded to the console channel matching the severity.
///
/// There is no global instance: callers own a `Logger` (cheaply shared via
/// [`Arc`]) and pass it to whatever needs it. The threshold is an atomic,
/// so a shared logger is safe to reconfigure from any thread.
pub struct Logger {
    console: Arc<dyn Console>,
    threshold: AtomicU8,
}

impl Logger {
    /// Logger in front of the given console, threshold [`Severity::Verbose`].
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self {
            console,
            threshold: AtomicU8::new(Severity::Verbose.ordinal()),
        }
    }

    /// Logger writing to the terminal with ANSI colors.
    pub fn ansi() -> Self {
        Self::new(Arc::new(AnsiConsole::new()))
    }

    /// Terminal logger configured from a [`LoggerConfig`].
    pub fn from_config(config: &LoggerConfig) -> Self {
        let console: Arc<dyn Console> = if config.color {
            Arc::new(AnsiConsole::new())
        } else {
            Arc::new(AnsiConsole::plain())
        };
        let logger = Self::new(console);
        logger.set_threshold(config.threshold);
        logger
    }

    /// Current threshold: the minimum severity that will be emitted.
    pub fn threshold(&self) -> Severity {
        // The stored ordinal only ever comes from a Severity.
        Severity::from_ordinal(self.threshold.load(Ordering::Relaxed))
            .unwrap_or(Severity::Verbose)
    }

    /// Replaces the threshold. Takes effect immediately.
    pub fn set_threshold(&self, severity: Severity) {
        self.threshold.store(severity.ordinal(), Ordering::Relaxed);
        tracing::debug!(threshold = %severity, "log threshold updated");
    }

    /// Replaces the threshold from an untyped JSON value.
    ///
    /// Fails with [`ThresholdError::InvalidType`] when the value is not a
    /// number and [`ThresholdError::InvalidValue`] when it is a number but
    /// not one of the ordinals `0..=3`. The old threshold stays in effect
    /// on failure.
    pub fn set_threshold_value(&self, value: &Value) -> Result<(), ThresholdError> {
        let number = match value {
            Value::Number(n) => n,
            other => {
                return Err(ThresholdError::InvalidType {
                    param: "threshold",
                    expected: "number",
                    value: other.to_string(),
                });
            }
        };

        let severity = number
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .and_then(Severity::from_ordinal)
            .ok_or_else(|| ThresholdError::InvalidValue {
                param: "threshold",
                valid: "an integer between 0 (verbose) and 3 (error)",
                value: number.to_string(),
            })?;

        self.set_threshold(severity);
        Ok(())
    }

    /// The channel for one severity.
    pub fn channel(&self, severity: Severity) -> Channel<'_> {
        Channel {
            logger: self,
            severity,
        }
    }

    /// The verbose channel (console `log`).
    pub fn log(&self) -> Channel<'_> {
        self.channel(Severity::Verbose)
    }

    /// The debug channel.
    pub fn debug(&self) -> Channel<'_> {
        self.channel(Severity::Debug)
    }

    /// The warning channel.
    pub fn warn(&self) -> Channel<'_> {
        self.channel(Severity::Warning)
    }

    /// The error channel.
    pub fn error(&self) -> Channel<'_> {
        self.channel(Severity::Error)
    }
}

/// One severity's capability set: emit plus console grouping.
///
/// Obtained from [`Logger::channel`] or the named accessors. Every
/// operation applies the same suppression rule: it forwards to the console
/// only when the logger threshold is at or below this channel's severity.
#[derive(Clone, Copy)]
pub struct Channel<'a> {
    logger: &'a Logger,
    severity: Severity,
}

impl Channel<'_> {
    /// The severity this channel emits at.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Whether this channel currently passes the threshold.
    pub fn enabled(&self) -> bool {
        self.logger.threshold() <= self.severity
    }

    /// Emits a message. An empty message emits only the styled prefix.
    pub fn emit(&self, message: &str) {
        self.emit_line(message, None);
    }

    /// Emits a message with auxiliary structured fields appended.
    pub fn emit_with(&self, message: &str, fields: &Fields) {
        self.emit_line(message, Some(fields));
    }

    /// Opens a collapsed console group headed by `message`.
    pub fn group_start(&self, message: &str) {
        if !self.enabled() {
            return;
        }
        self.logger.console.group_collapsed(&self.line(message, None));
    }

    /// Closes the innermost console group.
    pub fn group_end(&self) {
        if !self.enabled() {
            return;
        }
        self.logger.console.group_end();
    }

    fn emit_line(&self, message: &str, fields: Option<&Fields>) {
        if !self.enabled() {
            return;
        }
        console::forward(self.logger.console.as_ref(), &self.line(message, fields));
    }

    /// Builds the styled line: `» <severity>` prefix with the severity
    /// color, then the message, then compact-JSON fields in grey.
    fn line(&self, message: &str, fields: Option<&Fields>) -> LogLine {
        let mut segments = vec![StyledSegment::styled(
            format!("{MARKER} {}", self.severity.name()),
            self.severity.css(),
        )];
        if !message.is_empty() {
            segments.push(StyledSegment::plain(message));
        }
        if let Some(fields) = fields {
            if !fields.is_empty() {
                // Serializing a JSON map cannot realistically fail; degrade
                // to omitting the fields rather than erroring.
                if let Ok(json) = serde_json::to_string(fields) {
                    segments.push(StyledSegment::styled(json, Severity::Verbose.css()));
                }
            }
        }
        LogLine {
            severity: self.severity,
            segments,
        }
    }
}
