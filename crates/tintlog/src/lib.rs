//! Severity-gated console logging with styled output.
//!
//! A [`Logger`] sits in front of a [`Console`] sink and filters diagnostic
//! messages by severity: calls below the current threshold are discarded,
//! the rest are formatted with a color-tagged prefix and forwarded to the
//! console channel matching their severity (`log`, `debug`, `warn`,
//! `error`). Each channel also exposes the console's collapsed-group
//! operations for visually nesting related lines.

mod config;
mod console;
mod error;
mod logger;
mod severity;

pub use config::LoggerConfig;
pub use console::{AnsiConsole, Console, LogLine, MemoryConsole, Record, StyledSegment};
pub use error::ThresholdError;
pub use logger::{Channel, Fields, Logger, MARKER};
pub use severity::{Severity, severity_levels};
