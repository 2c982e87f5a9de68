use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal severity of a console message. Higher means more severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Verbose = 0,
    Debug = 1,
    Warning = 2,
    Error = 3,
}

impl Severity {
    /// All severities, least to most severe.
    pub const ALL: [Severity; 4] = [
        Severity::Verbose,
        Severity::Debug,
        Severity::Warning,
        Severity::Error,
    ];

    /// Numeric ordinal (verbose=0 .. error=3).
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Maps an ordinal back to its severity. Returns `None` outside `0..=3`.
    pub const fn from_ordinal(value: u8) -> Option<Severity> {
        match value {
            0 => Some(Severity::Verbose),
            1 => Some(Severity::Debug),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Error),
            _ => None,
        }
    }

    /// Lowercase name, as used in the level mapping and serde form.
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Verbose => "verbose",
            Severity::Debug => "debug",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// CSS color annotation applied to this severity's line prefix.
    pub const fn css(self) -> &'static str {
        match self {
            Severity::Verbose => "color: grey",
            Severity::Debug => "color: green",
            Severity::Warning => "color: yellow",
            Severity::Error => "color: red",
        }
    }

    /// ANSI escape for the same color, for terminal rendering.
    pub const fn ansi(self) -> &'static str {
        match self {
            Severity::Verbose => "\x1b[90m",
            Severity::Debug => "\x1b[32m",
            Severity::Warning => "\x1b[33m",
            Severity::Error => "\x1b[31m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed read-only name → ordinal mapping:
/// `{verbose: 0, debug: 1, warning: 2, error: 3}`.
pub fn severity_levels() -> BTreeMap<&'static str, u8> {
    Severity::ALL.iter().map(|s| (s.name(), s.ordinal())).collect()
}
