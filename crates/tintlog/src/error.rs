//! Error types for threshold validation.

/// Errors produced when assigning the logger threshold from untyped input.
///
/// Logging entry points never fail; both variants originate from
/// [`Logger::set_threshold_value`](crate::Logger::set_threshold_value),
/// and the previous threshold stays in effect when they are returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    /// The supplied value is not a numeric ordinal.
    #[error("invalid type for `{param}`: expected {expected}, got {value}")]
    InvalidType {
        param: &'static str,
        expected: &'static str,
        value: String,
    },

    /// The supplied value is numeric but not one of the valid ordinals.
    #[error("invalid value for `{param}`: expected {valid}, got {value}")]
    InvalidValue {
        param: &'static str,
        valid: &'static str,
        value: String,
    },
}

impl ThresholdError {
    /// Stable error-kind identifier.
    pub const fn kind(&self) -> &'static str {
        match self {
            ThresholdError::InvalidType { .. } => "invalid-type",
            ThresholdError::InvalidValue { .. } => "invalid-value",
        }
    }
}
