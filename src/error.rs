use core::fmt;

/// Errors raised by the simulation core.
///
/// The core performs no I/O, so the only failures are bad construction
/// parameters and broken internal invariants.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A configuration value is unusable (non-positive size, speed, interval...)
    InvalidConfiguration { field: String, reason: String },
    /// An operation was attempted on an entity in an incompatible state
    InvariantViolation(String),
}

impl SimError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration: {field}: {reason}")
            }
            Self::InvariantViolation(message) => write!(f, "invariant violation: {message}"),
        }
    }
}

impl std::error::Error for SimError {}
