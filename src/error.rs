use thiserror::Error;

/// Errors raised by the vital evaluation core and configuration validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VitalsError {
    #[error("no reading supplied for vital '{vital}'")]
    MissingReading { vital: String },

    #[error("invalid spec for vital '{vital}': {reason}")]
    InvalidSpec { vital: String, reason: String },

    #[error("vital '{vital}' is configured more than once")]
    DuplicateVital { vital: String },

    #[error("no vitals configured")]
    EmptyConfiguration,
}

impl VitalsError {
    pub(crate) fn invalid_spec(vital: &str, reason: impl Into<String>) -> Self {
        VitalsError::InvalidSpec {
            vital: vital.to_string(),
            reason: reason.into(),
        }
    }
}
