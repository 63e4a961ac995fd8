//! Errors raised before any remote call is made

use thiserror::Error;

/// Rejected caller input or client settings
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A client setting such as an API URL cannot be used
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A handle or tenant passed to an operation cannot be used
    #[error("Invalid {parameter}: {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

impl ValidationError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let config = ValidationError::invalid_configuration("github.api_url is not a valid URL");
        assert_eq!(
            config.to_string(),
            "Invalid configuration: github.api_url is not a valid URL"
        );

        let param = ValidationError::invalid_parameter("tenant", "must not be empty");
        assert_eq!(param.to_string(), "Invalid tenant: must not be empty");
    }
}
