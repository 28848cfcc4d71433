use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Credential error: {message}")]
    CredentialError { message: String },

    #[error("Mail server rejected credentials: {message}")]
    AuthenticationError { message: String },

    #[error("Delivery to {recipient} failed: {message}")]
    DeliveryError { recipient: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Credentials,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DealError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn delivery(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeliveryError {
            recipient: recipient.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigParseError { .. } => ErrorCategory::Configuration,
            Self::CredentialError { .. } | Self::AuthenticationError { .. } => {
                ErrorCategory::Credentials
            }
            Self::DeliveryError { .. } => ErrorCategory::Transport,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Credentials => ErrorSeverity::Critical,
        }
    }

    /// True when the failure would repeat for every remaining recipient.
    pub fn aborts_run(&self) -> bool {
        !matches!(self, Self::DeliveryError { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidConfiguration { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::ConfigParseError { message } => {
                format!("Could not read the configuration file: {}", message)
            }
            Self::CredentialError { message } => format!("Could not obtain the password: {}", message),
            Self::AuthenticationError { .. } => {
                "The mail server rejected the sender credentials".to_string()
            }
            Self::DeliveryError { recipient, .. } => format!("Could not send hand to {}", recipient),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => {
                "Configure 3 or 4 distinct player addresses in the [game] section"
            }
            Self::InvalidConfigValueError { .. } => {
                "Fix the named setting in the configuration file and run again"
            }
            Self::ConfigParseError { .. } => "Check the file exists and is valid TOML",
            Self::CredentialError { .. } => {
                "Enter the password when prompted or set the configured password variable"
            }
            Self::AuthenticationError { .. } => {
                "Check the sender address and password; accounts with 2FA need an app password"
            }
            Self::DeliveryError { .. } => {
                "Check the server address, port and TLS mode; re-running deals a new game"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DealError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_delivery_errors_allow_continuing() {
        assert!(!DealError::delivery("a@x.com", "timeout").aborts_run());
        assert!(DealError::AuthenticationError {
            message: "535".to_string()
        }
        .aborts_run());
        assert!(DealError::invalid_configuration("2 players").aborts_run());
    }

    #[test]
    fn test_severity_follows_category() {
        let err = DealError::InvalidConfigValueError {
            field: "smtp.server".to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = DealError::delivery("a@x.com", "connection reset");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("a@x.com"));
    }
}
