use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Database request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Database returned {status} for {path}")]
    ApiStatusError { status: u16, path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", .errors.join("; "))]
    ValidationError { errors: Vec<String> },

    #[error("For authorized users only!")]
    Unauthorized,

    #[error("Nanny not found: {id}")]
    NannyNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    Auth,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ApiStatusError { .. } => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } | Self::NannyNotFound { .. } => ErrorCategory::Input,
            Self::Unauthorized => ErrorCategory::Auth,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ApiError(_) | Self::ApiStatusError { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. } | Self::NannyNotFound { .. } | Self::Unauthorized => {
                ErrorSeverity::High
            }
            Self::CsvError(_) | Self::SerializationError(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the database URL and your network connection, then retry"
            }
            ErrorCategory::Data => "The stored data looks malformed; inspect the snapshot",
            ErrorCategory::Configuration => "Review the command line flags and the TOML config",
            ErrorCategory::Input => "Fix the highlighted fields and submit again",
            ErrorCategory::Auth => "Pass --uid (and --id-token if the database needs one)",
            ErrorCategory::System => "Check that the output directory is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::ApiStatusError { .. } => {
                "Could not reach the nanny database.".to_string()
            }
            Self::Unauthorized => self.to_string(),
            Self::ValidationError { errors } => {
                format!("Please correct the form: {}", errors.join(", "))
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = DirectoryError::ValidationError {
            errors: vec!["email is invalid".into(), "phone is required".into()],
        };
        assert_eq!(
            err.to_string(),
            "Validation failed: email is invalid; phone is required"
        );
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_unauthorized_message() {
        let err = DirectoryError::Unauthorized;
        assert_eq!(err.user_friendly_message(), "For authorized users only!");
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
