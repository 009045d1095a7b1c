use thiserror::Error;

#[derive(Error, Debug)]
pub enum RfiError {
    #[error("Unknown {kind}: {id}")]
    NotFound { kind: String, id: String },

    #[error("Validation error on '{field}' (value: {value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RfiError {
    pub fn not_found(kind: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            id: id.into(),
        }
    }

    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::PatternError(_) => ErrorCategory::Internal,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Medium,
            Self::NotFound { .. } | Self::CsvError(_) | Self::IoError(_) => ErrorSeverity::High,
            Self::SerializationError(_) => ErrorSeverity::High,
            Self::ConfigError { .. } | Self::PatternError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::NotFound { kind, .. } if kind == "location" => {
                "Use one of the supported locations: El Paso, Las Cruces, Juarez".to_string()
            }
            Self::NotFound { kind, .. } => format!("Check the {} identifier for typos", kind),
            Self::ValidationError { field, .. } => {
                format!("Correct the value supplied for '{}' and try again", field)
            }
            Self::ConfigError { .. } => {
                "Check the configuration and reference data files".to_string()
            }
            Self::PatternError(_) => "Report this as a bug: a built-in pattern failed to compile".to_string(),
            Self::CsvError(_) | Self::IoError(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            Self::SerializationError(_) => {
                "Make sure the saved response file is valid JSON produced by this tool".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { kind, id } => format!("'{}' is not a known {}", id, kind),
            Self::ValidationError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RfiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_location_is_high_severity_input_error() {
        let err = RfiError::not_found("location", "Tucson");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.to_string(), "Unknown location: Tucson");
        assert!(err.recovery_suggestion().contains("Las Cruces"));
    }

    #[test]
    fn test_validation_error_message() {
        let err = RfiError::validation("employees", -5, "must be at least 1");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "Invalid employees: must be at least 1");
    }

    #[test]
    fn test_pattern_error_is_internal() {
        let err = RfiError::from(regex::Regex::new("(unclosed").unwrap_err());
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("bug"));
    }
}
