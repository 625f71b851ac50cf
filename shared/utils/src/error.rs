use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PrestacaoError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Value mismatch: expected {expected:.2}, found {actual:.2}")]
    ValueMismatch { expected: f64, actual: f64 },

    #[error("Import format error: {message}")]
    ImportFormat { message: String },

    #[error("Unrecognized document: {message}")]
    UnrecognizedDocument { message: String },

    #[error("Process data may be inconsistent: {message}")]
    InconsistentProcess { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },
}

impl PrestacaoError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn value_mismatch(expected: f64, actual: f64) -> Self {
        Self::ValueMismatch { expected, actual }
    }

    pub fn import_format(message: impl Into<String>) -> Self {
        Self::ImportFormat {
            message: message.into(),
        }
    }

    pub fn unrecognized_document(message: impl Into<String>) -> Self {
        Self::UnrecognizedDocument {
            message: message.into(),
        }
    }

    pub fn inconsistent_process(message: impl Into<String>) -> Self {
        Self::InconsistentProcess {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::ValueMismatch { .. } => "VALUE_MISMATCH",
            Self::ImportFormat { .. } => "IMPORT_FORMAT_ERROR",
            Self::UnrecognizedDocument { .. } => "UNRECOGNIZED_DOCUMENT",
            Self::InconsistentProcess { .. } => "INCONSISTENT_PROCESS",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Whether the caller can fix the input and retry without outside help.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InconsistentProcess { .. } | Self::Configuration { .. })
    }
}

pub type PrestacaoResult<T> = Result<T, PrestacaoError>;

/// Structured failure payload handed back to the host UI so it can render an
/// exact, actionable message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<PrestacaoError> for ErrorResponse {
    fn from(error: PrestacaoError) -> Self {
        let details = match &error {
            PrestacaoError::ValueMismatch { expected, actual } => Some(serde_json::json!({
                "expected": expected,
                "actual": actual,
                "delta": (expected - actual).abs(),
            })),
            _ => None,
        };
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_mismatch_carries_both_figures() {
        let error = PrestacaoError::value_mismatch(1000.0, 999.5);
        let response = ErrorResponse::from(error);

        assert_eq!(response.code, "VALUE_MISMATCH");
        let details = response.details.expect("details");
        assert_eq!(details["expected"], 1000.0);
        assert_eq!(details["actual"], 999.5);
        assert!((details["delta"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_inconsistent_process_is_not_recoverable() {
        assert!(!PrestacaoError::inconsistent_process("partial replacement").is_recoverable());
        assert!(PrestacaoError::import_format("no rows").is_recoverable());
    }
}
