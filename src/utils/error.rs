use crate::domain::model::ShareStep;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{step} returned HTTP {status}: {body}")]
    HttpStatusError {
        step: ShareStep,
        status: u16,
        body: String,
    },

    #[error("{step} rejected by service (HTTP {status}, {code}): {message}")]
    ServiceError {
        step: ShareStep,
        status: u16,
        code: String,
        message: String,
        body: String,
    },

    #[error("{step} returned an unexpected response: {body}")]
    UnexpectedResponseError { step: ShareStep, body: String },

    #[error("{step} returned the nil identifier")]
    NilIdentifierError { step: ShareStep },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ShareError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    Service,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ShareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShareError::ApiError(_) => ErrorCategory::Network,
            ShareError::HttpStatusError { status, .. } if *status == 401 || *status == 403 => {
                ErrorCategory::Authentication
            }
            ShareError::HttpStatusError { .. } => ErrorCategory::Service,
            ShareError::ServiceError { code, .. } if is_credential_fault(code) => {
                ErrorCategory::Authentication
            }
            ShareError::ServiceError { .. } => ErrorCategory::Service,
            ShareError::NilIdentifierError { .. } => ErrorCategory::Authentication,
            ShareError::UnexpectedResponseError { .. } | ShareError::SerializationError(_) => {
                ErrorCategory::Data
            }
            ShareError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ShareError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Network
            | ErrorCategory::Authentication
            | ErrorCategory::Service
            | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ShareError::ApiError(e) => format!("Could not reach the Share service: {}", e),
            ShareError::HttpStatusError { step, status, body } => {
                format!("Step '{}' failed with HTTP {}: {}", step, status, body)
            }
            ShareError::ServiceError {
                step,
                code,
                message,
                body,
                ..
            } => format!(
                "Step '{}' was rejected: {} ({})\nResponse: {}",
                step, message, code, body
            ),
            ShareError::NilIdentifierError { step } => {
                format!("Step '{}' was rejected: the service returned no identifier", step)
            }
            ShareError::UnexpectedResponseError { step, body } => {
                format!("Step '{}' returned something unexpected: {}", step, body)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the --server-url value",
            ErrorCategory::Authentication => {
                "Check the username and password, and that Share is enabled for the account"
            }
            ErrorCategory::Service => "The service reported a failure; try again later",
            ErrorCategory::Data => {
                "The service response changed shape; run with --verbose for details"
            }
            ErrorCategory::Configuration => "Fix the command-line arguments and run again",
            ErrorCategory::System => "Check that stdout is writable",
        }
    }
}

fn is_credential_fault(code: &str) -> bool {
    matches!(
        code,
        "AccountPasswordInvalid"
            | "SSO_AuthenticateAccountNotFound"
            | "SSO_AuthenticatePasswordInvalid"
            | "SSO_AuthenticateMaxAttemptsExceeed"
            | "SessionIdNotFound"
            | "SessionNotValid"
    )
}
