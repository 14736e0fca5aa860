use consentgate_core::CoreError;
use consentgate_store::StoreError;
use thiserror::Error;

/// Every way an API call or workflow step can fail.
///
/// For `Unauthorized` and `Http` the display text is exactly the message
/// extracted from the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS, timeout).
    #[error(
        "Network error calling {path}: {source}. Check the API base URL ({base_url}) and the backend's CORS policy."
    )]
    Transport {
        path: String,
        base_url: String,
        source: reqwest::Error,
    },

    /// 401 or 403
    #[error("{message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-2xx response
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body does not have the declared shape
    #[error("Unexpected response from {path}: {reason}")]
    UnexpectedResponse { path: String, reason: String },

    /// Rejected before any request was made
    #[error("{0}")]
    Validation(#[from] CoreError),

    /// The workflow already has a request in flight; nothing was sent
    #[error("Another request is already in progress")]
    Busy,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(CoreError::validation(message))
    }

    /// HTTP status of an application-level failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Derived from the status code only (401/403)
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
