use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Client-side validation failure. The message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    #[error("Unknown {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
