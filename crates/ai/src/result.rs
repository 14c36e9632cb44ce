use thiserror::Error;

pub type AiResult<T> = Result<T, AiError>;

/// Failure reported by a ranking or embedding provider.
///
/// Providers only hand over data they computed elsewhere; nothing here
/// runs a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AiError {
    #[error("invalid ranking input: {0}")]
    InvalidInput(String),
}

impl AiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
