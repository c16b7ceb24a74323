/// Crate-wide result alias.
pub type XferResult<T> = Result<T, XferError>;

/// Errors raised at the API boundary.
///
/// The blend math itself is total; these only come from argument checks and configuration loading.
#[derive(thiserror::Error, Debug)]
pub enum XferError {
    /// Caller-provided buffers or names are malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Dispatch options could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl XferError {
    /// Build a [`XferError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`XferError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
