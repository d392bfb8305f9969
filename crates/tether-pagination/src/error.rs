use thiserror::Error;

pub type Result<T, E = PaginationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("invalid pagination configuration: {0}")]
    InvalidConfiguration(String),

    /// The source answered with something that cannot be settled.
    /// Nothing from it was applied.
    #[error("source returned a malformed page (page {page}, size {size}, {items} item(s)): {reason}")]
    MalformedResult {
        page: usize,
        size: usize,
        items: usize,
        reason: &'static str,
    },

    /// The caller's source failed. The error is passed through unchanged.
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

impl PaginationError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
