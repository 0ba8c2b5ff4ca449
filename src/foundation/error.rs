/// Convenience result type used across fluidwarp.
pub type WarpResult<T> = Result<T, WarpError>;

/// Top-level error taxonomy used by processing APIs.
///
/// Invalid render geometry is not an error (it is a silent no-op), and neither is cooperative
/// cancellation. Only structural misconfiguration surfaces here.
#[derive(thiserror::Error, Debug)]
pub enum WarpError {
    /// Invalid buffers, mismatched formats or out-of-range controls.
    #[error("validation error: {0}")]
    Validation(String),

    /// A format or backend mode the processor cannot handle.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Wrapped lower-level error, typically raised by an accelerator implementation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WarpError {
    /// Build a [`WarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WarpError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Return `true` for [`WarpError::Unsupported`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
