//! Error types for the Galaxy2D engine
//!
//! Per-sprite problems (missing sprite, missing texture, bad camera input) are
//! never reported through these types: they are logged and skipped where they
//! occur. `Error` covers the failures the caller has to react to: backend
//! failures, resource creation, and misuse of the batch lifecycle.

use std::fmt;

/// Result type for Galaxy2D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy2D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (GPU API, lock poisoning, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer handle, texture, shader, etc.)
    InvalidResource(String),

    /// Initialization failed (batch, camera system, renderer)
    InitializationFailed(String),

    /// An operation was called in the wrong lifecycle state
    /// (e.g. `submit` outside `begin`/`end`, nested `begin`)
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error and build an `Error::BackendError` from the same message
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy2d::SpriteBatch", "Backend lock poisoned");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy2d::Error::BackendError(message)
    }};
}

/// Log an error and return early with `Error::BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
