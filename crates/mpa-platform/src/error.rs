//! Platform integration errors.

use thiserror::Error;

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Platform errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Platform feature not available.
    #[error("Platform feature not available: {0}")]
    Unavailable(String),

    /// Profile-state query or request failed.
    #[error("Profile state error: {0}")]
    ProfileState(String),

    /// Event subscription failed.
    #[error("Subscription error: {0}")]
    Subscribe(String),
}
