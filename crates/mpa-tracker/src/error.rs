//! Tracker errors.

use mpa_core::ProfileId;
use thiserror::Error;

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Availability-tracker errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Operation addressed a profile outside the managed set.
    #[error("Profile {0} is not managed by this tracker")]
    UnmanagedProfile(ProfileId),

    /// Platform boundary failure.
    #[error("Platform error: {0}")]
    Platform(#[from] mpa_platform::Error),

    /// Background dispatch failure.
    #[error("Background task error: {0}")]
    Background(String),

    /// Invalid tracker configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}
