//! Profile identity.

use core::fmt;

/// Opaque identifier for a user profile.
///
/// Assigned by the host platform; this stack only compares, hashes, and
/// passes it back across the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileId(u32);

impl ProfileId {
    /// Wraps a raw platform identifier.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw platform identifier.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
