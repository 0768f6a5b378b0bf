//! Availability events delivered by the host platform.

use crate::profile::ProfileId;

/// The kinds of profile-state event the platform can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A profile's user finished unlocking.
    UserUnlocked,
    /// A managed profile left quiet mode.
    ProfileAvailable,
    /// A managed profile entered quiet mode.
    ProfileUnavailable,
}

impl EventKind {
    /// Every event kind, for filtered subscription.
    pub const ALL: &'static [EventKind] = &[
        EventKind::UserUnlocked,
        EventKind::ProfileAvailable,
        EventKind::ProfileUnavailable,
    ];
}

/// A profile-state event tagged with its target profile.
///
/// The kind records what the platform *posted*; by the time the event is
/// handled the profile may be in a different state, so consumers re-query
/// rather than trusting the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileEvent {
    /// What happened.
    pub kind: EventKind,
    /// The profile it happened to.
    pub profile: ProfileId,
}

impl ProfileEvent {
    /// Builds an event.
    pub const fn new(kind: EventKind, profile: ProfileId) -> Self {
        Self { kind, profile }
    }
}
