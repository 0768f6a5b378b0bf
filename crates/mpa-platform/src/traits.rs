//! Platform abstraction traits for profile state and availability events.
//!
//! These traits enable platform-specific implementations while maintaining
//! testability through mocks.

use crate::error::Result;
use mpa_core::{EventKind, ProfileEvent, ProfileId};

/// Callback invoked for each delivered profile event.
pub type EventHandler = Box<dyn Fn(ProfileEvent) + Send + Sync>;

/// Live profile-state queries and the quiet-mode request sink.
///
/// Platform-specific implementations:
/// - Host platform: user-management service binding
/// - Testing: deterministic mock (`MockProfileStateSource`)
///
/// # Example
///
/// ```no_run
/// use mpa_core::ProfileId;
/// use mpa_platform::traits::ProfileStateSource;
///
/// fn example(source: &dyn ProfileStateSource) -> Result<(), mpa_platform::Error> {
///     let profile = ProfileId::new(10);
///     let usable = source.is_profile_unlocked(profile)?
///         && !source.is_quiet_mode_enabled(profile)?;
///     let _ = usable;
///     Ok(())
/// }
/// ```
pub trait ProfileStateSource: Send + Sync {
    /// Whether the profile's user is currently unlocked.
    ///
    /// Live query against the platform, not a cached snapshot.
    ///
    /// # Errors
    ///
    /// `Error::ProfileState` if the platform query fails.
    fn is_profile_unlocked(&self, profile: ProfileId) -> Result<bool>;

    /// Whether the profile is administratively paused (quiet mode).
    ///
    /// # Errors
    ///
    /// `Error::ProfileState` if the platform query fails.
    fn is_quiet_mode_enabled(&self, profile: ProfileId) -> Result<bool>;

    /// Asks the platform to enable or disable quiet mode for `profile`.
    ///
    /// May block while the platform services the request, so callers
    /// dispatch it off their control thread. Completion is observed through
    /// a later availability event, not through this return value.
    ///
    /// # Errors
    ///
    /// `Error::ProfileState` if the platform rejects the request outright.
    fn request_quiet_mode(&self, profile: ProfileId, enabled: bool) -> Result<()>;
}

/// Filtered subscription to profile-state events, all-profiles scope.
pub trait ProfileEventBus: Send + Sync {
    /// Attaches `handler` for the given event kinds.
    ///
    /// The handler stays attached until the returned subscription is
    /// dropped. Events are delivered on the bus's delivery thread; handlers
    /// serialize their own state access.
    ///
    /// # Errors
    ///
    /// `Error::Subscribe` if the platform rejects the subscription.
    fn subscribe(
        &self,
        kinds: &[EventKind],
        handler: EventHandler,
    ) -> Result<Box<dyn EventSubscription>>;
}

/// Handle owning one bus subscription.
///
/// Dropping the handle detaches the handler; there is no separate cancel
/// call.
pub trait EventSubscription: Send {}
