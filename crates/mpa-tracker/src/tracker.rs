//! Monitor for runtime conditions that change managed-profile availability.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mpa_core::{EventKind, ProfileEvent, ProfileId};
use mpa_platform::{EventHandler, EventSubscription, ProfileEventBus, ProfileStateSource};

use crate::builder::TrackerBuilder;
use crate::error::{Error, Result};
use crate::exec::{Dispatcher, TaskHandle};

/// Callback invoked with the affected profile when availability changes.
pub type StateChangedCallback = Arc<dyn Fn(ProfileId) + Send + Sync>;

/// Sets that must only change under the state lock.
#[derive(Debug, Default)]
struct TrackerState {
    /// Profiles with an enable request issued but not yet confirmed.
    pending_enable: HashSet<ProfileId>,
    /// Profiles last observed as available.
    enabled: HashSet<ProfileId>,
}

/// Tracks, per managed profile, whether the profile is usable and whether an
/// enable request is in flight.
///
/// Usable means unlocked and not in quiet mode. The enabled snapshot is
/// updated only from availability events, so it reflects the last observed
/// state and may lag the platform; the unlock and quiet-mode queries always
/// go to the platform live.
///
/// Construction goes through [`AvailabilityTracker::builder`]; all
/// collaborators are injected explicitly.
pub struct AvailabilityTracker {
    source: Arc<dyn ProfileStateSource>,
    bus: Arc<dyn ProfileEventBus>,
    dispatcher: Arc<dyn Dispatcher>,
    managed: Arc<Vec<ProfileId>>,
    on_state_changed: StateChangedCallback,
    state: Arc<Mutex<TrackerState>>,
    /// `Some` while registered with the event bus.
    subscription: Option<Box<dyn EventSubscription>>,
}

impl AvailabilityTracker {
    /// Starts building a tracker.
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::default()
    }

    pub(crate) fn from_parts(
        source: Arc<dyn ProfileStateSource>,
        bus: Arc<dyn ProfileEventBus>,
        dispatcher: Arc<dyn Dispatcher>,
        managed: Vec<ProfileId>,
        on_state_changed: StateChangedCallback,
    ) -> Result<Self> {
        // Seed the enabled snapshot from a synchronous query so the first
        // availability event can be diffed against something real.
        let mut enabled = HashSet::new();
        for &profile in &managed {
            if query_available(source.as_ref(), profile)? {
                enabled.insert(profile);
            }
        }

        Ok(Self {
            source,
            bus,
            dispatcher,
            managed: Arc::new(managed),
            on_state_changed,
            state: Arc::new(Mutex::new(TrackerState {
                pending_enable: HashSet::new(),
                enabled,
            })),
            subscription: None,
        })
    }

    /// The profiles this tracker manages, in construction order.
    pub fn managed_profiles(&self) -> &[ProfileId] {
        &self.managed
    }

    /// Live quiet-mode query, delegated to the platform.
    ///
    /// # Errors
    ///
    /// Propagates the platform query failure.
    pub fn is_quiet_mode_enabled(&self, profile: ProfileId) -> Result<bool> {
        Ok(self.source.is_quiet_mode_enabled(profile)?)
    }

    /// Live unlock query, delegated to the platform.
    ///
    /// # Errors
    ///
    /// Propagates the platform query failure.
    pub fn is_profile_unlocked(&self, profile: ProfileId) -> Result<bool> {
        Ok(self.source.is_profile_unlocked(profile)?)
    }

    /// Whether an enable request for `profile` is still awaiting
    /// confirmation. O(1); profiles outside the managed set are never
    /// waiting.
    pub fn is_waiting_to_enable(&self, profile: ProfileId) -> bool {
        lock_state(&self.state).pending_enable.contains(&profile)
    }

    /// Whether `profile` was available the last time an event or the
    /// construction-time query observed it. May lag the platform.
    pub fn last_seen_enabled(&self, profile: ProfileId) -> bool {
        lock_state(&self.state).enabled.contains(&profile)
    }

    /// Stops treating `profile` as pending.
    ///
    /// For callers that confirmed the profile is enabled through some other
    /// channel before the availability event arrived.
    pub fn acknowledge_enabled(&self, profile: ProfileId) {
        lock_state(&self.state).pending_enable.remove(&profile);
    }

    /// Asks the platform to enable or disable quiet mode for `profile`.
    ///
    /// The profile is marked pending-enable synchronously, before the
    /// request is dispatched, so a concurrent [`is_waiting_to_enable`]
    /// query observes it without delay. The platform call itself runs on
    /// the background dispatcher; completion is observed through a later
    /// availability event. The returned handle can be joined in tests and
    /// discarded everywhere else.
    ///
    /// [`is_waiting_to_enable`]: Self::is_waiting_to_enable
    ///
    /// # Errors
    ///
    /// `Error::UnmanagedProfile` when `profile` is not in the managed set.
    pub fn request_quiet_mode(&self, profile: ProfileId, enabled: bool) -> Result<TaskHandle> {
        if !self.managed.contains(&profile) {
            return Err(Error::UnmanagedProfile(profile));
        }

        lock_state(&self.state).pending_enable.insert(profile);

        let source = Arc::clone(&self.source);
        let handle = self
            .dispatcher
            .dispatch(Box::new(move || source.request_quiet_mode(profile, enabled)));
        Ok(handle)
    }

    /// [`request_quiet_mode`](Self::request_quiet_mode) for every managed
    /// profile, returning one handle per profile in managed order.
    pub fn request_quiet_mode_all(&self, enabled: bool) -> Result<Vec<TaskHandle>> {
        self.managed
            .iter()
            .map(|&profile| self.request_quiet_mode(profile, enabled))
            .collect()
    }

    /// Registers for availability events, if not already registered.
    ///
    /// Idempotent: a second call while registered is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates the bus subscription failure.
    pub fn register(&mut self) -> Result<()> {
        if self.subscription.is_some() {
            return Ok(());
        }
        let handler = make_event_handler(
            Arc::clone(&self.source),
            Arc::clone(&self.managed),
            Arc::clone(&self.state),
            Arc::clone(&self.on_state_changed),
        );
        self.subscription = Some(self.bus.subscribe(EventKind::ALL, handler)?);
        Ok(())
    }

    /// Drops the event subscription, if any. Idempotent.
    pub fn unregister(&mut self) {
        self.subscription = None;
    }

    /// Whether the tracker currently holds a live event subscription.
    pub fn is_registered(&self) -> bool {
        self.subscription.is_some()
    }
}

/// Usable now: unlocked and not in quiet mode.
fn query_available(
    source: &dyn ProfileStateSource,
    profile: ProfileId,
) -> mpa_platform::Result<bool> {
    Ok(source.is_profile_unlocked(profile)? && !source.is_quiet_mode_enabled(profile)?)
}

fn lock_state(state: &Mutex<TrackerState>) -> MutexGuard<'_, TrackerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builds the handler attached to the event bus.
///
/// One handler serves all three event kinds: the decision comes from the
/// observed profile state, not the event label, because the platform may
/// have flipped the profile again between posting and delivery.
fn make_event_handler(
    source: Arc<dyn ProfileStateSource>,
    managed: Arc<Vec<ProfileId>>,
    state: Arc<Mutex<TrackerState>>,
    on_state_changed: StateChangedCallback,
) -> EventHandler {
    Box::new(move |event: ProfileEvent| {
        let profile = event.profile;
        if !managed.contains(&profile) {
            return;
        }

        let available = match query_available(source.as_ref(), profile) {
            Ok(available) => available,
            Err(err) => {
                tracing::warn!(
                    %profile,
                    kind = ?event.kind,
                    error = %err,
                    "dropping event: profile state query failed"
                );
                return;
            }
        };

        let notify = {
            let mut state = lock_state(&state);
            if available {
                if state.enabled.contains(&profile) {
                    // Duplicate notification; the callback already fired.
                    false
                } else {
                    state.enabled.insert(profile);
                    state.pending_enable.remove(&profile);
                    true
                }
            } else {
                // The enable request may still be outstanding, so the
                // pending mark survives an unavailable observation.
                state.enabled.remove(&profile);
                true
            }
        };

        if notify {
            tracing::debug!(%profile, available, "profile availability changed");
            // Invoked after the state lock is released so the callback can
            // query the tracker.
            on_state_changed(profile);
        }
    })
}
