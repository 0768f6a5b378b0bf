//! Mock implementations for testing.
//!
//! Explicit, constructor-injected test doubles: build a mock, hand it to
//! the component under test, then drive it from the test body. There is no
//! process-wide override state.

use crate::error::{Error, Result};
use crate::traits::{EventHandler, EventSubscription, ProfileEventBus, ProfileStateSource};
use mpa_core::{EventKind, ProfileEvent, ProfileId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Per-profile mock state.
#[derive(Debug, Clone, Copy, Default)]
struct ProfileFlags {
    unlocked: bool,
    quiet: bool,
}

/// Mock profile-state source for testing.
///
/// Profiles must be registered before they can be queried; querying an
/// unregistered profile fails the way a platform query for a nonexistent
/// user would.
///
/// # Example
///
/// ```
/// use mpa_core::ProfileId;
/// use mpa_platform::mock::MockProfileStateSource;
/// use mpa_platform::traits::ProfileStateSource;
///
/// let work = ProfileId::new(10);
/// let source = MockProfileStateSource::new().with_profile(work, true, false);
///
/// assert!(source.is_profile_unlocked(work).unwrap());
/// assert!(!source.is_quiet_mode_enabled(work).unwrap());
/// ```
#[derive(Clone, Default)]
pub struct MockProfileStateSource {
    flags: Arc<RwLock<HashMap<ProfileId, ProfileFlags>>>,
    requests: Arc<Mutex<Vec<(ProfileId, bool)>>>,
    auto_apply: Arc<AtomicBool>,
    fail_queries: Arc<AtomicBool>,
}

impl MockProfileStateSource {
    /// Creates an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `profile` with the given unlock and quiet-mode flags.
    pub fn with_profile(self, profile: ProfileId, unlocked: bool, quiet: bool) -> Self {
        self.set_flags(profile, unlocked, quiet);
        self
    }

    /// Sets the unlock flag for `profile`, registering it if needed.
    pub fn set_unlocked(&self, profile: ProfileId, unlocked: bool) {
        if let Ok(mut flags) = self.flags.write() {
            flags.entry(profile).or_default().unlocked = unlocked;
        }
    }

    /// Sets the quiet-mode flag for `profile`, registering it if needed.
    pub fn set_quiet_mode(&self, profile: ProfileId, quiet: bool) {
        if let Ok(mut flags) = self.flags.write() {
            flags.entry(profile).or_default().quiet = quiet;
        }
    }

    /// Recorded `request_quiet_mode` calls, in arrival order.
    pub fn quiet_mode_requests(&self) -> Vec<(ProfileId, bool)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// When set, a quiet-mode request mutates the mock state immediately
    /// instead of only being recorded.
    pub fn set_auto_apply(&self, enabled: bool) {
        self.auto_apply.store(enabled, Ordering::SeqCst);
    }

    /// When set, every state query fails with `Error::ProfileState`.
    pub fn set_fail_queries(&self, enabled: bool) {
        self.fail_queries.store(enabled, Ordering::SeqCst);
    }

    fn set_flags(&self, profile: ProfileId, unlocked: bool, quiet: bool) {
        if let Ok(mut flags) = self.flags.write() {
            flags.insert(profile, ProfileFlags { unlocked, quiet });
        }
    }

    fn query(&self, profile: ProfileId) -> Result<ProfileFlags> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(Error::ProfileState("query failure injected".into()));
        }
        self.flags
            .read()
            .ok()
            .and_then(|flags| flags.get(&profile).copied())
            .ok_or_else(|| Error::ProfileState(format!("unknown profile {profile}")))
    }
}

impl ProfileStateSource for MockProfileStateSource {
    fn is_profile_unlocked(&self, profile: ProfileId) -> Result<bool> {
        Ok(self.query(profile)?.unlocked)
    }

    fn is_quiet_mode_enabled(&self, profile: ProfileId) -> Result<bool> {
        Ok(self.query(profile)?.quiet)
    }

    fn request_quiet_mode(&self, profile: ProfileId, enabled: bool) -> Result<()> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((profile, enabled));
        }
        if self.auto_apply.load(Ordering::SeqCst) {
            self.set_quiet_mode(profile, enabled);
        }
        Ok(())
    }
}

/// One registered handler with its kind filter.
struct HandlerEntry {
    id: u64,
    kinds: Vec<EventKind>,
    handler: Arc<dyn Fn(ProfileEvent) + Send + Sync>,
}

/// Mock event bus for testing.
///
/// [`publish`](Self::publish) delivers events synchronously on the calling
/// thread, which makes ordering in tests deterministic.
///
/// # Example
///
/// ```
/// use mpa_core::{EventKind, ProfileEvent, ProfileId};
/// use mpa_platform::mock::MockProfileEventBus;
/// use mpa_platform::traits::ProfileEventBus;
///
/// let bus = MockProfileEventBus::new();
/// let subscription = bus
///     .subscribe(EventKind::ALL, Box::new(|event| println!("{:?}", event)))
///     .unwrap();
///
/// bus.publish(ProfileEvent::new(EventKind::UserUnlocked, ProfileId::new(10)));
/// drop(subscription); // detaches the handler
/// ```
#[derive(Clone, Default)]
pub struct MockProfileEventBus {
    handlers: Arc<Mutex<Vec<HandlerEntry>>>,
    next_id: Arc<AtomicU64>,
}

impl MockProfileEventBus {
    /// Creates an empty mock bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` synchronously to every handler whose filter matches.
    pub fn publish(&self, event: ProfileEvent) {
        tracing::debug!(profile = %event.profile, kind = ?event.kind, "mock bus publish");
        // Snapshot the matching handlers so one of them can subscribe or
        // unsubscribe without deadlocking on the registry lock.
        let matching: Vec<_> = self
            .handlers
            .lock()
            .map(|handlers| {
                handlers
                    .iter()
                    .filter(|entry| entry.kinds.contains(&event.kind))
                    .map(|entry| Arc::clone(&entry.handler))
                    .collect()
            })
            .unwrap_or_default();
        for handler in matching {
            handler(event);
        }
    }

    /// Number of live subscriptions.
    pub fn handler_count(&self) -> usize {
        self.handlers.lock().map(|handlers| handlers.len()).unwrap_or(0)
    }
}

impl ProfileEventBus for MockProfileEventBus {
    fn subscribe(
        &self,
        kinds: &[EventKind],
        handler: EventHandler,
    ) -> Result<Box<dyn EventSubscription>> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push(HandlerEntry {
                id,
                kinds: kinds.to_vec(),
                handler: Arc::from(handler),
            });
        }
        Ok(Box::new(MockSubscription {
            id,
            handlers: Arc::clone(&self.handlers),
        }))
    }
}

/// Subscription handle for [`MockProfileEventBus`]; detaches on drop.
struct MockSubscription {
    id: u64,
    handlers: Arc<Mutex<Vec<HandlerEntry>>>,
}

impl EventSubscription for MockSubscription {}

impl Drop for MockSubscription {
    fn drop(&mut self) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.retain(|entry| entry.id != self.id);
        }
    }
}
