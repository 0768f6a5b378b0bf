//! Tracker construction.
//!
//! All collaborators are injected explicitly; tests assemble the tracker
//! from mocks exactly the way production assembles it from platform
//! bindings. There is no process-wide override state.

use std::sync::Arc;

use mpa_core::ProfileId;
use mpa_platform::{ProfileEventBus, ProfileStateSource};

use crate::error::{Error, Result};
use crate::exec::{Dispatcher, TokioDispatcher};
use crate::tracker::{AvailabilityTracker, StateChangedCallback};

/// Builder for [`AvailabilityTracker`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mpa_core::ProfileId;
/// use mpa_platform::mock::{MockProfileEventBus, MockProfileStateSource};
/// use mpa_tracker::{AvailabilityTracker, InlineDispatcher};
///
/// let work = ProfileId::new(10);
/// let source = MockProfileStateSource::new().with_profile(work, true, false);
///
/// let tracker = AvailabilityTracker::builder()
///     .state_source(Arc::new(source))
///     .event_bus(Arc::new(MockProfileEventBus::new()))
///     .dispatcher(Arc::new(InlineDispatcher))
///     .managed_profiles([work])
///     .on_state_changed(|profile| println!("{profile} changed"))
///     .build()
///     .unwrap();
///
/// assert!(tracker.last_seen_enabled(work));
/// ```
#[derive(Default)]
pub struct TrackerBuilder {
    source: Option<Arc<dyn ProfileStateSource>>,
    bus: Option<Arc<dyn ProfileEventBus>>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    managed: Vec<ProfileId>,
    on_state_changed: Option<StateChangedCallback>,
}

impl TrackerBuilder {
    /// Sets the platform profile-state source. Required.
    pub fn state_source(mut self, source: Arc<dyn ProfileStateSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the platform event bus. Required.
    pub fn event_bus(mut self, bus: Arc<dyn ProfileEventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Sets the background dispatcher.
    ///
    /// Defaults to [`TokioDispatcher::current`] when unset.
    pub fn dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Sets the fixed set of managed profiles.
    pub fn managed_profiles(mut self, profiles: impl IntoIterator<Item = ProfileId>) -> Self {
        self.managed = profiles.into_iter().collect();
        self
    }

    /// Sets the state-changed callback. Required.
    ///
    /// Invoked with the affected profile on the event-delivery thread, after
    /// the tracker's own state is updated.
    pub fn on_state_changed(mut self, callback: impl Fn(ProfileId) + Send + Sync + 'static) -> Self {
        self.on_state_changed = Some(Arc::new(callback));
        self
    }

    /// Builds the tracker and seeds its enabled snapshot.
    ///
    /// # Errors
    ///
    /// `Error::Config` for a missing collaborator (or a missing dispatcher
    /// outside a tokio runtime); `Error::Platform` when the initial
    /// availability query fails.
    pub fn build(self) -> Result<AvailabilityTracker> {
        let source = self
            .source
            .ok_or_else(|| Error::Config("state source is required".into()))?;
        let bus = self
            .bus
            .ok_or_else(|| Error::Config("event bus is required".into()))?;
        let on_state_changed = self
            .on_state_changed
            .ok_or_else(|| Error::Config("state-changed callback is required".into()))?;
        let dispatcher = match self.dispatcher {
            Some(dispatcher) => dispatcher,
            None => Arc::new(TokioDispatcher::current()?),
        };

        AvailabilityTracker::from_parts(source, bus, dispatcher, self.managed, on_state_changed)
    }
}
