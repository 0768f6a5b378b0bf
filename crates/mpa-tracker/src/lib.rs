//! Availability tracking for managed profiles.
//!
//! [`AvailabilityTracker`] maintains, for a fixed set of managed profiles,
//! whether each profile is usable (unlocked and not in quiet mode) and
//! whether an enable request is in flight. It is driven by explicit
//! quiet-mode requests and by availability events from the platform bus;
//! state changes are surfaced through a caller-supplied callback.
//!
//! The platform boundary traits and their mocks live in `mpa-platform`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod exec;
pub mod tracker;

pub use builder::TrackerBuilder;
pub use error::{Error, Result};
pub use exec::{Dispatcher, InlineDispatcher, TaskHandle, TokioDispatcher};
pub use tracker::{AvailabilityTracker, StateChangedCallback};
