//! Platform integration boundary for the mpa stack.
//!
//! Wraps the host platform's profile-management surface behind traits:
//! - [`ProfileStateSource`]: unlock/quiet-mode queries and the quiet-mode
//!   request sink
//! - [`ProfileEventBus`]: filtered availability-event subscription with
//!   drop-cancelled handles
//!
//! Mock implementations for testing ship in [`mock`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod mock;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{EventHandler, EventSubscription, ProfileEventBus, ProfileStateSource};
