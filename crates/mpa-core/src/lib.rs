//! Core types for the managed-profile availability (mpa) stack.
//!
//! This crate holds the platform-agnostic vocabulary shared by the tracker
//! and platform layers:
//! - Profile identity ([`ProfileId`])
//! - Availability events delivered by the host platform ([`ProfileEvent`])
//! - The per-session profile topology ([`ProfileRoles`])
//! - The page model for a profile-tabbed chooser surface ([`ProfilePages`])
//! - Cross-profile blocker policy ([`policy`])
//!
//! No I/O happens here. Platform integration lives in `mpa-platform`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod pages;
pub mod policy;
pub mod profile;
pub mod roles;

pub use error::{Error, Result};
pub use event::{EventKind, ProfileEvent};
pub use pages::ProfilePages;
pub use profile::ProfileId;
pub use roles::ProfileRoles;
