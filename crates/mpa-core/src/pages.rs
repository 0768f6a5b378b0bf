//! Page model for a profile-tabbed chooser surface.
//!
//! Pure index arithmetic; rendering is the embedder's concern. Page 0 shows
//! the personal profile, followed by one page per work profile in
//! declaration order. Clone profiles have no page of their own and resolve
//! to the personal page.

use crate::error::{Error, Result};
use crate::profile::ProfileId;
use crate::roles::ProfileRoles;

/// Index-addressable profile pages with one active page.
#[derive(Debug, Clone)]
pub struct ProfilePages {
    personal: ProfileId,
    work: Vec<ProfileId>,
    clones: Vec<ProfileId>,
    default_page: usize,
    active_page: usize,
}

impl ProfilePages {
    /// Builds the page model from a session topology.
    ///
    /// The default (and initially active) page is the one owning the launch.
    pub fn from_roles(roles: &ProfileRoles) -> Self {
        let mut pages = Self {
            personal: roles.personal(),
            work: roles.work_profiles().to_vec(),
            clones: roles.clone_profiles().to_vec(),
            default_page: 0,
            active_page: 0,
        };
        // tab_owner_for_launch is personal or one of the work profiles, so
        // the lookup cannot miss.
        let default_page = pages
            .page_for_profile(roles.tab_owner_for_launch())
            .unwrap_or(0);
        pages.default_page = default_page;
        pages.active_page = default_page;
        pages
    }

    /// Number of pages: the personal page plus one per work profile.
    pub fn page_count(&self) -> usize {
        1 + self.work.len()
    }

    /// The profile shown on `index`, or `None` when out of range.
    pub fn profile_for_page(&self, index: usize) -> Option<ProfileId> {
        if index == 0 {
            Some(self.personal)
        } else {
            self.work.get(index - 1).copied()
        }
    }

    /// The page showing `profile`.
    ///
    /// Clone profiles map to the personal page. Profiles unknown to this
    /// session map to `None`.
    pub fn page_for_profile(&self, profile: ProfileId) -> Option<usize> {
        if profile == self.personal || self.clones.contains(&profile) {
            return Some(0);
        }
        self.work.iter().position(|&p| p == profile).map(|i| i + 1)
    }

    /// Page selected when the surface first opens.
    pub fn default_page(&self) -> usize {
        self.default_page
    }

    /// Currently selected page.
    pub fn active_page(&self) -> usize {
        self.active_page
    }

    /// Selects a page.
    ///
    /// # Errors
    ///
    /// `Error::PageOutOfRange` when `index` is not a valid page.
    pub fn set_active_page(&mut self, index: usize) -> Result<()> {
        if index >= self.page_count() {
            return Err(Error::PageOutOfRange {
                index,
                count: self.page_count(),
            });
        }
        self.active_page = index;
        Ok(())
    }
}
