//! Per-session profile topology.
//!
//! A chooser session is launched as some user; it sees one personal profile
//! and any number of work and clone profiles. [`ProfileRoles`] records that
//! topology once, at session start, and derives which tab owns the launch.
//! It is built through an explicit builder and then never mutated.

use crate::error::{Error, Result};
use crate::profile::ProfileId;

/// Immutable record of the profile topology for one hosting session.
///
/// # Example
///
/// ```
/// use mpa_core::{ProfileId, ProfileRoles};
///
/// let roles = ProfileRoles::builder()
///     .calling_app_user_id(42)
///     .personal(ProfileId::new(101))
///     .work_profiles([ProfileId::new(202)])
///     .launched_as(ProfileId::new(202))
///     .build()
///     .unwrap();
///
/// // Launched from a work profile, so the work tab owns the launch.
/// assert_eq!(roles.tab_owner_for_launch(), ProfileId::new(202));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRoles {
    calling_app_user_id: u32,
    launched_as: ProfileId,
    personal: ProfileId,
    work: Vec<ProfileId>,
    clones: Vec<ProfileId>,
    tab_owner_for_launch: ProfileId,
}

impl ProfileRoles {
    /// Starts building a topology record.
    pub fn builder() -> ProfileRolesBuilder {
        ProfileRolesBuilder::default()
    }

    /// User id of the application that launched the session.
    pub fn calling_app_user_id(&self) -> u32 {
        self.calling_app_user_id
    }

    /// Profile the session was launched as.
    pub fn launched_as(&self) -> ProfileId {
        self.launched_as
    }

    /// The personal profile.
    pub fn personal(&self) -> ProfileId {
        self.personal
    }

    /// Managed work profiles, in declaration order.
    pub fn work_profiles(&self) -> &[ProfileId] {
        &self.work
    }

    /// Clone profiles. These share the personal tab.
    pub fn clone_profiles(&self) -> &[ProfileId] {
        &self.clones
    }

    /// Profile whose tab is initially selected.
    ///
    /// The launching profile when it is a work profile, the personal profile
    /// otherwise (including launches from profiles unknown to this session).
    pub fn tab_owner_for_launch(&self) -> ProfileId {
        self.tab_owner_for_launch
    }
}

/// Builder for [`ProfileRoles`].
#[derive(Debug, Default)]
pub struct ProfileRolesBuilder {
    calling_app_user_id: u32,
    launched_as: Option<ProfileId>,
    personal: Option<ProfileId>,
    work: Vec<ProfileId>,
    clones: Vec<ProfileId>,
}

impl ProfileRolesBuilder {
    /// Sets the user id of the launching application.
    pub fn calling_app_user_id(mut self, user_id: u32) -> Self {
        self.calling_app_user_id = user_id;
        self
    }

    /// Sets the profile the session was launched as. Required.
    pub fn launched_as(mut self, profile: ProfileId) -> Self {
        self.launched_as = Some(profile);
        self
    }

    /// Sets the personal profile. Required.
    pub fn personal(mut self, profile: ProfileId) -> Self {
        self.personal = Some(profile);
        self
    }

    /// Sets the managed work profiles.
    pub fn work_profiles(mut self, profiles: impl IntoIterator<Item = ProfileId>) -> Self {
        self.work = profiles.into_iter().collect();
        self
    }

    /// Sets the clone profiles.
    pub fn clone_profiles(mut self, profiles: impl IntoIterator<Item = ProfileId>) -> Self {
        self.clones = profiles.into_iter().collect();
        self
    }

    /// Finalizes the record and derives the launch tab owner.
    ///
    /// # Errors
    ///
    /// `Error::MissingField` when `personal` or `launched_as` was not set.
    pub fn build(self) -> Result<ProfileRoles> {
        let personal = self.personal.ok_or(Error::MissingField("personal"))?;
        let launched_as = self.launched_as.ok_or(Error::MissingField("launched_as"))?;

        let tab_owner_for_launch = if self.work.contains(&launched_as) {
            launched_as
        } else {
            personal
        };

        Ok(ProfileRoles {
            calling_app_user_id: self.calling_app_user_id,
            launched_as,
            personal,
            work: self.work,
            clones: self.clones,
            tab_owner_for_launch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_properties() {
        // Fields reflected back without logic.
        let roles = ProfileRoles::builder()
            .calling_app_user_id(42)
            .launched_as(ProfileId::new(116))
            .personal(ProfileId::new(117))
            .work_profiles([ProfileId::new(118), ProfileId::new(119)])
            .clone_profiles([ProfileId::new(120)])
            .build()
            .unwrap();

        assert_eq!(roles.calling_app_user_id(), 42);
        assert_eq!(roles.launched_as(), ProfileId::new(116));
        assert_eq!(roles.personal(), ProfileId::new(117));
        assert_eq!(
            roles.work_profiles(),
            &[ProfileId::new(118), ProfileId::new(119)]
        );
        assert_eq!(roles.clone_profiles(), &[ProfileId::new(120)]);
    }

    #[test]
    fn test_work_tab_owns_launch_from_work_profile() {
        let roles = ProfileRoles::builder()
            .calling_app_user_id(42)
            .personal(ProfileId::new(101))
            .work_profiles([ProfileId::new(202), ProfileId::new(203)])
            .launched_as(ProfileId::new(202))
            .build()
            .unwrap();

        assert_eq!(roles.tab_owner_for_launch(), ProfileId::new(202));
    }

    #[test]
    fn test_personal_tab_owns_launch_from_personal_profile() {
        let roles = ProfileRoles::builder()
            .calling_app_user_id(42)
            .personal(ProfileId::new(101))
            .work_profiles([ProfileId::new(202), ProfileId::new(203)])
            .launched_as(ProfileId::new(101))
            .build()
            .unwrap();

        assert_eq!(roles.tab_owner_for_launch(), ProfileId::new(101));
    }

    #[test]
    fn test_personal_tab_owns_launch_from_other_profile() {
        let roles = ProfileRoles::builder()
            .calling_app_user_id(42)
            .personal(ProfileId::new(101))
            .work_profiles([ProfileId::new(202), ProfileId::new(203)])
            .launched_as(ProfileId::new(303))
            .build()
            .unwrap();

        assert_eq!(roles.tab_owner_for_launch(), ProfileId::new(101));
    }

    #[test]
    fn test_build_requires_personal_and_launched_as() {
        let missing_personal = ProfileRoles::builder()
            .launched_as(ProfileId::new(1))
            .build();
        assert!(missing_personal.is_err(), "personal should be required");

        let missing_launched_as = ProfileRoles::builder()
            .personal(ProfileId::new(1))
            .build();
        assert!(missing_launched_as.is_err(), "launched_as should be required");
    }
}
