//! Cross-profile blocker policy.
//!
//! When the user is looking at a tab for a profile other than the one the
//! chooser was launched from, sharing across that boundary may be forbidden
//! by the device administrator. The provider here decides whether a page
//! must be blocked and which message to show; message strings come from an
//! admin-managed source, with caller-supplied defaults as fallback.

use std::sync::Arc;

use crate::profile::ProfileId;

/// Decides whether content may cross a profile boundary.
pub trait CrossProfileAccessPolicy: Send + Sync {
    /// Returns `true` when the launch profile may hand content to `to`.
    fn has_cross_profile_access(&self, from: ProfileId, to: ProfileId) -> bool;
}

/// Admin-managed string lookup.
///
/// Returns `None` when the administrator supplied no override for an id, in
/// which case callers fall back to their built-in default.
pub trait ManagedStringSource {
    /// Looks up the managed string registered under `id`.
    fn managed_string(&self, id: &str) -> Option<String>;
}

/// Resolved blocker copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockerText {
    /// Headline shown in place of the target list.
    pub title: String,
    /// Secondary explanation line.
    pub subtitle: String,
}

/// A cross-profile blocker with admin-overridable strings.
#[derive(Debug, Clone)]
pub struct PolicyBlocker {
    title_id: String,
    default_title: String,
    subtitle_id: String,
    default_subtitle: String,
    event_tag: &'static str,
}

impl PolicyBlocker {
    /// Builds a blocker.
    ///
    /// `title_id`/`subtitle_id` name the admin-managed strings; the defaults
    /// are used when no managed override exists. `event_tag` labels the
    /// policy event recorded when the blocker is shown.
    pub fn new(
        title_id: impl Into<String>,
        default_title: impl Into<String>,
        subtitle_id: impl Into<String>,
        default_subtitle: impl Into<String>,
        event_tag: &'static str,
    ) -> Self {
        Self {
            title_id: title_id.into(),
            default_title: default_title.into(),
            subtitle_id: subtitle_id.into(),
            default_subtitle: default_subtitle.into(),
            event_tag,
        }
    }

    /// Resolves the blocker copy against the managed string source.
    pub fn resolve(&self, strings: &dyn ManagedStringSource) -> BlockerText {
        BlockerText {
            title: strings
                .managed_string(&self.title_id)
                .unwrap_or_else(|| self.default_title.clone()),
            subtitle: strings
                .managed_string(&self.subtitle_id)
                .unwrap_or_else(|| self.default_subtitle.clone()),
        }
    }

    /// Records that this blocker was shown to the user.
    pub fn mark_shown(&self) {
        tracing::info!(target: "mpa::policy", event = self.event_tag, "cross-profile blocker shown");
    }

    /// The policy event tag recorded by [`mark_shown`](Self::mark_shown).
    pub fn event_tag(&self) -> &'static str {
        self.event_tag
    }
}

/// Supplies the blocker for a profile page, if one applies.
pub trait BlockerProvider: Send + Sync {
    /// Returns the blocker for `target`'s page, or `None` to show content.
    fn blocker_for(&self, target: ProfileId) -> Option<&PolicyBlocker>;
}

/// Blocks sharing into any tab the launch profile may not reach.
pub struct NoCrossProfileBlockerProvider {
    personal: ProfileId,
    tab_owner_for_launch: ProfileId,
    policy: Arc<dyn CrossProfileAccessPolicy>,
    work_to_personal: PolicyBlocker,
    personal_to_work: PolicyBlocker,
}

impl NoCrossProfileBlockerProvider {
    /// Builds the provider.
    ///
    /// `work_to_personal` is shown on the personal page when a work-profile
    /// launch may not share into it; `personal_to_work` on a work page in
    /// the opposite direction.
    pub fn new(
        personal: ProfileId,
        tab_owner_for_launch: ProfileId,
        policy: Arc<dyn CrossProfileAccessPolicy>,
        work_to_personal: PolicyBlocker,
        personal_to_work: PolicyBlocker,
    ) -> Self {
        Self {
            personal,
            tab_owner_for_launch,
            policy,
            work_to_personal,
            personal_to_work,
        }
    }
}

impl BlockerProvider for NoCrossProfileBlockerProvider {
    fn blocker_for(&self, target: ProfileId) -> Option<&PolicyBlocker> {
        if target == self.tab_owner_for_launch {
            return None;
        }
        if self
            .policy
            .has_cross_profile_access(self.tab_owner_for_launch, target)
        {
            return None;
        }
        if target == self.personal {
            Some(&self.work_to_personal)
        } else {
            Some(&self.personal_to_work)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPolicy(bool);

    impl CrossProfileAccessPolicy for FixedPolicy {
        fn has_cross_profile_access(&self, _from: ProfileId, _to: ProfileId) -> bool {
            self.0
        }
    }

    struct NoOverrides;

    impl ManagedStringSource for NoOverrides {
        fn managed_string(&self, _id: &str) -> Option<String> {
            None
        }
    }

    struct TitleOverride;

    impl ManagedStringSource for TitleOverride {
        fn managed_string(&self, id: &str) -> Option<String> {
            (id == "blocker.title").then(|| "Managed title".to_string())
        }
    }

    fn provider(access: bool) -> NoCrossProfileBlockerProvider {
        NoCrossProfileBlockerProvider::new(
            ProfileId::new(0),
            ProfileId::new(10),
            Arc::new(FixedPolicy(access)),
            PolicyBlocker::new("w2p.title", "t1", "w2p.subtitle", "s1", "work_to_personal"),
            PolicyBlocker::new("p2w.title", "t2", "p2w.subtitle", "s2", "personal_to_work"),
        )
    }

    #[test]
    fn test_no_blocker_for_launch_tab() {
        let provider = provider(false);
        assert!(provider.blocker_for(ProfileId::new(10)).is_none());
    }

    #[test]
    fn test_no_blocker_when_access_granted() {
        let provider = provider(true);
        assert!(provider.blocker_for(ProfileId::new(0)).is_none());
        assert!(provider.blocker_for(ProfileId::new(11)).is_none());
    }

    #[test]
    fn test_blocker_direction_selects_message() {
        let provider = provider(false);

        let personal_page = provider.blocker_for(ProfileId::new(0)).unwrap();
        assert_eq!(personal_page.event_tag(), "work_to_personal");

        let work_page = provider.blocker_for(ProfileId::new(11)).unwrap();
        assert_eq!(work_page.event_tag(), "personal_to_work");
    }

    #[test]
    fn test_resolve_prefers_managed_strings() {
        let blocker = PolicyBlocker::new(
            "blocker.title",
            "Default title",
            "blocker.subtitle",
            "Default subtitle",
            "tag",
        );

        let defaults = blocker.resolve(&NoOverrides);
        assert_eq!(defaults.title, "Default title");
        assert_eq!(defaults.subtitle, "Default subtitle");

        let managed = blocker.resolve(&TitleOverride);
        assert_eq!(managed.title, "Managed title");
        assert_eq!(managed.subtitle, "Default subtitle");
    }
}
