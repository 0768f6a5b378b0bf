//! Trait contract tests for `ProfileStateSource` and `ProfileEventBus`.
//!
//! These verify that the mock implementations satisfy the trait contracts
//! when used through trait objects, the way the tracker consumes them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mpa_core::{EventKind, ProfileEvent, ProfileId};
use mpa_platform::mock::{MockProfileEventBus, MockProfileStateSource};
use mpa_platform::{ProfileEventBus, ProfileStateSource};

// ============================================================================
// ProfileStateSource contract
// ============================================================================

#[test]
fn test_state_source_live_queries() {
    let profile = ProfileId::new(10);
    let mock = MockProfileStateSource::new().with_profile(profile, true, false);
    let source: &dyn ProfileStateSource = &mock;

    assert!(source.is_profile_unlocked(profile).unwrap());
    assert!(!source.is_quiet_mode_enabled(profile).unwrap());

    mock.set_unlocked(profile, false);
    assert!(
        !source.is_profile_unlocked(profile).unwrap(),
        "queries must observe the current state, not a snapshot"
    );
}

#[test]
fn test_state_source_request_sink_is_one_way() {
    let profile = ProfileId::new(10);
    let mock = MockProfileStateSource::new().with_profile(profile, true, true);
    let source: &dyn ProfileStateSource = &mock;

    source.request_quiet_mode(profile, false).unwrap();

    // The request alone changes nothing observable; only the platform
    // (here: auto-apply) moves the state.
    assert!(source.is_quiet_mode_enabled(profile).unwrap());
    assert_eq!(mock.quiet_mode_requests(), vec![(profile, false)]);
}

#[test]
fn test_state_source_query_failure_is_an_error() {
    let profile = ProfileId::new(10);
    let mock = MockProfileStateSource::new().with_profile(profile, true, false);
    mock.set_fail_queries(true);
    let source: &dyn ProfileStateSource = &mock;

    assert!(source.is_profile_unlocked(profile).is_err());
    assert!(source.is_quiet_mode_enabled(profile).is_err());
}

// ============================================================================
// ProfileEventBus contract
// ============================================================================

#[test]
fn test_bus_delivers_to_matching_kinds_only() {
    let bus = MockProfileEventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);

    let _subscription = bus
        .subscribe(
            &[EventKind::ProfileAvailable, EventKind::ProfileUnavailable],
            Box::new(move |event| {
                seen_clone.lock().unwrap().push(event.kind);
            }),
        )
        .unwrap();

    bus.publish(ProfileEvent::new(EventKind::UserUnlocked, ProfileId::new(1)));
    bus.publish(ProfileEvent::new(
        EventKind::ProfileAvailable,
        ProfileId::new(1),
    ));

    assert_eq!(seen.lock().unwrap().as_slice(), &[EventKind::ProfileAvailable]);
}

#[test]
fn test_bus_subscription_is_scoped_to_its_handle() {
    let bus = MockProfileEventBus::new();
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = Arc::clone(&count);

    let subscription = bus
        .subscribe(
            EventKind::ALL,
            Box::new(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

    bus.publish(ProfileEvent::new(EventKind::UserUnlocked, ProfileId::new(1)));
    assert_eq!(count.load(Ordering::SeqCst), 1);

    drop(subscription);
    bus.publish(ProfileEvent::new(EventKind::UserUnlocked, ProfileId::new(1)));
    assert_eq!(
        count.load(Ordering::SeqCst),
        1,
        "no delivery after the handle is dropped"
    );
}

#[test]
fn test_bus_all_profiles_scope() {
    // The subscription filter is by event kind only; every profile's
    // events reach the handler. Target filtering is the consumer's job.
    let bus = MockProfileEventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);

    let _subscription = bus
        .subscribe(
            &[EventKind::UserUnlocked],
            Box::new(move |event| {
                seen_clone.lock().unwrap().push(event.profile);
            }),
        )
        .unwrap();

    bus.publish(ProfileEvent::new(EventKind::UserUnlocked, ProfileId::new(1)));
    bus.publish(ProfileEvent::new(EventKind::UserUnlocked, ProfileId::new(2)));

    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[ProfileId::new(1), ProfileId::new(2)]
    );
}
