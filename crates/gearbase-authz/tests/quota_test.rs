//! Quota monitor classification tests.

use gearbase_authz::quota::{MessagingTier, UsageState, evaluate};
use gearbase_core::models::plan::ResourceKind;

const KIND: ResourceKind = ResourceKind::Clients;

#[test]
fn zero_max_is_exhausted_unconditionally() {
    let status = evaluate(KIND, 0, 0);
    assert_eq!(status.state, UsageState::Exhausted);
    assert!((status.display_percent() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn threshold_boundaries() {
    assert_eq!(evaluate(KIND, 79, 100).state, UsageState::Normal);
    assert_eq!(evaluate(KIND, 80, 100).state, UsageState::Warning);
    assert_eq!(evaluate(KIND, 94, 100).state, UsageState::Warning);
    assert_eq!(evaluate(KIND, 95, 100).state, UsageState::Critical);
    assert_eq!(evaluate(KIND, 99, 100).state, UsageState::Critical);
    assert_eq!(evaluate(KIND, 100, 100).state, UsageState::Exhausted);
}

#[test]
fn overshoot_clamps_the_displayed_percentage() {
    let status = evaluate(KIND, 150, 100);
    assert_eq!(status.state, UsageState::Exhausted);
    assert!(status.percent > 100.0, "raw percent keeps the overshoot");
    assert!((status.display_percent() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn empty_usage_is_normal() {
    let status = evaluate(KIND, 0, 50);
    assert_eq!(status.state, UsageState::Normal);
    assert!((status.display_percent() - 0.0).abs() < f64::EPSILON);
}

#[test]
fn messaging_tiers_track_states() {
    assert_eq!(UsageState::Normal.messaging(), MessagingTier::None);
    assert_eq!(UsageState::Warning.messaging(), MessagingTier::Banner);
    assert_eq!(UsageState::Critical.messaging(), MessagingTier::UpgradeModal);
    assert_eq!(UsageState::Exhausted.messaging(), MessagingTier::HardBlock);
}

#[test]
fn non_round_limits_classify_by_percentage() {
    // 40 of 50 is exactly 80%: the warning threshold is inclusive.
    assert_eq!(evaluate(KIND, 39, 50).state, UsageState::Normal);
    assert_eq!(evaluate(KIND, 40, 50).state, UsageState::Warning);
    assert_eq!(evaluate(KIND, 41, 50).state, UsageState::Warning);
}
