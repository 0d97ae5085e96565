//! Resource quota monitor.
//!
//! Classifies usage against a plan-defined maximum. The monitor itself
//! blocks nothing; the repository guard consults it on the write path and
//! the UI consults it for banners and upgrade prompts. Thresholds are
//! defined once here so the three UI treatments stay consistent.

use serde::Serialize;

use gearbase_core::models::plan::ResourceKind;

/// Usage turns into a warning at this percentage.
pub const WARNING_PERCENT: f64 = 80.0;
/// Usage turns critical at this percentage.
pub const CRITICAL_PERCENT: f64 = 95.0;
/// Usage is exhausted at (and beyond) this percentage.
pub const EXHAUSTED_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageState {
    Normal,
    Warning,
    Critical,
    Exhausted,
}

/// User-facing messaging tier for a usage state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagingTier {
    None,
    Banner,
    UpgradeModal,
    HardBlock,
}

impl UsageState {
    pub fn messaging(self) -> MessagingTier {
        match self {
            UsageState::Normal => MessagingTier::None,
            UsageState::Warning => MessagingTier::Banner,
            UsageState::Critical => MessagingTier::UpgradeModal,
            UsageState::Exhausted => MessagingTier::HardBlock,
        }
    }
}

/// Classified usage for one resource kind.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuotaStatus {
    pub kind: ResourceKind,
    pub current: u64,
    pub max: u64,
    /// Raw utilization percentage; may exceed 100 after a concurrent
    /// creation race.
    pub percent: f64,
    pub state: UsageState,
}

impl QuotaStatus {
    /// Percentage clamped to `[0, 100]` for progress indicators.
    pub fn display_percent(&self) -> f64 {
        self.percent.clamp(0.0, 100.0)
    }
}

/// Classify `current` usage against `max`. A maximum of zero means no
/// quota was granted and is exhausted unconditionally (and avoids the
/// division by zero).
pub fn evaluate(kind: ResourceKind, current: u64, max: u64) -> QuotaStatus {
    if max == 0 {
        return QuotaStatus {
            kind,
            current,
            max,
            percent: EXHAUSTED_PERCENT,
            state: UsageState::Exhausted,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let percent = current as f64 / max as f64 * 100.0;
    let state = if percent >= EXHAUSTED_PERCENT {
        UsageState::Exhausted
    } else if percent >= CRITICAL_PERCENT {
        UsageState::Critical
    } else if percent >= WARNING_PERCENT {
        UsageState::Warning
    } else {
        UsageState::Normal
    };

    QuotaStatus {
        kind,
        current,
        max,
        percent,
        state,
    }
}
