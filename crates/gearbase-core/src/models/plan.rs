//! Subscription plans, feature modules, and plan-limited resources.
//!
//! The module→plan and plan→limit mappings are closed static tables so
//! adding a tier, module, or resource kind is a compile-time exhaustive
//! change, never a string lookup.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Subscription plan tier. Tiers nest monotonically: everything available
/// at a lower tier remains available at every higher tier, which is why
/// the derived ordering is meaningful.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanTier {
    Trial,
    Basic,
    Premium,
    Enterprise,
}

impl PlanTier {
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Trial,
        PlanTier::Basic,
        PlanTier::Premium,
        PlanTier::Enterprise,
    ];

    /// Modules included at this tier: every module whose minimum plan is
    /// at or below it. Monotone nesting falls out of the comparison.
    pub fn default_modules(self) -> BTreeSet<Module> {
        Module::ALL
            .iter()
            .copied()
            .filter(|m| m.required_plan() <= self)
            .collect()
    }

    /// Plan-defined maximums per resource kind. A maximum of zero models
    /// "no quota granted" and evaluates as exhausted from the start.
    pub fn resource_limits(self) -> BTreeMap<ResourceKind, u64> {
        use ResourceKind::*;
        let limits: [(ResourceKind, u64); 5] = match self {
            PlanTier::Trial => [
                (Clients, 10),
                (Vehicles, 10),
                (Jobs, 20),
                (Appointments, 25),
                (Products, 0),
            ],
            PlanTier::Basic => [
                (Clients, 50),
                (Vehicles, 100),
                (Jobs, 200),
                (Appointments, 500),
                (Products, 0),
            ],
            PlanTier::Premium => [
                (Clients, 1_000),
                (Vehicles, 2_000),
                (Jobs, 5_000),
                (Appointments, 10_000),
                (Products, 2_000),
            ],
            PlanTier::Enterprise => [
                (Clients, 50_000),
                (Vehicles, 100_000),
                (Jobs, 200_000),
                (Appointments, 500_000),
                (Products, 50_000),
            ],
        };
        limits.into_iter().collect()
    }
}

/// A feature area that can be enabled per tenant based on plan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Module {
    Clients,
    Vehicles,
    Schedule,
    Quotes,
    Jobs,
    Inventory,
    Invoicing,
    Reports,
}

impl Module {
    pub const ALL: [Module; 8] = [
        Module::Clients,
        Module::Vehicles,
        Module::Schedule,
        Module::Quotes,
        Module::Jobs,
        Module::Inventory,
        Module::Invoicing,
        Module::Reports,
    ];

    /// Minimum plan tier that includes this module.
    pub fn required_plan(self) -> PlanTier {
        match self {
            Module::Clients | Module::Schedule => PlanTier::Trial,
            Module::Vehicles | Module::Quotes | Module::Jobs => PlanTier::Basic,
            Module::Inventory | Module::Invoicing => PlanTier::Premium,
            Module::Reports => PlanTier::Enterprise,
        }
    }
}

/// Per-tenant feature toggles orthogonal to the module set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureFlag {
    OnlineBooking,
    SmsReminders,
    CustomBranding,
    ApiAccess,
}

/// A plan-limited resource kind. Serialized names double as the counter
/// field paths on the stored tenant record, so they stay snake_case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Clients,
    Vehicles,
    Products,
    Jobs,
    Appointments,
}

impl ResourceKind {
    /// Stable field-path name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Clients => "clients",
            ResourceKind::Vehicles => "vehicles",
            ResourceKind::Products => "products",
            ResourceKind::Jobs => "jobs",
            ResourceKind::Appointments => "appointments",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored counter key names no known resource kind.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown resource kind: {0}")]
pub struct UnknownResourceKind(String);

impl std::str::FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clients" => Ok(ResourceKind::Clients),
            "vehicles" => Ok(ResourceKind::Vehicles),
            "products" => Ok(ResourceKind::Products),
            "jobs" => Ok(ResourceKind::Jobs),
            "appointments" => Ok(ResourceKind::Appointments),
            other => Err(UnknownResourceKind(other.into())),
        }
    }
}

/// Serde adapter for counter maps. The document store accepts only plain
/// strings as object keys (serde's unit-variant key encoding is rejected),
/// so keys travel as [`ResourceKind::as_str`] names.
pub mod counter_map {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{ResourceCounter, ResourceKind};

    pub fn serialize<S>(
        counters: &BTreeMap<ResourceKind, ResourceCounter>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(counters.len()))?;
        for (kind, counter) in counters {
            map.serialize_entry(kind.as_str(), counter)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<ResourceKind, ResourceCounter>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, ResourceCounter>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, counter)| {
                let kind = key.parse::<ResourceKind>().map_err(D::Error::custom)?;
                Ok((kind, counter))
            })
            .collect()
    }
}

/// Current usage against a plan-defined maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCounter {
    pub current: u64,
    pub max: u64,
}
