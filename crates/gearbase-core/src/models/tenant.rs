//! Tenant domain model.
//!
//! A tenant is an organization whose data is isolated from all other
//! tenants. Every tenant-owned record carries the tenant's id, and every
//! user action is gated by the tenant's plan, module set, and the caller's
//! role within it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::{FeatureFlag, Module, PlanTier, ResourceCounter, ResourceKind};

/// Per-tenant configuration: enabled modules and feature toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantConfig {
    pub modules: BTreeSet<Module>,
    pub features: BTreeSet<FeatureFlag>,
}

/// An organization with an isolated data set, a subscription plan, and
/// plan-limited resource counters. Read-mostly from the engine's
/// perspective; billing/admin flows mutate it out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Stored under `entity_id` so the document store's own record id
    /// stays untouched.
    #[serde(rename = "entity_id", with = "super::uuid_string")]
    pub id: Uuid,
    pub name: String,
    pub plan: PlanTier,
    pub config: TenantConfig,
    /// Stored with plain string keys; see [`counter_map`](super::plan::counter_map).
    #[serde(with = "crate::models::plan::counter_map")]
    pub resource_counters: BTreeMap<ResourceKind, ResourceCounter>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// New tenant with the plan's default module set and zeroed counters
    /// at the plan's limits.
    pub fn new(name: impl Into<String>, plan: PlanTier) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plan,
            config: TenantConfig {
                modules: plan.default_modules(),
                features: BTreeSet::new(),
            },
            resource_counters: plan
                .resource_limits()
                .into_iter()
                .map(|(kind, max)| (kind, ResourceCounter { current: 0, max }))
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Counter for a resource kind, if the tenant tracks one.
    pub fn counter(&self, kind: ResourceKind) -> Option<ResourceCounter> {
        self.resource_counters.get(&kind).copied()
    }
}

/// Fields required to create a new tenant. Module set and features
/// default from the plan tier when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub plan: PlanTier,
    pub modules: Option<BTreeSet<Module>>,
    pub features: Option<BTreeSet<FeatureFlag>>,
}

/// Fields that can be updated on an existing tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTenant {
    pub name: Option<String>,
    pub plan: Option<PlanTier>,
    pub modules: Option<BTreeSet<Module>>,
    pub features: Option<BTreeSet<FeatureFlag>>,
}
