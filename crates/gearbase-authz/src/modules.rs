//! Module access policy: plan-gated feature areas.

use serde::Serialize;

use gearbase_core::models::plan::{Module, PlanTier};
use gearbase_core::models::tenant::Tenant;

use crate::resolver::ResolutionState;

/// Outcome of a module access check.
///
/// `required_plan` is always populated, even when access is allowed, so
/// callers can render "included in your plan" vs "requires upgrade to X"
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleAccess {
    pub allowed: bool,
    pub required_plan: PlanTier,
    /// True while the active tenant is still resolving. Callers must not
    /// treat the accompanying `allowed = false` as a final denial.
    pub is_loading: bool,
}

/// Access decision for a module against a (possibly absent) tenant.
/// No tenant means no default module set: denied unconditionally.
pub fn module_access(tenant: Option<&Tenant>, module: Module) -> ModuleAccess {
    ModuleAccess {
        allowed: tenant.is_some_and(|t| t.config.modules.contains(&module)),
        required_plan: module.required_plan(),
        is_loading: false,
    }
}

/// Access decision against the current resolution state. While resolution
/// is pending this returns `allowed = false, is_loading = true` rather
/// than a false negative that could flash denied UI.
pub fn module_access_in(state: &ResolutionState, module: Module) -> ModuleAccess {
    match state {
        ResolutionState::Loading => ModuleAccess {
            allowed: false,
            required_plan: module.required_plan(),
            is_loading: true,
        },
        ResolutionState::NoTenant => module_access(None, module),
        ResolutionState::Ready(ctx) => module_access(Some(&ctx.tenant), module),
    }
}
