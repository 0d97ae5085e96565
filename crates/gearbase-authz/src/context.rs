//! The resolved active-tenant context and its permission predicates.

use uuid::Uuid;

use gearbase_core::models::role::{Permission, Role};
use gearbase_core::models::tenant::Tenant;
use gearbase_core::models::user::User;

/// Everything authorization needs about one user acting within one tenant.
///
/// An explicit value threaded through call sites — never ambient state —
/// so the engine stays testable and free of hidden coupling.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub user_id: Uuid,
    pub is_super_admin: bool,
    /// The caller's role within the tenant. `None` for super-admins
    /// resolving a tenant they hold no membership in.
    pub role: Option<Role>,
    pub tenant: Tenant,
}

impl TenantContext {
    pub fn for_user(user: &User, tenant: Tenant) -> Self {
        let role = user.membership_for(tenant.id).map(|m| m.role);
        Self {
            user_id: user.id,
            is_super_admin: user.is_super_admin,
            role,
            tenant,
        }
    }

    /// True iff the caller's role grants `permission`, or the caller is a
    /// super-admin. Without a membership in the active tenant everything
    /// is denied (super-admins excepted).
    pub fn can(&self, permission: Permission) -> bool {
        self.is_super_admin || self.role.is_some_and(|r| r.has_grant(permission))
    }

    /// True iff at least one of `permissions` is granted. An empty input
    /// is `false` — never vacuously true.
    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.can(*p))
    }

    /// True iff every element of `permissions` is granted. An empty input
    /// is `true` (vacuous truth) — deliberately asymmetric with
    /// [`can_any`](Self::can_any).
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.can(*p))
    }
}
