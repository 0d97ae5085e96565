//! User and membership domain models.
//!
//! Users are produced by the external identity provider already
//! authenticated; this crate only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// The relationship granting a user a role within a specific tenant.
/// Invariant: a user holds at most one membership per tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub tenant_id: Uuid,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
    pub invited_by: Option<Uuid>,
}

/// A minimal, already-authenticated user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    /// Global flag bypassing all tenant-scoped checks.
    pub is_super_admin: bool,
    pub memberships: Vec<Membership>,
}

impl User {
    /// First membership for the given tenant, if any.
    pub fn membership_for(&self, tenant_id: Uuid) -> Option<&Membership> {
        self.memberships.iter().find(|m| m.tenant_id == tenant_id)
    }

    /// Deterministic default membership: earliest `joined_at`, ties broken
    /// by sequence order. This decides which tenant a freshly-authenticated
    /// user lands in, so the ordering must stay stable.
    pub fn default_membership(&self) -> Option<&Membership> {
        self.memberships.iter().min_by_key(|m| m.joined_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn membership(tenant_id: Uuid, secs: i64) -> Membership {
        Membership {
            tenant_id,
            role: Role::Staff,
            joined_at: Utc.timestamp_opt(secs, 0).unwrap(),
            invited_by: None,
        }
    }

    #[test]
    fn default_membership_is_earliest_joined() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let user = User {
            id: Uuid::new_v4(),
            email: "pat@example.com".into(),
            display_name: "Pat".into(),
            is_super_admin: false,
            memberships: vec![membership(a, 200), membership(b, 100)],
        };
        assert_eq!(user.default_membership().unwrap().tenant_id, b);
    }

    #[test]
    fn default_membership_tie_keeps_sequence_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let user = User {
            id: Uuid::new_v4(),
            email: "pat@example.com".into(),
            display_name: "Pat".into(),
            is_super_admin: false,
            memberships: vec![membership(a, 100), membership(b, 100)],
        };
        assert_eq!(user.default_membership().unwrap().tenant_id, a);
    }

    #[test]
    fn no_memberships_means_no_default() {
        let user = User {
            id: Uuid::new_v4(),
            email: "new@example.com".into(),
            display_name: "New".into(),
            is_super_admin: false,
            memberships: vec![],
        };
        assert!(user.default_membership().is_none());
    }
}
