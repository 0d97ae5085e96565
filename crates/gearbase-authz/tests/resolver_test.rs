//! Tenant resolver and active-tenant cell tests.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use gearbase_authz::resolver::{ActiveTenantCell, ResolutionState, TenantResolver};
use gearbase_core::error::{GearbaseError, GearbaseResult};
use gearbase_core::identity::IdentityProvider;
use gearbase_core::models::plan::PlanTier;
use gearbase_core::models::role::Role;
use gearbase_core::models::tenant::Tenant;
use gearbase_core::models::user::{Membership, User};
use gearbase_core::store::TenantDirectory;

/// In-memory tenant directory stub.
struct MapDirectory {
    tenants: HashMap<Uuid, Tenant>,
}

impl MapDirectory {
    fn of(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        Self {
            tenants: tenants.into_iter().map(|t| (t.id, t)).collect(),
        }
    }
}

impl TenantDirectory for MapDirectory {
    async fn get_tenant(&self, id: Uuid) -> GearbaseResult<Tenant> {
        self.tenants
            .get(&id)
            .cloned()
            .ok_or_else(|| GearbaseError::NotFound {
                entity: "tenant".into(),
                id: id.to_string(),
            })
    }
}

/// Identity provider stub holding a fixed session.
struct StubIdentity {
    user: Option<User>,
}

impl IdentityProvider for StubIdentity {
    async fn current_user(&self) -> GearbaseResult<Option<User>> {
        Ok(self.user.clone())
    }

    async fn sign_out(&self) -> GearbaseResult<()> {
        Ok(())
    }
}

fn membership(tenant_id: Uuid, role: Role, joined_secs: i64) -> Membership {
    Membership {
        tenant_id,
        role,
        joined_at: Utc.timestamp_opt(joined_secs, 0).unwrap(),
        invited_by: None,
    }
}

fn user(memberships: Vec<Membership>, is_super_admin: bool) -> User {
    User {
        id: Uuid::new_v4(),
        email: "sam@example.com".into(),
        display_name: "Sam".into(),
        is_super_admin,
        memberships,
    }
}

#[tokio::test]
async fn default_resolution_lands_in_earliest_membership() {
    let first = Tenant::new("First Shop", PlanTier::Basic);
    let second = Tenant::new("Second Shop", PlanTier::Premium);
    let identity = user(
        vec![
            membership(second.id, Role::Admin, 2_000),
            membership(first.id, Role::Owner, 1_000),
        ],
        false,
    );
    let resolver = TenantResolver::new(MapDirectory::of([first.clone(), second]));

    let ctx = resolver.resolve(&identity, None).await.unwrap().unwrap();
    assert_eq!(ctx.tenant.id, first.id);
    assert_eq!(ctx.role, Some(Role::Owner));
}

#[tokio::test]
async fn requested_tenant_must_be_a_membership() {
    let member_of = Tenant::new("Mine", PlanTier::Basic);
    let other = Tenant::new("Someone Else's", PlanTier::Basic);
    let identity = user(vec![membership(member_of.id, Role::Staff, 1_000)], false);
    let resolver = TenantResolver::new(MapDirectory::of([member_of, other.clone()]));

    let err = resolver
        .resolve(&identity, Some(other.id))
        .await
        .unwrap_err();
    assert!(
        matches!(err, GearbaseError::TenantNotAuthorized { tenant_id } if tenant_id == other.id),
        "expected TenantNotAuthorized, got {err:?}",
    );
}

#[tokio::test]
async fn requested_membership_resolves_with_its_role() {
    let a = Tenant::new("A", PlanTier::Basic);
    let b = Tenant::new("B", PlanTier::Premium);
    let identity = user(
        vec![
            membership(a.id, Role::Owner, 1_000),
            membership(b.id, Role::Viewer, 2_000),
        ],
        false,
    );
    let resolver = TenantResolver::new(MapDirectory::of([a, b.clone()]));

    let ctx = resolver
        .resolve(&identity, Some(b.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ctx.tenant.id, b.id);
    assert_eq!(ctx.role, Some(Role::Viewer));
}

#[tokio::test]
async fn super_admin_resolves_any_tenant_without_membership() {
    let tenant = Tenant::new("Not A Member", PlanTier::Enterprise);
    let identity = user(vec![], true);
    let resolver = TenantResolver::new(MapDirectory::of([tenant.clone()]));

    let ctx = resolver
        .resolve(&identity, Some(tenant.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ctx.tenant.id, tenant.id);
    assert_eq!(ctx.role, None);
    // The bypass still authorizes actions.
    assert!(ctx.can(gearbase_core::models::role::Permission::DeleteClients));
}

#[tokio::test]
async fn no_memberships_is_the_explicit_no_tenant_state() {
    let identity = user(vec![], false);
    let resolver = TenantResolver::new(MapDirectory::of([]));

    let resolved = resolver.resolve(&identity, None).await.unwrap();
    assert!(resolved.is_none());
}

#[tokio::test]
async fn missing_tenant_record_propagates_not_found() {
    let ghost = Uuid::new_v4();
    let identity = user(vec![membership(ghost, Role::Owner, 1_000)], false);
    let resolver = TenantResolver::new(MapDirectory::of([]));

    let err = resolver.resolve(&identity, Some(ghost)).await.unwrap_err();
    assert!(matches!(err, GearbaseError::NotFound { .. }));
}

#[tokio::test]
async fn signed_out_session_resolves_to_no_tenant() {
    let resolver = TenantResolver::new(MapDirectory::of([]));
    let provider = StubIdentity { user: None };

    let resolved = resolver.resolve_current(&provider, None).await.unwrap();
    assert!(resolved.is_none());
}

#[tokio::test]
async fn current_session_resolves_into_its_membership() {
    let shop = Tenant::new("Shop", PlanTier::Basic);
    let identity = user(vec![membership(shop.id, Role::Staff, 1_000)], false);
    let resolver = TenantResolver::new(MapDirectory::of([shop.clone()]));
    let provider = StubIdentity {
        user: Some(identity),
    };

    let ctx = resolver
        .resolve_current(&provider, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ctx.tenant.id, shop.id);
    assert_eq!(ctx.role, Some(Role::Staff));
}

#[tokio::test]
async fn stale_resolution_is_dropped_on_tenant_switch() {
    let a = Tenant::new("A", PlanTier::Basic);
    let b = Tenant::new("B", PlanTier::Premium);
    let identity = user(
        vec![
            membership(a.id, Role::Owner, 1_000),
            membership(b.id, Role::Owner, 2_000),
        ],
        false,
    );
    let resolver = TenantResolver::new(MapDirectory::of([a.clone(), b.clone()]));
    let cell = ActiveTenantCell::new();

    // Switch to A, then to B before A's resolution lands.
    let ticket_a = cell.begin();
    let ticket_b = cell.begin();

    let ctx_a = resolver.resolve(&identity, Some(a.id)).await.unwrap();
    let ctx_b = resolver.resolve(&identity, Some(b.id)).await.unwrap();

    // A's late result must be dropped; the cell keeps loading.
    assert!(!cell.complete(ticket_a, ctx_a));
    assert!(matches!(cell.snapshot(), ResolutionState::Loading));

    // B's result applies.
    assert!(cell.complete(ticket_b, ctx_b));
    match cell.snapshot() {
        ResolutionState::Ready(ctx) => assert_eq!(ctx.tenant.id, b.id),
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[tokio::test]
async fn completion_with_no_tenant_lands_in_no_tenant_state() {
    let cell = ActiveTenantCell::new();
    let ticket = cell.begin();
    assert!(matches!(cell.snapshot(), ResolutionState::Loading));
    assert!(cell.complete(ticket, None));
    assert!(matches!(cell.snapshot(), ResolutionState::NoTenant));
}
