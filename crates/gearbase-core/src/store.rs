//! Store trait definitions for data access abstraction.
//!
//! The document store itself is an external collaborator; these traits are
//! the seam it is consumed through. All operations are async, and every
//! tenant-scoped operation takes an explicit `tenant_id` — there is no
//! ambient active tenant.

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::GearbaseResult;
use crate::models::plan::ResourceKind;
use crate::models::tenant::{CreateTenant, Tenant, UpdateTenant};

/// A tenant-owned record type persisted as an opaque document.
///
/// Documents serialize their domain id under `entity_id` so the store's
/// own record id stays out of the payload.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection (table) the documents live in.
    const COLLECTION: &'static str;
    /// Resource kind counted against the tenant's plan, if any.
    const QUOTA: Option<ResourceKind>;

    fn id(&self) -> Uuid;
    fn tenant_id(&self) -> Uuid;
}

/// Read access to tenant configuration; all the tenant resolver needs.
pub trait TenantDirectory: Send + Sync {
    fn get_tenant(&self, id: Uuid) -> impl Future<Output = GearbaseResult<Tenant>> + Send;
}

/// Full tenant lifecycle (global scope — authorization happens via
/// memberships, not via a tenant filter).
pub trait TenantStore: TenantDirectory {
    fn create(&self, input: CreateTenant) -> impl Future<Output = GearbaseResult<Tenant>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateTenant,
    ) -> impl Future<Output = GearbaseResult<Tenant>> + Send;
}

/// Tenant-scoped CRUD over one document collection. Implementations are
/// the single enforcement point for tenant isolation: no operation may
/// return or mutate a record owned by another tenant, and ownership
/// failures are indistinguishable from "not found".
pub trait ScopedRepository<D: Document>: Send + Sync {
    /// Insert a record scoped to the active tenant. Fails with
    /// `MissingTenantId` when the record is not scoped to `active_tenant`,
    /// and with `QuotaExceeded` when the kind's counter is exhausted.
    fn create(
        &self,
        active_tenant: Uuid,
        entity: D,
    ) -> impl Future<Output = GearbaseResult<D>> + Send;

    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = GearbaseResult<D>> + Send;

    /// Merge-patch an owned record. Scoping fields in the patch are
    /// ignored; `tenant_id` is immutable for the record's lifetime.
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        patch: serde_json::Value,
    ) -> impl Future<Output = GearbaseResult<D>> + Send;

    fn delete(&self, tenant_id: Uuid, id: Uuid)
    -> impl Future<Output = GearbaseResult<()>> + Send;

    /// All records owned by the tenant, newest first.
    fn list(&self, tenant_id: Uuid) -> impl Future<Output = GearbaseResult<Vec<D>>> + Send;
}
