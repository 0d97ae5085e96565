//! Error types for the Gearbase system.

use thiserror::Error;
use uuid::Uuid;

use crate::models::plan::ResourceKind;

#[derive(Debug, Error)]
pub enum GearbaseError {
    /// Deliberately merged kind: a record that does not exist and a record
    /// owned by another tenant are indistinguishable to the caller, so
    /// tenant isolation never leaks cross-tenant existence.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The requested tenant is not among the caller's memberships.
    #[error("Not authorized for tenant {tenant_id}")]
    TenantNotAuthorized { tenant_id: Uuid },

    /// A record reached the repository guard without being scoped to the
    /// active tenant. Programmer error; correct callers never hit this.
    #[error("Entity created without tenant scoping: {entity}")]
    MissingTenantId { entity: String },

    /// Plan limit for the resource kind is used up. Recoverable; callers
    /// should present an upgrade path rather than a failure screen.
    #[error("Quota exceeded for {resource}: {current}/{max}")]
    QuotaExceeded {
        resource: ResourceKind,
        current: u64,
        max: u64,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type GearbaseResult<T> = Result<T, GearbaseError>;
