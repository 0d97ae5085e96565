//! Tenant-scoped repository guard.
//!
//! [`ScopedCollection`] mediates every create/read/update/delete against a
//! tenant-owned collection. It is the single enforcement point for tenant
//! isolation: ownership is checked inside the store query itself
//! (`WHERE tenant_id = $tid`), so reads and conditional writes are atomic
//! with their ownership check. A record owned by another tenant is
//! reported as not found, indistinguishable from nonexistence.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::{debug, warn};
use uuid::Uuid;

use gearbase_authz::quota::{self, UsageState};
use gearbase_core::error::{GearbaseError, GearbaseResult};
use gearbase_core::models::plan::{ResourceCounter, ResourceKind};
use gearbase_core::models::records::CashMovement;
use gearbase_core::store::{Document, ScopedRepository};

use crate::error::DbError;

/// Tenant-scoped CRUD over one document collection.
pub struct ScopedCollection<C: Connection, D: Document> {
    db: Surreal<C>,
    _marker: PhantomData<fn() -> D>,
}

impl<C: Connection, D: Document> ScopedCollection<C, D> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    /// Tenant's counter for a resource kind, or `None` when the tenant
    /// does not track that kind (untracked kinds are not quota-gated).
    async fn tenant_counter(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
    ) -> GearbaseResult<Option<ResourceCounter>> {
        #[derive(Debug, Deserialize)]
        struct CountersRow {
            #[serde(with = "gearbase_core::models::plan::counter_map")]
            resource_counters: BTreeMap<ResourceKind, ResourceCounter>,
        }

        let mut result = self
            .db
            .query("SELECT resource_counters FROM tenant WHERE entity_id = $tid LIMIT 1")
            .bind(("tid", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CountersRow> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.resource_counters.get(&kind).copied()))
    }

    /// Adjust the tenant's usage counter by one. Skipped when the tenant
    /// tracks no counter for the kind; decrements stop at zero.
    async fn bump_counter(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
        up: bool,
    ) -> GearbaseResult<()> {
        let path = kind.as_str();
        let query = if up {
            format!(
                "UPDATE tenant \
                 SET resource_counters.{path}.current += 1 \
                 WHERE entity_id = $tid AND resource_counters.{path} != NONE"
            )
        } else {
            format!(
                "UPDATE tenant \
                 SET resource_counters.{path}.current -= 1 \
                 WHERE entity_id = $tid \
                 AND resource_counters.{path}.current > 0"
            )
        };

        self.db
            .query(query)
            .bind(("tid", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }
}

impl<C: Connection, D: Document> ScopedRepository<D> for ScopedCollection<C, D> {
    async fn create(&self, active_tenant: Uuid, entity: D) -> GearbaseResult<D> {
        // Scoping is the caller's responsibility; an unscoped or
        // cross-scoped record here is a programmer error.
        if entity.tenant_id().is_nil() || entity.tenant_id() != active_tenant {
            return Err(GearbaseError::MissingTenantId {
                entity: D::COLLECTION.into(),
            });
        }

        if let Some(kind) = D::QUOTA
            && let Some(counter) = self.tenant_counter(active_tenant, kind).await?
        {
            let status = quota::evaluate(kind, counter.current, counter.max);
            if status.state == UsageState::Exhausted {
                debug!(
                    collection = D::COLLECTION,
                    tenant = %active_tenant,
                    current = counter.current,
                    max = counter.max,
                    "create blocked by exhausted quota"
                );
                return Err(GearbaseError::QuotaExceeded {
                    resource: kind,
                    current: counter.current,
                    max: counter.max,
                });
            }
        }

        let id = entity.id();
        let mut result = self
            .db
            .query(format!("CREATE {} CONTENT $doc", D::COLLECTION))
            .bind(("doc", entity))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<D> = result.take(0).map_err(DbError::from)?;
        let created = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: D::COLLECTION.into(),
            id: id.to_string(),
        })?;

        // Counter read and insert are separate statements: two concurrent
        // creates can both pass the gate and overshoot max by one. The
        // monitor's clamped display absorbs the transient.
        if let Some(kind) = D::QUOTA
            && let Err(err) = self.bump_counter(active_tenant, kind, true).await
        {
            // The row exists but the counter never moved; take the row
            // back out so the two stay consistent.
            let cleanup = self
                .db
                .query(format!(
                    "DELETE {} WHERE entity_id = $id AND tenant_id = $tid",
                    D::COLLECTION
                ))
                .bind(("id", id.to_string()))
                .bind(("tid", active_tenant.to_string()))
                .await
                .and_then(|response| response.check());
            if let Err(cleanup_err) = cleanup {
                warn!(
                    collection = D::COLLECTION,
                    id = %id,
                    error = %cleanup_err,
                    "failed to remove row after counter error"
                );
            }
            return Err(err);
        }

        Ok(created)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> GearbaseResult<D> {
        let mut result = self
            .db
            .query(format!(
                "SELECT * FROM {} \
                 WHERE entity_id = $id AND tenant_id = $tid LIMIT 1",
                D::COLLECTION
            ))
            .bind(("id", id.to_string()))
            .bind(("tid", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<D> = result.take(0).map_err(DbError::from)?;

        rows.into_iter().next().ok_or_else(|| {
            GearbaseError::NotFound {
                entity: D::COLLECTION.into(),
                id: id.to_string(),
            }
        })
    }

    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        mut patch: serde_json::Value,
    ) -> GearbaseResult<D> {
        let Some(fields) = patch.as_object_mut() else {
            return Err(GearbaseError::Validation {
                message: "update patch must be an object".into(),
            });
        };
        // tenant_id is immutable for the record's lifetime; the id and
        // creation time are not patchable either.
        fields.remove("tenant_id");
        fields.remove("entity_id");
        fields.remove("created_at");

        let mut result = self
            .db
            .query(format!(
                "UPDATE {} MERGE $patch \
                 WHERE entity_id = $id AND tenant_id = $tid",
                D::COLLECTION
            ))
            .bind(("patch", patch))
            .bind(("id", id.to_string()))
            .bind(("tid", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<D> = result.take(0).map_err(DbError::from)?;

        rows.into_iter().next().ok_or_else(|| {
            GearbaseError::NotFound {
                entity: D::COLLECTION.into(),
                id: id.to_string(),
            }
        })
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> GearbaseResult<()> {
        let mut result = self
            .db
            .query(format!(
                "DELETE {} \
                 WHERE entity_id = $id AND tenant_id = $tid \
                 RETURN BEFORE",
                D::COLLECTION
            ))
            .bind(("id", id.to_string()))
            .bind(("tid", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<D> = result.take(0).map_err(DbError::from)?;

        if rows.is_empty() {
            return Err(GearbaseError::NotFound {
                entity: D::COLLECTION.into(),
                id: id.to_string(),
            });
        }

        if let Some(kind) = D::QUOTA {
            self.bump_counter(tenant_id, kind, false).await?;
        }

        Ok(())
    }

    async fn list(&self, tenant_id: Uuid) -> GearbaseResult<Vec<D>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT * FROM {} \
                 WHERE tenant_id = $tid \
                 ORDER BY created_at DESC",
                D::COLLECTION
            ))
            .bind(("tid", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<D> = result.take(0).map_err(DbError::from)?;

        Ok(rows)
    }
}

impl<C: Connection> ScopedCollection<C, CashMovement> {
    /// Ledger entries within `[from, to]`, most recent movement first.
    ///
    /// # Errors
    ///
    /// Store failures propagate unchanged.
    pub async fn list_between(
        &self,
        tenant_id: Uuid,
        from: chrono::DateTime<chrono::Utc>,
        to: chrono::DateTime<chrono::Utc>,
    ) -> GearbaseResult<Vec<CashMovement>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM cash_movement \
                 WHERE tenant_id = $tid \
                 AND occurred_at >= $from AND occurred_at <= $to \
                 ORDER BY occurred_at DESC",
            )
            .bind(("tid", tenant_id.to_string()))
            .bind(("from", from))
            .bind(("to", to))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CashMovement> = result.take(0).map_err(DbError::from)?;

        Ok(rows)
    }
}
