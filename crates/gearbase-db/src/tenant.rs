//! SurrealDB implementation of the tenant store.
//!
//! Tenants are global-scope records: access control happens through
//! memberships at the resolver, not through a tenant filter here.

use chrono::Utc;
use surrealdb::{Connection, Surreal};
use tracing::debug;
use uuid::Uuid;

use gearbase_core::error::GearbaseResult;
use gearbase_core::models::tenant::{CreateTenant, Tenant, UpdateTenant};
use gearbase_core::store::{TenantDirectory, TenantStore};

use crate::error::DbError;

#[derive(Clone)]
pub struct SurrealTenantStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TenantDirectory for SurrealTenantStore<C> {
    async fn get_tenant(&self, id: Uuid) -> GearbaseResult<Tenant> {
        let mut result = self
            .db
            .query("SELECT * FROM tenant WHERE entity_id = $id LIMIT 1")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<Tenant> = result.take(0).map_err(DbError::from)?;

        Ok(rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id.to_string(),
        })?)
    }
}

impl<C: Connection> TenantStore for SurrealTenantStore<C> {
    async fn create(&self, input: CreateTenant) -> GearbaseResult<Tenant> {
        // Module set and counters default from the plan; explicit overrides
        // win (billing flows may grant add-ons).
        let mut tenant = Tenant::new(input.name, input.plan);
        if let Some(modules) = input.modules {
            tenant.config.modules = modules;
        }
        if let Some(features) = input.features {
            tenant.config.features = features;
        }

        debug!(tenant = %tenant.id, plan = ?tenant.plan, "creating tenant");

        let id = tenant.id;
        let mut result = self
            .db
            .query("CREATE tenant CONTENT $doc")
            .bind(("doc", tenant))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<Tenant> = result.take(0).map_err(DbError::from)?;

        Ok(rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id.to_string(),
        })?)
    }

    async fn update(&self, id: Uuid, input: UpdateTenant) -> GearbaseResult<Tenant> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.plan.is_some() {
            sets.push("plan = $plan");
        }
        if input.modules.is_some() {
            sets.push("config.modules = $modules");
        }
        if input.features.is_some() {
            sets.push("config.features = $features");
        }
        sets.push("updated_at = $updated_at");

        let query = format!(
            "UPDATE tenant SET {} WHERE entity_id = $id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(query)
            .bind(("id", id.to_string()))
            .bind(("updated_at", Utc::now()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(plan) = input.plan {
            builder = builder.bind(("plan", plan));
        }
        if let Some(modules) = input.modules {
            builder = builder.bind(("modules", modules));
        }
        if let Some(features) = input.features {
            builder = builder.bind(("features", features));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<Tenant> = result.take(0).map_err(DbError::from)?;

        Ok(rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id.to_string(),
        })?)
    }
}
