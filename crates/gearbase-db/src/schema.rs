//! Schema definitions and migration runner for SurrealDB.
//!
//! Tenant-owned collections are SCHEMALESS apart from the `tenant_id`
//! scoping field: the guard treats documents as opaque. Domain ids are
//! stored under `entity_id` (the engine's `id` is its own record id) and
//! timestamps as RFC 3339 strings, which order correctly as text.

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Tenants (global scope)
-- =======================================================================
DEFINE TABLE tenant SCHEMALESS;
DEFINE FIELD entity_id ON TABLE tenant TYPE string;
DEFINE FIELD name ON TABLE tenant TYPE string;
DEFINE FIELD plan ON TABLE tenant TYPE string \
    ASSERT $value IN ['TRIAL', 'BASIC', 'PREMIUM', 'ENTERPRISE'];
DEFINE INDEX idx_tenant_entity ON TABLE tenant COLUMNS entity_id UNIQUE;

-- =======================================================================
-- Clients (tenant scope)
-- =======================================================================
DEFINE TABLE client SCHEMALESS;
DEFINE FIELD tenant_id ON TABLE client TYPE string;
DEFINE INDEX idx_client_scope ON TABLE client \
    COLUMNS tenant_id, entity_id UNIQUE;
DEFINE INDEX idx_client_tenant ON TABLE client COLUMNS tenant_id;

-- =======================================================================
-- Vehicles (tenant scope)
-- =======================================================================
DEFINE TABLE vehicle SCHEMALESS;
DEFINE FIELD tenant_id ON TABLE vehicle TYPE string;
DEFINE INDEX idx_vehicle_scope ON TABLE vehicle \
    COLUMNS tenant_id, entity_id UNIQUE;
DEFINE INDEX idx_vehicle_tenant ON TABLE vehicle COLUMNS tenant_id;

-- =======================================================================
-- Products (tenant scope)
-- =======================================================================
DEFINE TABLE product SCHEMALESS;
DEFINE FIELD tenant_id ON TABLE product TYPE string;
DEFINE INDEX idx_product_scope ON TABLE product \
    COLUMNS tenant_id, entity_id UNIQUE;
DEFINE INDEX idx_product_tenant ON TABLE product COLUMNS tenant_id;

-- =======================================================================
-- Jobs (tenant scope)
-- =======================================================================
DEFINE TABLE job SCHEMALESS;
DEFINE FIELD tenant_id ON TABLE job TYPE string;
DEFINE INDEX idx_job_scope ON TABLE job \
    COLUMNS tenant_id, entity_id UNIQUE;
DEFINE INDEX idx_job_tenant ON TABLE job COLUMNS tenant_id;

-- =======================================================================
-- Cash movements (tenant scope, append-heavy ledger)
-- =======================================================================
DEFINE TABLE cash_movement SCHEMALESS;
DEFINE FIELD tenant_id ON TABLE cash_movement TYPE string;
DEFINE INDEX idx_cash_scope ON TABLE cash_movement \
    COLUMNS tenant_id, entity_id UNIQUE;
DEFINE INDEX idx_cash_tenant_time ON TABLE cash_movement \
    COLUMNS tenant_id, occurred_at;

-- =======================================================================
-- Appointments (tenant scope)
-- =======================================================================
DEFINE TABLE appointment SCHEMALESS;
DEFINE FIELD tenant_id ON TABLE appointment TYPE string;
DEFINE INDEX idx_appointment_scope ON TABLE appointment \
    COLUMNS tenant_id, entity_id UNIQUE;
DEFINE INDEX idx_appointment_tenant ON TABLE appointment COLUMNS tenant_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies each
/// migration whose version exceeds the current maximum. All DEFINE
/// statements are idempotent so re-running is safe.
///
/// # Errors
///
/// Returns [`DbError::Migration`] when a statement is rejected.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Migration(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;

            info!(version = migration.version, "Migration applied");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_every_guarded_collection() {
        for table in [
            "tenant",
            "client",
            "vehicle",
            "product",
            "job",
            "cash_movement",
            "appointment",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} ")),
                "missing table definition for {table}",
            );
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
