//! Gearbase DB — SurrealDB connection management, schema migrations, and
//! the tenant-scoped repository guard.
//!
//! Every read and write against a tenant-owned collection goes through
//! [`ScopedCollection`], the single enforcement point for tenant isolation
//! and quota gating. Repositories are generic over the SurrealDB
//! connection type so tests run against the in-memory engine.

mod connection;
mod error;
mod guard;
mod schema;
mod tenant;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use guard::ScopedCollection;
pub use schema::run_migrations;
pub use tenant::SurrealTenantStore;
