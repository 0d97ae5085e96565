//! Database-layer errors and their mapping into the workspace taxonomy.

use gearbase_core::error::GearbaseError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for GearbaseError {
    fn from(err: DbError) -> Self {
        match err {
            // Feeds the merged not-found-or-forbidden kind the callers
            // branch on.
            DbError::NotFound { entity, id } => GearbaseError::NotFound { entity, id },
            // A broken schema is an operator problem, not a store fault
            // the caller could retry around.
            DbError::Migration(message) => GearbaseError::Internal(message),
            surreal @ DbError::Surreal(_) => GearbaseError::Database(surreal.to_string()),
        }
    }
}
