//! Gearbase Core — domain models, error taxonomy, and the trait seams
//! to the external document store and identity provider.
//!
//! This crate has no I/O of its own. The decision engine lives in
//! `gearbase-authz`; the SurrealDB-backed repository guard lives in
//! `gearbase-db`.

pub mod error;
pub mod identity;
pub mod models;
pub mod store;

pub use error::{GearbaseError, GearbaseResult};
