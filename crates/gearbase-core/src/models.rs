//! Domain models.

pub mod plan;
pub mod records;
pub mod role;
pub mod tenant;
pub mod user;

/// Serde adapter for UUID fields persisted to the document store. The
/// store's value serializer is not human-readable, so `uuid::Uuid` would
/// otherwise travel as raw bytes; the schema and every scoping query
/// expect the canonical hyphenated string form.
pub mod uuid_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Uuid>().map_err(D::Error::custom)
    }
}
