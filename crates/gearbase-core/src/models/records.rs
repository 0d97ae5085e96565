//! Tenant-owned records: clients, vehicles, products, jobs, cash
//! movements, and appointments.
//!
//! Every record carries an immutable `tenant_id` set at creation. Records
//! are only ever visible or mutable through the repository guard, scoped
//! to their own tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::plan::ResourceKind;
use crate::store::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "entity_id", with = "crate::models::uuid_string")]
    pub id: Uuid,
    #[serde(with = "crate::models::uuid_string")]
    pub tenant_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(tenant_id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.into(),
            phone: None,
            email: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Client {
    const COLLECTION: &'static str = "client";
    const QUOTA: Option<ResourceKind> = Some(ResourceKind::Clients);

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "entity_id", with = "crate::models::uuid_string")]
    pub id: Uuid,
    #[serde(with = "crate::models::uuid_string")]
    pub tenant_id: Uuid,
    pub client_id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: Option<u16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        tenant_id: Uuid,
        client_id: Uuid,
        plate: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            client_id,
            plate: plate.into(),
            make: make.into(),
            model: model.into(),
            year: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Vehicle {
    const COLLECTION: &'static str = "vehicle";
    const QUOTA: Option<ResourceKind> = Some(ResourceKind::Vehicles);

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "entity_id", with = "crate::models::uuid_string")]
    pub id: Uuid,
    #[serde(with = "crate::models::uuid_string")]
    pub tenant_id: Uuid,
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        tenant_id: Uuid,
        name: impl Into<String>,
        sku: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.into(),
            sku: sku.into(),
            price_cents,
            stock: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Product {
    const COLLECTION: &'static str = "product";
    const QUOTA: Option<ResourceKind> = Some(ResourceKind::Products);

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    InProgress,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "entity_id", with = "crate::models::uuid_string")]
    pub id: Uuid,
    #[serde(with = "crate::models::uuid_string")]
    pub tenant_id: Uuid,
    pub client_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub title: String,
    pub status: JobStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(tenant_id: Uuid, client_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            client_id,
            vehicle_id: None,
            title: title.into(),
            status: JobStatus::Pending,
            scheduled_for: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Job {
    const COLLECTION: &'static str = "job";
    const QUOTA: Option<ResourceKind> = Some(ResourceKind::Jobs);

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashMovementKind {
    Income,
    Expense,
}

/// A ledger entry. The ledger is unbounded, so cash movements carry no
/// resource quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovement {
    #[serde(rename = "entity_id", with = "crate::models::uuid_string")]
    pub id: Uuid,
    #[serde(with = "crate::models::uuid_string")]
    pub tenant_id: Uuid,
    pub kind: CashMovementKind,
    pub amount_cents: i64,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl CashMovement {
    pub fn new(
        tenant_id: Uuid,
        kind: CashMovementKind,
        amount_cents: i64,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            kind,
            amount_cents,
            description: description.into(),
            occurred_at,
            created_at: Utc::now(),
        }
    }
}

impl Document for CashMovement {
    const COLLECTION: &'static str = "cash_movement";
    const QUOTA: Option<ResourceKind> = None;

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "entity_id", with = "crate::models::uuid_string")]
    pub id: Uuid,
    #[serde(with = "crate::models::uuid_string")]
    pub tenant_id: Uuid,
    pub client_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        tenant_id: Uuid,
        client_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            client_id,
            starts_at,
            ends_at,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Appointment {
    const COLLECTION: &'static str = "appointment";
    const QUOTA: Option<ResourceKind> = Some(ResourceKind::Appointments);

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}
