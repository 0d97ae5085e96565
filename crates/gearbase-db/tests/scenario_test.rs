//! End-to-end walkthrough: a staff member of a Basic-plan workshop signs
//! in, gets resolved into their tenant, and works against the policy and
//! quota layers backed by a real in-memory store.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

use gearbase_authz::modules::module_access;
use gearbase_authz::quota::{self, UsageState};
use gearbase_authz::resolver::TenantResolver;
use gearbase_core::models::plan::{Module, PlanTier, ResourceKind};
use gearbase_core::models::records::Client;
use gearbase_core::models::role::{Permission, Role};
use gearbase_core::models::tenant::CreateTenant;
use gearbase_core::models::user::{Membership, User};
use gearbase_core::store::{ScopedRepository, TenantDirectory, TenantStore};
use gearbase_db::{ScopedCollection, SurrealTenantStore, run_migrations};

async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("in-memory engine");
    db.use_ns("test").use_db("test").await.expect("select ns/db");
    run_migrations(&db).await.expect("migrations");
    db
}

#[tokio::test]
async fn staff_member_works_a_basic_plan_workshop() {
    let db = setup().await;
    let store = SurrealTenantStore::new(db.clone());

    let workshop = store
        .create(CreateTenant {
            name: "Moto Works".into(),
            plan: PlanTier::Basic,
            modules: None,
            features: None,
        })
        .await
        .unwrap();

    // Basic includes the operational modules and nothing above its tier.
    let expected: Vec<Module> = vec![
        Module::Clients,
        Module::Vehicles,
        Module::Schedule,
        Module::Quotes,
        Module::Jobs,
    ];
    assert_eq!(workshop.config.modules.len(), expected.len());
    for module in expected {
        assert!(workshop.config.modules.contains(&module));
    }
    assert_eq!(workshop.counter(ResourceKind::Clients).unwrap().max, 50);

    let staff = User {
        id: Uuid::new_v4(),
        email: "mechanic@motoworks.example".into(),
        display_name: "Sam".into(),
        is_super_admin: false,
        memberships: vec![Membership {
            tenant_id: workshop.id,
            role: Role::Staff,
            joined_at: Utc::now(),
            invited_by: None,
        }],
    };

    let resolver = TenantResolver::new(store.clone());
    let ctx = resolver
        .resolve(&staff, None)
        .await
        .unwrap()
        .expect("staff lands in their only workshop");
    assert_eq!(ctx.tenant.id, workshop.id);

    // Staff can run the day-to-day but cannot destroy client records.
    assert!(ctx.can(Permission::ManageClients));
    assert!(!ctx.can(Permission::DeleteClients));

    // Inventory is a Premium module; the denial carries the upgrade target.
    let inventory = module_access(Some(&ctx.tenant), Module::Inventory);
    assert!(!inventory.allowed);
    assert_eq!(inventory.required_plan, PlanTier::Premium);

    let clients: ScopedCollection<Db, Client> = ScopedCollection::new(db.clone());
    for i in 0..39 {
        clients
            .create(workshop.id, Client::new(workshop.id, format!("client {i}")))
            .await
            .unwrap();
    }

    let counter = store
        .get_tenant(workshop.id)
        .await
        .unwrap()
        .counter(ResourceKind::Clients)
        .unwrap();
    let status = quota::evaluate(ResourceKind::Clients, counter.current, counter.max);
    assert_eq!(status.state, UsageState::Normal);

    // The 40th client lands exactly on the inclusive 80% line and starts
    // the warning banner.
    clients
        .create(workshop.id, Client::new(workshop.id, "client 39"))
        .await
        .unwrap();
    let counter = store
        .get_tenant(workshop.id)
        .await
        .unwrap()
        .counter(ResourceKind::Clients)
        .unwrap();
    let status = quota::evaluate(ResourceKind::Clients, counter.current, counter.max);
    assert_eq!(status.state, UsageState::Warning);
    assert!((status.percent - 80.0).abs() < f64::EPSILON);
    assert_eq!(status.display_percent(), 80.0);
}
