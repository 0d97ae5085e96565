//! Roles and the static role→permission grant table.

use serde::{Deserialize, Serialize};

/// Fine-grained capability checked against a user's role within a tenant.
/// The set is closed: permissions are never combined into new ones at
/// runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewClients,
    ManageClients,
    DeleteClients,
    ViewVehicles,
    ManageVehicles,
    ViewSchedule,
    ManageSchedule,
    ViewQuotes,
    ManageQuotes,
    ViewJobs,
    ManageJobs,
    ViewInventory,
    ManageInventory,
    ViewInvoices,
    ManageInvoices,
    ViewCash,
    ManageCash,
    ViewReports,
    ManageTeam,
    ManageBilling,
}

impl Permission {
    pub const ALL: [Permission; 20] = [
        Permission::ViewClients,
        Permission::ManageClients,
        Permission::DeleteClients,
        Permission::ViewVehicles,
        Permission::ManageVehicles,
        Permission::ViewSchedule,
        Permission::ManageSchedule,
        Permission::ViewQuotes,
        Permission::ManageQuotes,
        Permission::ViewJobs,
        Permission::ManageJobs,
        Permission::ViewInventory,
        Permission::ManageInventory,
        Permission::ViewInvoices,
        Permission::ManageInvoices,
        Permission::ViewCash,
        Permission::ManageCash,
        Permission::ViewReports,
        Permission::ManageTeam,
        Permission::ManageBilling,
    ];
}

/// Role within a tenant. Each role owns a fixed grant set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Admin,
    Staff,
    Viewer,
}

const OWNER_GRANTS: &[Permission] = &Permission::ALL;

const ADMIN_GRANTS: &[Permission] = &[
    Permission::ViewClients,
    Permission::ManageClients,
    Permission::DeleteClients,
    Permission::ViewVehicles,
    Permission::ManageVehicles,
    Permission::ViewSchedule,
    Permission::ManageSchedule,
    Permission::ViewQuotes,
    Permission::ManageQuotes,
    Permission::ViewJobs,
    Permission::ManageJobs,
    Permission::ViewInventory,
    Permission::ManageInventory,
    Permission::ViewInvoices,
    Permission::ManageInvoices,
    Permission::ViewCash,
    Permission::ManageCash,
    Permission::ViewReports,
    Permission::ManageTeam,
];

const STAFF_GRANTS: &[Permission] = &[
    Permission::ViewClients,
    Permission::ManageClients,
    Permission::ViewVehicles,
    Permission::ManageVehicles,
    Permission::ViewSchedule,
    Permission::ManageSchedule,
    Permission::ViewQuotes,
    Permission::ManageQuotes,
    Permission::ViewJobs,
    Permission::ManageJobs,
    Permission::ViewInventory,
];

const VIEWER_GRANTS: &[Permission] = &[
    Permission::ViewClients,
    Permission::ViewVehicles,
    Permission::ViewSchedule,
    Permission::ViewQuotes,
    Permission::ViewJobs,
    Permission::ViewInventory,
    Permission::ViewInvoices,
];

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Admin, Role::Staff, Role::Viewer];

    /// The role's grant set.
    pub fn grants(self) -> &'static [Permission] {
        match self {
            Role::Owner => OWNER_GRANTS,
            Role::Admin => ADMIN_GRANTS,
            Role::Staff => STAFF_GRANTS,
            Role::Viewer => VIEWER_GRANTS,
        }
    }

    pub fn has_grant(self, permission: Permission) -> bool {
        self.grants().contains(&permission)
    }
}
