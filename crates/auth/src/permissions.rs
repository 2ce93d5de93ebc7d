use serde::{Deserialize, Serialize};

use crate::Role;

/// Actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create sales from the seller app.
    Sell,
    /// Create and edit products, categories and suppliers.
    ManageCatalog,
    ManageWarehouses,
    TransferStock,
    /// Invite users, change roles and commissions.
    ManageUsers,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Sell => "sell",
            Permission::ManageCatalog => "manage_catalog",
            Permission::ManageWarehouses => "manage_warehouses",
            Permission::TransferStock => "transfer_stock",
            Permission::ManageUsers => "manage_users",
        }
    }

    pub fn granted_to(self, role: Role) -> bool {
        match role {
            Role::Admin => true,
            Role::Seller => matches!(self, Permission::Sell),
        }
    }
}
