//! User and company types.

use pos_commerce::ids::{CompanyId, UserId};
use pos_commerce::search::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Cashier,
    Warehouse,
    Accountant,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
            Role::Warehouse => "warehouse",
            Role::Accountant => "accountant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Cashier => "Cajero",
            Role::Warehouse => "Almacén",
            Role::Accountant => "Contador",
        }
    }

    /// Permissions a new user with this role starts with.
    pub fn default_permissions(&self) -> Vec<String> {
        let perms: &[&str] = match self {
            Role::Admin => &["all"],
            Role::Cashier => &["pos", "sales_view"],
            Role::Warehouse => &["inventory", "products"],
            Role::Accountant => &["finances", "reports"],
        };
        perms.iter().map(|p| p.to_string()).collect()
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "cashier" => Ok(Role::Cashier),
            "warehouse" => Ok(Role::Warehouse),
            "accountant" => Ok(Role::Accountant),
            _ => Err(()),
        }
    }
}

/// A staff user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Permission tags; "all" grants everything.
    #[serde(default)]
    pub permissions: Vec<String>,
    pub company_id: CompanyId,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        company_id: impl Into<CompanyId>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
            permissions: role.default_permissions(),
            company_id: company_id.into(),
            is_active: true,
        }
    }

    /// Check if the user holds `permission`, directly or through "all".
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == "all" || p == permission)
    }
}

impl Record for User {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "email" => Some(FieldValue::text(&self.email)),
            "name" => Some(FieldValue::text(&self.name)),
            "role" => Some(FieldValue::text(self.role.as_str())),
            "company_id" => Some(FieldValue::text(self.company_id.as_str())),
            "active" => Some(self.is_active.into()),
            _ => None,
        }
    }
}

/// Staff headline counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UserCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub admins: usize,
}

pub fn user_counts(users: &[User]) -> UserCounts {
    users.iter().fold(
        UserCounts {
            total: users.len(),
            ..UserCounts::default()
        },
        |mut counts, user| {
            if user.is_active {
                counts.active += 1;
            } else {
                counts.inactive += 1;
            }
            if user.role == Role::Admin {
                counts.admins += 1;
            }
            counts
        },
    )
}

/// The business the point of sale is operating for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// Taxpayer registry code.
    pub rfc: String,
    pub address: String,
    pub tax_regime: String,
}
