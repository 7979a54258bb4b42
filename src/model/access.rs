//! Roles and permissions.
//!
//! Permission names follow `admin_{view|create|edit|delete}_{scope}`, e.g.
//! `admin_edit_products`. A user holds every permission of every role assigned to it.

use serde::Deserialize;
use validator::Validate;

entity_id!(PermissionId, "permission");
entity_id!(RoleId, "role");

/// Name of the role that is granted every permission at startup.
pub const ADMIN_ROLE: &str = "admin";

/// Permission scopes, one per admin section.
pub const SCOPES: &[&str] = &[
    "users",
    "addresses",
    "roles",
    "permissions",
    "categories",
    "products",
    "product_images",
    "reviews",
    "orders",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    View,
    Create,
    Edit,
    Delete,
}

impl Ability {
    pub const ALL: [Ability; 4] = [Ability::View, Ability::Create, Ability::Edit, Ability::Delete];

    fn verb(self) -> &'static str {
        match self {
            Ability::View => "view",
            Ability::Create => "create",
            Ability::Edit => "edit",
            Ability::Delete => "delete",
        }
    }
}

/// `admin_edit_products` for `(Ability::Edit, "products")`.
pub fn permission_name(ability: Ability, scope: &str) -> String {
    format!("admin_{}_{scope}", ability.verb())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PermissionCreate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PermissionUpdate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub permission_ids: Vec<PermissionId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoleCreate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: String,
    #[serde(default)]
    pub permission_ids: Vec<PermissionId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RoleUpdate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: Option<String>,
    pub permission_ids: Option<Vec<PermissionId>>,
}

/// Removes repeated ids, keeping first occurrences in order.
pub(crate) fn dedup_ids<I: PartialEq + Copy>(ids: &mut Vec<I>) {
    let mut seen = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });
}
