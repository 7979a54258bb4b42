use crate::validation::creatable_slug;
use serde::Deserialize;
use validator::{Validate, ValidationError};

entity_id!(ParentCategoryId, "parent_category");
entity_id!(ChildCategoryId, "child_category");

/// Top-level catalog section ("Men", "Electronics").
#[derive(Debug, Clone, PartialEq)]
pub struct ParentCategory {
    pub id: ParentCategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "parent_slug"))]
pub struct ParentCategoryCreate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ParentCategoryUpdate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validation::usable_slug"), length(max = 255))]
    pub slug: Option<String>,
}

/// Category products are filed under. Belongs to one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildCategory {
    pub id: ChildCategoryId,
    pub parent_category_id: ParentCategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "child_slug"))]
pub struct ChildCategoryCreate {
    pub parent_category_id: ParentCategoryId,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChildCategoryUpdate {
    pub parent_category_id: Option<ParentCategoryId>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validation::usable_slug"), length(max = 255))]
    pub slug: Option<String>,
}

fn parent_slug(payload: &ParentCategoryCreate) -> Result<(), ValidationError> {
    creatable_slug(&payload.name, payload.slug.as_deref())
}

fn child_slug(payload: &ChildCategoryCreate) -> Result<(), ValidationError> {
    creatable_slug(&payload.name, payload.slug.as_deref())
}
