use crate::domain::category::{Category, CategoryRef};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name.into(),
            slug: category.slug.into(),
        }
    }
}

/// Embedded `{id, name}` reference on articles and videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRefDto {
    pub id: i64,
    pub name: String,
}

impl From<CategoryRef> for CategoryRefDto {
    fn from(value: CategoryRef) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
        }
    }
}
