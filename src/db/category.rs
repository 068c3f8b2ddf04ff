use crate::db::relational::entities;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Category {
    /// Whether `value` names this category, either as its exact slug or as a
    /// case-insensitive fragment of its display name.
    pub fn answers_to(&self, value: &str) -> bool {
        self.slug == value || self.name.to_lowercase().contains(&value.to_lowercase())
    }
}

/// The slice of a category embedded in each listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            icon_url: category.icon_url.clone(),
        }
    }
}

/// Navigation entry on the home feed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: u64,
}

impl From<entities::category::Model> for Category {
    fn from(category: entities::category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            icon_url: category.icon_url,
            parent_id: category.parent_id,
            sort_order: category.sort_order,
            is_active: category.is_active,
        }
    }
}
