use crate::db::relational::entities;
use crate::db::{CategorySummary, Seller};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status value of listings that are visible to buyers.
pub const ACTIVE_STATUS: &str = "active";

/// A listing row as stored in the datastore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: String,
    pub status: String,
    #[serde(default)]
    pub images: Vec<serde_json::Value>,
    pub location: Option<String>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub favorite_count: i64,
    #[serde(default)]
    pub is_negotiable: bool,
    #[serde(default)]
    pub shipping_included: bool,
    pub shipping_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Listing {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// What browse endpoints return for a listing: the full row minus its status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSummary {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: String,
    pub images: Vec<serde_json::Value>,
    pub location: Option<String>,
    pub view_count: i64,
    pub favorite_count: i64,
    pub is_negotiable: bool,
    pub shipping_included: bool,
    pub shipping_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub seller: Option<Seller>,
    pub category: Option<CategorySummary>,
}

impl ListingSummary {
    /// Attaches the seller and category rows looked up for this listing.
    pub fn joined(mut self, seller: Option<Seller>, category: Option<CategorySummary>) -> Self {
        self.seller = seller;
        self.category = category;
        self
    }
}

impl From<&Listing> for ListingSummary {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            seller_id: listing.seller_id,
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            currency: listing.currency.clone(),
            category_id: listing.category_id,
            subcategory_id: listing.subcategory_id,
            brand: listing.brand.clone(),
            size: listing.size.clone(),
            condition: listing.condition.clone(),
            images: listing.images.clone(),
            location: listing.location.clone(),
            view_count: listing.view_count,
            favorite_count: listing.favorite_count,
            is_negotiable: listing.is_negotiable,
            shipping_included: listing.shipping_included,
            shipping_cost: listing.shipping_cost,
            created_at: listing.created_at,
            seller: None,
            category: None,
        }
    }
}

impl From<entities::listing::Model> for ListingSummary {
    fn from(model: entities::listing::Model) -> Self {
        let images = match model.images {
            serde_json::Value::Array(images) => images,
            _ => vec![],
        };
        Self {
            id: model.id,
            seller_id: model.seller_id,
            title: model.title,
            description: model.description,
            price: model.price.to_f64().unwrap_or_default(),
            currency: model.currency,
            category_id: model.category_id,
            subcategory_id: model.subcategory_id,
            brand: model.brand,
            size: model.size,
            condition: model.condition,
            images,
            location: model.location,
            view_count: model.view_count.into(),
            favorite_count: model.favorite_count.into(),
            is_negotiable: model.is_negotiable,
            shipping_included: model.shipping_included,
            shipping_cost: model.shipping_cost.and_then(|cost| cost.to_f64()),
            created_at: model.created_at.with_timezone(&Utc),
            seller: None,
            category: None,
        }
    }
}
