use crate::configuration::{DatabaseSettings, DatabaseType};
use crate::db::errors::DBError;
use crate::db::in_memory::InMemoryDB;
use crate::db::relational::RelationalDB;
use crate::db::{Category, ListingSummary};
use crate::errors::AppErrors;
use crate::search::{ListingQuery, PageWindow, Predicate};
use sea_orm::Database as SeaOrmDB;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

#[derive(Debug)]
pub enum Database {
    InMemory(Box<InMemoryDB>),
    Relational(RelationalDB),
}

impl Database {
    pub async fn try_from(settings: &DatabaseSettings) -> Result<Self, AppErrors> {
        settings.check_if_valid()?;
        match settings.db_type {
            DatabaseType::InMemory => {
                let file_path = settings.path_unchecked();
                info!("loading in-memory catalogue from {file_path}");
                let db = InMemoryDB::try_from(file_path)?;
                Ok(Self::InMemory(Box::new(db)))
            }
            DatabaseType::Relational => {
                let connection_settings = settings.relational_connection_unchecked();
                let connection = SeaOrmDB::connect(connection_settings)
                    .await
                    .map_err(|e| AppErrors::DatabaseError(DBError::Relational(e)))?;
                info!("connected to relational database");
                let db = RelationalDB::init(connection);
                Ok(Self::Relational(db))
            }
        }
    }

    pub async fn find_category_id(&self, value: &str) -> Result<Option<Uuid>, DBError> {
        match self {
            Database::InMemory(db) => db.find_category_id(value),
            Database::Relational(db) => db.find_category_id(value).await,
        }
    }

    pub async fn search_listings(
        &self,
        query: &ListingQuery,
        window: PageWindow,
    ) -> Result<Vec<ListingSummary>, DBError> {
        match self {
            Database::InMemory(db) => db.search_listings(query, window),
            Database::Relational(db) => db.search_listings(query, window).await,
        }
    }

    pub async fn count_listings(&self, predicates: &[Predicate]) -> Result<u64, DBError> {
        match self {
            Database::InMemory(db) => db.count_listings(predicates),
            Database::Relational(db) => db.count_listings(predicates).await,
        }
    }

    pub async fn active_categories(&self) -> Result<Vec<Category>, DBError> {
        match self {
            Database::InMemory(db) => db.active_categories(),
            Database::Relational(db) => db.active_categories().await,
        }
    }

    pub async fn navigation_categories(&self) -> Result<Vec<Category>, DBError> {
        match self {
            Database::InMemory(db) => db.navigation_categories(),
            Database::Relational(db) => db.navigation_categories().await,
        }
    }

    pub async fn listing_counts(&self, category_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DBError> {
        match self {
            Database::InMemory(db) => db.listing_counts(category_ids),
            Database::Relational(db) => db.listing_counts(category_ids).await,
        }
    }

    pub async fn brand_sample(&self, limit: u64) -> Result<Vec<String>, DBError> {
        match self {
            Database::InMemory(db) => db.brand_sample(limit),
            Database::Relational(db) => db.brand_sample(limit).await,
        }
    }
}
