pub mod entities;

use entities::{prelude::*, *};
use sea_orm::sea_query::extension::postgres::{PgExpr, PgFunc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::db::errors::DBError;
use crate::db::{Category, CategorySummary, ListingSummary, Seller, ACTIVE_STATUS};
use crate::search::search_text::contains_pattern;
use crate::search::{Direction, ListingQuery, PageWindow, Predicate, SearchText, SortKey};

/// Largest offset or limit Postgres accepts as a `bigint`.
const MAX_ROWS: u64 = i64::MAX as u64;

#[derive(Debug, Default)]
pub struct RelationalDB {
    pub connection: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct BrandRow {
    brand: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct CategoryCountRow {
    category_id: Uuid,
    product_count: i64,
}

impl RelationalDB {
    pub fn init(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Looks a category up by exact slug or by name fragment. At most two
    /// rows are fetched: one means resolved, none or several mean unresolved.
    pub async fn find_category_id(&self, value: &str) -> Result<Option<Uuid>, DBError> {
        let matches = category_lookup(value).all(&self.connection).await?;
        Ok(match matches.as_slice() {
            [only] => Some(only.id),
            _ => None,
        })
    }

    pub async fn search_listings(
        &self,
        query: &ListingQuery,
        window: PageWindow,
    ) -> Result<Vec<ListingSummary>, DBError> {
        let listings = page_select(query, window).all(&self.connection).await?;
        self.join_relations(listings).await
    }

    /// Loads the sellers and categories of a page in one query each and
    /// attaches them to the listings.
    async fn join_relations(
        &self,
        listings: Vec<listing::Model>,
    ) -> Result<Vec<ListingSummary>, DBError> {
        if listings.is_empty() {
            return Ok(vec![]);
        }
        let seller_ids: BTreeSet<Uuid> = listings.iter().map(|listing| listing.seller_id).collect();
        let category_ids: BTreeSet<Uuid> = listings.iter().map(|listing| listing.category_id).collect();

        let sellers: HashMap<Uuid, Seller> = Profiles::find()
            .filter(profile::Column::Id.is_in(seller_ids))
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|profile| (profile.id, Seller::from(profile)))
            .collect();
        let categories: HashMap<Uuid, CategorySummary> = Categories::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|category| (category.id, CategorySummary::from(&Category::from(category))))
            .collect();

        Ok(listings
            .into_iter()
            .map(|model| {
                let seller = sellers.get(&model.seller_id).cloned();
                let category = categories.get(&model.category_id).cloned();
                ListingSummary::from(model).joined(seller, category)
            })
            .collect())
    }

    pub async fn count_listings(&self, predicates: &[Predicate]) -> Result<u64, DBError> {
        let count = filtered(predicates).count(&self.connection).await?;
        Ok(count)
    }

    pub async fn active_categories(&self) -> Result<Vec<Category>, DBError> {
        let categories = Categories::find()
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Name)
            .all(&self.connection)
            .await?;
        Ok(categories.into_iter().map(Category::from).collect())
    }

    pub async fn navigation_categories(&self) -> Result<Vec<Category>, DBError> {
        let categories = Categories::find()
            .filter(category::Column::IsActive.eq(true))
            .filter(category::Column::ParentId.is_null())
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Name)
            .all(&self.connection)
            .await?;
        Ok(categories.into_iter().map(Category::from).collect())
    }

    /// Listings of any status per primary category.
    pub async fn listing_counts(&self, category_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DBError> {
        if category_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Listings::find()
            .select_only()
            .column(listing::Column::CategoryId)
            .column_as(Expr::col((Listings, listing::Column::Id)).count(), "product_count")
            .filter(listing::Column::CategoryId.is_in(category_ids.iter().copied()))
            .group_by(listing::Column::CategoryId)
            .into_model::<CategoryCountRow>()
            .all(&self.connection)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.category_id, u64::try_from(row.product_count).unwrap_or_default()))
            .collect())
    }

    pub async fn brand_sample(&self, limit: u64) -> Result<Vec<String>, DBError> {
        let rows = Listings::find()
            .select_only()
            .column(listing::Column::Brand)
            .filter(listing::Column::Status.eq(ACTIVE_STATUS))
            .filter(listing::Column::Brand.is_not_null())
            .limit(limit.min(MAX_ROWS))
            .into_model::<BrandRow>()
            .all(&self.connection)
            .await?;
        Ok(rows.into_iter().filter_map(|row| row.brand).collect())
    }
}

/// Categories whose slug is `value` or whose name contains it. Two rows are
/// enough to tell a unique match from an ambiguous one.
pub fn category_lookup(value: &str) -> Select<category::Entity> {
    Categories::find()
        .filter(
            Condition::any()
                .add(category::Column::Slug.eq(value))
                .add(Expr::col((Categories, category::Column::Name)).ilike(contains_pattern(value))),
        )
        .limit(2)
}

/// Listings matching every predicate, unordered and unpaginated.
pub fn filtered(predicates: &[Predicate]) -> Select<listing::Entity> {
    predicates
        .iter()
        .fold(Listings::find(), |select, predicate| select.filter(condition_for(predicate)))
}

pub fn page_select(query: &ListingQuery, window: PageWindow) -> Select<listing::Entity> {
    let column = match query.order.key {
        SortKey::Price => listing::Column::Price,
        SortKey::ViewCount => listing::Column::ViewCount,
        SortKey::FavoriteCount => listing::Column::FavoriteCount,
        SortKey::CreatedAt => listing::Column::CreatedAt,
    };
    let order = match query.order.direction {
        Direction::Ascending => Order::Asc,
        Direction::Descending => Order::Desc,
    };
    filtered(&query.predicates)
        .order_by(column, order)
        .offset(window.offset.min(MAX_ROWS))
        .limit(window.limit.min(MAX_ROWS))
}

fn condition_for(predicate: &Predicate) -> Condition {
    let condition = Condition::all();
    match predicate {
        Predicate::Active => condition.add(listing::Column::Status.eq(ACTIVE_STATUS)),
        Predicate::Category(id) => condition.add(listing::Column::CategoryId.eq(*id)),
        Predicate::Subcategory(id) => condition.add(listing::Column::SubcategoryId.eq(*id)),
        Predicate::Text(text) => text_condition(text),
        Predicate::MinPrice(min) => condition.add(listing::Column::Price.gte(*min)),
        Predicate::MaxPrice(max) => condition.add(listing::Column::Price.lte(*max)),
        Predicate::SizeIn(sizes) => condition.add(listing::Column::Size.is_in(sizes.iter().cloned())),
        Predicate::BrandIn(brands) => condition.add(listing::Column::Brand.is_in(brands.iter().cloned())),
        Predicate::ConditionIn(conditions) => {
            condition.add(listing::Column::Condition.is_in(conditions.iter().cloned()))
        }
    }
}

/// Full-text match of any token in title or description, or the raw text
/// as a case-insensitive substring of brand, title or description.
fn text_condition(text: &SearchText) -> Condition {
    let mut condition = Condition::any();
    if let Some(query) = text.text_query() {
        for column in [listing::Column::Title, listing::Column::Description] {
            condition = condition.add(
                Expr::expr(PgFunc::to_tsvector(Expr::col((Listings, column)), None))
                    .matches(PgFunc::to_tsquery(Expr::val(query.clone()), None)),
            );
        }
    }
    let pattern = text.like_pattern();
    condition
        .add(Expr::col((Listings, listing::Column::Brand)).ilike(pattern.clone()))
        .add(Expr::col((Listings, listing::Column::Title)).ilike(pattern.clone()))
        .add(Expr::col((Listings, listing::Column::Description)).ilike(pattern))
}
