use crate::search::filter_params::{FilterParameters, SortBy};
use crate::search::search_text::SearchText;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Category ids found for the `category` and `subcategory` parameters.
/// A `None` means the lookup missed and the filter is dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCategories {
    pub category: Option<Uuid>,
    pub subcategory: Option<Uuid>,
}

/// A single condition a listing has to satisfy. A query is the conjunction
/// of its predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Active,
    Category(Uuid),
    Subcategory(Uuid),
    /// Full-text match of any token against title or description, or a
    /// case-insensitive substring match against brand, title or description.
    Text(SearchText),
    MinPrice(f64),
    MaxPrice(f64),
    SizeIn(BTreeSet<String>),
    BrandIn(BTreeSet<String>),
    ConditionIn(BTreeSet<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    ViewCount,
    FavoriteCount,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering of a result page. There is no secondary key: ties keep the
/// datastore's natural row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOrder {
    pub key: SortKey,
    pub direction: Direction,
}

impl From<SortBy> for ListingOrder {
    fn from(sort_by: SortBy) -> Self {
        let (key, direction) = match sort_by {
            SortBy::PriceLow => (SortKey::Price, Direction::Ascending),
            SortBy::PriceHigh => (SortKey::Price, Direction::Descending),
            SortBy::Popular => (SortKey::ViewCount, Direction::Descending),
            SortBy::Liked => (SortKey::FavoriteCount, Direction::Descending),
            SortBy::Recent => (SortKey::CreatedAt, Direction::Descending),
        };
        Self { key, direction }
    }
}

/// Predicates plus ordering for the page query. The count query uses
/// `predicates` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub predicates: Vec<Predicate>,
    pub order: ListingOrder,
}

impl ListingQuery {
    pub fn build(filters: &FilterParameters, resolved: ResolvedCategories) -> Self {
        Self {
            predicates: build_predicates(filters, resolved),
            order: filters.sort_by.into(),
        }
    }
}

/// Turns filters into predicates, always in the same order: status,
/// category, subcategory, text, price bounds, then size, brand and
/// condition sets. Empty sets add nothing.
pub fn build_predicates(filters: &FilterParameters, resolved: ResolvedCategories) -> Vec<Predicate> {
    let mut predicates = vec![Predicate::Active];

    if let Some(id) = resolved.category {
        predicates.push(Predicate::Category(id));
    }
    if let Some(id) = resolved.subcategory {
        predicates.push(Predicate::Subcategory(id));
    }
    if let Some(search) = &filters.search {
        predicates.push(Predicate::Text(search.clone()));
    }
    if let Some(min_price) = filters.min_price {
        predicates.push(Predicate::MinPrice(min_price));
    }
    if let Some(max_price) = filters.max_price {
        predicates.push(Predicate::MaxPrice(max_price));
    }
    if !filters.sizes.is_empty() {
        predicates.push(Predicate::SizeIn(filters.sizes.clone()));
    }
    if !filters.brands.is_empty() {
        predicates.push(Predicate::BrandIn(filters.brands.clone()));
    }
    if !filters.conditions.is_empty() {
        predicates.push(Predicate::ConditionIn(filters.conditions.clone()));
    }
    predicates
}
