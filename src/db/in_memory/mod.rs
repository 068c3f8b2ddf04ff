use crate::db::errors::{DBError, InMemoryError};
use crate::db::{Category, CategorySummary, Listing, ListingSummary, Seller};
use crate::search::{Direction, ListingQuery, PageWindow, Predicate, SearchText, SortKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileStructure {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub profiles: Vec<Seller>,
}

/// Catalogue loaded from a JSON file, kept in file order. That order is the
/// natural row order ties fall back to when sorting.
#[derive(Debug, Default)]
pub struct InMemoryDB {
    pub categories: Vec<Category>,
    pub listings: Vec<Listing>,
    pub sellers: Vec<Seller>,
}

impl TryFrom<String> for InMemoryDB {
    type Error = DBError;

    fn try_from(file_path: String) -> Result<Self, Self::Error> {
        let data = fs::read_to_string(file_path)
            .map_err(|e| DBError::InMemoryError(InMemoryError::IoError(e)))?;
        let db: FileStructure = serde_json::from_str(&data)
            .map_err(|e| DBError::InMemoryError(InMemoryError::SerdeError(e)))?;
        Ok(Self::new(db.categories, db.listings).with_sellers(db.profiles))
    }
}

impl InMemoryDB {
    pub fn new(categories: Vec<Category>, listings: Vec<Listing>) -> Self {
        Self {
            categories,
            listings,
            sellers: vec![],
        }
    }

    pub fn with_sellers(mut self, sellers: Vec<Seller>) -> Self {
        self.sellers = sellers;
        self
    }

    /// Id of the only category `value` names. Misses and ambiguous values
    /// both resolve to `None`.
    pub fn find_category_id(&self, value: &str) -> Result<Option<Uuid>, DBError> {
        let mut matches = self.categories.iter().filter(|category| category.answers_to(value));
        Ok(match (matches.next(), matches.next()) {
            (Some(category), None) => Some(category.id),
            _ => None,
        })
    }

    pub fn search_listings(
        &self,
        query: &ListingQuery,
        window: PageWindow,
    ) -> Result<Vec<ListingSummary>, DBError> {
        let mut selected: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|listing| satisfies(listing, &query.predicates))
            .collect();
        selected.sort_by(|a, b| {
            let ordering = compare(a, b, query.order.key);
            match query.order.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        Ok(selected
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .map(|listing| self.summarize(listing))
            .collect())
    }

    fn summarize(&self, listing: &Listing) -> ListingSummary {
        let seller = self
            .sellers
            .iter()
            .find(|seller| seller.id == listing.seller_id)
            .cloned();
        let category = self
            .categories
            .iter()
            .find(|category| category.id == listing.category_id)
            .map(CategorySummary::from);
        ListingSummary::from(listing).joined(seller, category)
    }

    pub fn count_listings(&self, predicates: &[Predicate]) -> Result<u64, DBError> {
        let count = self
            .listings
            .iter()
            .filter(|listing| satisfies(listing, predicates))
            .count();
        Ok(count as u64)
    }

    /// Active categories ordered by `sort_order`, then name.
    pub fn active_categories(&self) -> Result<Vec<Category>, DBError> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|category| category.is_active)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        Ok(categories)
    }

    pub fn navigation_categories(&self) -> Result<Vec<Category>, DBError> {
        let categories = self.active_categories()?;
        Ok(categories
            .into_iter()
            .filter(|category| category.parent_id.is_none())
            .collect())
    }

    /// Listings of any status per primary category. Categories without
    /// listings are absent from the map.
    pub fn listing_counts(&self, category_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DBError> {
        let mut counts = HashMap::new();
        for listing in &self.listings {
            if category_ids.contains(&listing.category_id) {
                *counts.entry(listing.category_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    /// Brands of the first `limit` active listings that have one.
    pub fn brand_sample(&self, limit: u64) -> Result<Vec<String>, DBError> {
        Ok(self
            .listings
            .iter()
            .filter(|listing| listing.is_active())
            .filter_map(|listing| listing.brand.clone())
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }
}

fn compare(a: &Listing, b: &Listing, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::ViewCount => a.view_count.cmp(&b.view_count),
        SortKey::FavoriteCount => a.favorite_count.cmp(&b.favorite_count),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

pub fn satisfies(listing: &Listing, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|predicate| match predicate {
        Predicate::Active => listing.is_active(),
        Predicate::Category(id) => listing.category_id == *id,
        Predicate::Subcategory(id) => listing.subcategory_id == Some(*id),
        Predicate::Text(text) => matches_tokens(listing, text) || matches_substring(listing, text),
        Predicate::MinPrice(min) => listing.price >= *min,
        Predicate::MaxPrice(max) => listing.price <= *max,
        Predicate::SizeIn(sizes) => listing.size.as_ref().is_some_and(|size| sizes.contains(size)),
        Predicate::BrandIn(brands) => listing.brand.as_ref().is_some_and(|brand| brands.contains(brand)),
        Predicate::ConditionIn(conditions) => conditions.contains(&listing.condition),
    })
}

/// Any search token equals a word of the title or description.
fn matches_tokens(listing: &Listing, text: &SearchText) -> bool {
    let tokens = text.tokens();
    if tokens.is_empty() {
        return false;
    }
    let document = format!("{} {}", listing.title, listing.description).to_lowercase();
    document
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| tokens.iter().any(|token| token == word))
}

/// The whole text appears, ignoring case, in the brand, title or description.
fn matches_substring(listing: &Listing, text: &SearchText) -> bool {
    let needle = text.as_str().to_lowercase();
    let haystacks = [
        listing.brand.as_deref().unwrap_or_default(),
        listing.title.as_str(),
        listing.description.as_str(),
    ];
    haystacks
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}
