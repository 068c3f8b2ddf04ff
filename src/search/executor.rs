use crate::db::{Category, CategoryWithCount, Database, ListingSummary};
use crate::search::errors::SearchError;
use crate::search::filter_params::{FilterParameters, SortBy};
use crate::search::pagination::PageWindow;
use crate::search::predicate::{ListingQuery, Predicate, ResolvedCategories};
use crate::search::result::{HomeFeed, ListingPage, LoadMoreResult, SearchResult};
use std::collections::BTreeSet;
use tracing::{debug, error};
use uuid::Uuid;

/// How many active listings are sampled for the brand facet.
pub const BRAND_SAMPLE_SIZE: u64 = 50;
/// Longest brand facet returned.
pub const MAX_POPULAR_BRANDS: usize = 20;
/// Size of each home feed section.
pub const HOME_SECTION_SIZE: u64 = 16;

/// Runs browse searches against the datastore.
///
/// Only the page query can fail a request. Category lookups, the count and
/// both facets are logged on failure and fall back to empty values.
#[derive(Debug, Clone, Copy)]
pub struct SearchExecutor<'a> {
    db: &'a Database,
}

impl<'a> SearchExecutor<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn search(&self, filters: FilterParameters) -> Result<SearchResult, SearchError> {
        let resolved = self.resolve(&filters).await;
        let query = ListingQuery::build(&filters, resolved);
        let (page, total_count, categories, popular_brands) = tokio::join!(
            self.page(&query, &filters),
            self.count(&query.predicates),
            self.categories_facet(),
            self.brands_facet(),
        );
        Ok(SearchResult::assemble(
            page?,
            total_count,
            categories,
            popular_brands,
            filters,
        ))
    }

    pub async fn load_more(&self, filters: &FilterParameters) -> Result<LoadMoreResult, SearchError> {
        let resolved = self.resolve(filters).await;
        let query = ListingQuery::build(filters, resolved);
        let page = self.page(&query, filters).await?;
        Ok(page.into())
    }

    pub async fn home(&self) -> HomeFeed {
        let featured = FilterParameters::default()
            .with_sort(SortBy::Recent)
            .with_limit(HOME_SECTION_SIZE);
        let popular = FilterParameters::default()
            .with_sort(SortBy::Popular)
            .with_limit(HOME_SECTION_SIZE);
        let (categories, featured, popular) = tokio::join!(
            self.navigation_with_counts(),
            self.section(&featured),
            self.section(&popular),
        );
        HomeFeed {
            categories,
            featured_listings: featured,
            popular_listings: popular,
        }
    }

    /// Top-level categories for site navigation.
    pub async fn navigation(&self) -> Vec<Category> {
        self.db
            .navigation_categories()
            .await
            .unwrap_or_else(|e| {
                error!("failed to fetch navigation categories: {e}");
                vec![]
            })
    }

    /// Navigation categories with how many listings of any status each holds.
    /// A failed count leaves the categories in place with a count of zero.
    pub async fn navigation_with_counts(&self) -> Vec<CategoryWithCount> {
        let categories = self.navigation().await;
        if categories.is_empty() {
            return vec![];
        }
        let ids: Vec<Uuid> = categories.iter().map(|category| category.id).collect();
        let counts = self.db.listing_counts(&ids).await.unwrap_or_else(|e| {
            error!("failed to count category listings: {e}");
            Default::default()
        });
        categories
            .into_iter()
            .map(|category| CategoryWithCount {
                product_count: counts.get(&category.id).copied().unwrap_or_default(),
                category,
            })
            .collect()
    }

    pub async fn resolve(&self, filters: &FilterParameters) -> ResolvedCategories {
        let (category, subcategory) = tokio::join!(
            self.resolve_one(filters.category.as_deref()),
            self.resolve_one(filters.subcategory.as_deref()),
        );
        ResolvedCategories {
            category,
            subcategory,
        }
    }

    async fn resolve_one(&self, value: Option<&str>) -> Option<Uuid> {
        let value = value?;
        match self.db.find_category_id(value).await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                debug!(category = value, "category not resolved, filter dropped");
                None
            }
            Err(e) => {
                error!("failed to resolve category {value}: {e}");
                None
            }
        }
    }

    async fn page(
        &self,
        query: &ListingQuery,
        filters: &FilterParameters,
    ) -> Result<ListingPage, SearchError> {
        let window = PageWindow::new(filters.page, filters.limit);
        let listings = self
            .db
            .search_listings(query, window)
            .await
            .map_err(|e| {
                error!("failed to fetch listings: {e}");
                SearchError::ListingsUnavailable(e)
            })?;
        Ok(ListingPage {
            listings,
            page: filters.page,
            limit: window.limit,
        })
    }

    async fn section(&self, filters: &FilterParameters) -> Vec<ListingSummary> {
        let query = ListingQuery::build(filters, ResolvedCategories::default());
        match self.page(&query, filters).await {
            Ok(page) => page.listings,
            Err(_) => vec![],
        }
    }

    async fn count(&self, predicates: &[Predicate]) -> u64 {
        self.db.count_listings(predicates).await.unwrap_or_else(|e| {
            error!("failed to count listings: {e}");
            0
        })
    }

    async fn categories_facet(&self) -> Vec<Category> {
        self.db.active_categories().await.unwrap_or_else(|e| {
            error!("failed to fetch categories: {e}");
            vec![]
        })
    }

    async fn brands_facet(&self) -> Vec<String> {
        match self.db.brand_sample(BRAND_SAMPLE_SIZE).await {
            Ok(sample) => popular_brands(sample),
            Err(e) => {
                error!("failed to fetch brands: {e}");
                vec![]
            }
        }
    }
}

/// Distinct, sorted, non-empty brands from a sample, capped for display.
pub fn popular_brands(sample: Vec<String>) -> Vec<String> {
    sample
        .into_iter()
        .filter(|brand| !brand.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(MAX_POPULAR_BRANDS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory::InMemoryDB;
    use crate::db::relational::entities;
    use crate::db::relational::RelationalDB;
    use crate::db::{Listing, ACTIVE_STATUS};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::HashMap;

    fn filters(pairs: &[(&str, &str)]) -> FilterParameters {
        let query: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        FilterParameters::from(&query)
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn category(name: &str, slug: &str, sort_order: i32) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            icon_url: None,
            parent_id: None,
            sort_order,
            is_active: true,
        }
    }

    fn listing(title: &str, price: f64, size: &str, category_id: Uuid) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            price,
            currency: "USD".to_string(),
            category_id,
            subcategory_id: None,
            brand: None,
            size: Some(size.to_string()),
            condition: "good".to_string(),
            status: ACTIVE_STATUS.to_string(),
            images: vec![],
            location: None,
            view_count: 0,
            favorite_count: 0,
            is_negotiable: false,
            shipping_included: false,
            shipping_cost: None,
            created_at: base_time(),
        }
    }

    /// Twelve listings across two categories with varied prices, sizes,
    /// brands, conditions, popularity and age, plus one sold listing.
    fn catalogue() -> (InMemoryDB, Category, Category) {
        let outerwear = category("Outerwear", "outerwear", 1);
        let shoes = category("Shoes", "shoes", 2);
        let sizes = ["S", "M", "L"];
        let brands = [Some("Levi's"), Some("Nike"), None, Some("Zara")];
        let conditions = ["new", "good", "worn"];
        let mut listings = vec![];
        for i in 0..12u32 {
            let category_id = if i % 2 == 0 { outerwear.id } else { shoes.id };
            let mut row = listing(
                &format!("Item {i}"),
                f64::from((i * 7) % 11) * 10.0 + 5.0,
                sizes[i as usize % 3],
                category_id,
            );
            row.brand = brands[i as usize % 4].map(str::to_string);
            row.condition = conditions[i as usize % 3].to_string();
            row.view_count = i64::from((i * 5) % 12);
            row.favorite_count = i64::from((i * 3) % 7);
            row.created_at = base_time() + Duration::hours(i64::from((i * 5) % 12));
            listings.push(row);
        }
        let mut sold = listing("Sold Parka", 40.0, "M", outerwear.id);
        sold.status = "sold".to_string();
        listings.push(sold);
        let db = InMemoryDB::new(vec![outerwear.clone(), shoes.clone()], listings);
        (db, outerwear, shoes)
    }

    fn in_memory(db: InMemoryDB) -> Database {
        Database::InMemory(Box::new(db))
    }

    fn titles(listings: &[ListingSummary]) -> Vec<&str> {
        listings.iter().map(|listing| listing.title.as_str()).collect()
    }

    #[tokio::test]
    async fn denim_jacket_example() {
        let category_id = Uuid::new_v4();
        let db = in_memory(InMemoryDB::new(
            vec![],
            vec![
                listing("Blue Denim Jacket", 30.0, "M", category_id),
                listing("Denim Skirt", 25.0, "M", category_id),
                listing("Leather Jacket", 150.0, "M", category_id),
            ],
        ));
        let executor = SearchExecutor::new(&db);

        let result = executor
            .search(filters(&[
                ("q", "denim jacket"),
                ("min_price", "20"),
                ("max_price", "100"),
                ("sizes", "M"),
                ("sort", "price-low"),
                ("page", "1"),
                ("limit", "2"),
            ]))
            .await
            .expect("Failed to search");

        // "Denim Skirt" shares the token "denim", and tokens are OR-ed.
        assert_eq!(titles(&result.listings), vec!["Denim Skirt", "Blue Denim Jacket"]);
        assert_eq!(result.total_count, 2);
        assert_eq!(result.pagination.total_pages, 1);
        assert!(!result.pagination.has_next_page);
    }

    #[tokio::test]
    async fn denim_jacket_example_without_token_overlap() {
        let category_id = Uuid::new_v4();
        let db = in_memory(InMemoryDB::new(
            vec![],
            vec![
                listing("Blue Denim Jacket", 30.0, "M", category_id),
                listing("Pleated Skirt", 25.0, "M", category_id),
                listing("Leather Jacket", 150.0, "M", category_id),
            ],
        ));
        let result = SearchExecutor::new(&db)
            .search(filters(&[
                ("q", "denim jacket"),
                ("min_price", "20"),
                ("max_price", "100"),
                ("sizes", "M"),
                ("sort", "price-low"),
                ("limit", "2"),
            ]))
            .await
            .expect("Failed to search");

        assert_eq!(titles(&result.listings), vec!["Blue Denim Jacket"]);
        assert_eq!(result.total_count, 1);
        assert_eq!(result.pagination.total_pages, 1);
        assert!(!result.pagination.has_next_page);
        assert!(!result.pagination.has_prev_page);
    }

    #[tokio::test]
    async fn set_filters_restrict_every_row() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let result = SearchExecutor::new(&db)
            .search(filters(&[
                ("sizes", "S,L"),
                ("brands", "Nike,Zara"),
                ("conditions", "new,worn"),
                ("limit", "100"),
            ]))
            .await
            .expect("Failed to search");

        assert!(!result.listings.is_empty());
        for listing in &result.listings {
            assert!(["S", "L"].contains(&listing.size.as_deref().unwrap_or_default()));
            assert!(["Nike", "Zara"].contains(&listing.brand.as_deref().unwrap_or_default()));
            assert!(["new", "worn"].contains(&listing.condition.as_str()));
        }
    }

    #[tokio::test]
    async fn empty_sets_do_not_restrict() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);
        let unfiltered = executor
            .search(filters(&[("limit", "100")]))
            .await
            .expect("Failed to search");
        let empty_sets = executor
            .search(filters(&[("limit", "100"), ("sizes", ","), ("brands", ""), ("conditions", ",,")]))
            .await
            .expect("Failed to search");

        assert_eq!(unfiltered.total_count, 12);
        assert_eq!(titles(&unfiltered.listings), titles(&empty_sets.listings));
    }

    #[tokio::test]
    async fn price_bounds_hold_for_every_row() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);

        let both = executor
            .search(filters(&[("min_price", "25"), ("max_price", "75"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        assert!(!both.listings.is_empty());
        assert!(both.listings.iter().all(|l| (25.0..=75.0).contains(&l.price)));

        let only_min = executor
            .search(filters(&[("min_price", "60"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        assert!(only_min.listings.iter().all(|l| l.price >= 60.0));

        let only_max = executor
            .search(filters(&[("max_price", "30"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        assert!(only_max.listings.iter().all(|l| l.price <= 30.0));
    }

    #[tokio::test]
    async fn count_is_independent_of_page_and_limit() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);
        let everything = executor
            .search(filters(&[("conditions", "good,new"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        let expected = everything.listings.len() as u64;

        for (page, limit) in [("1", "3"), ("2", "3"), ("4", "2"), ("50", "5")] {
            let result = executor
                .search(filters(&[("conditions", "good,new"), ("page", page), ("limit", limit)]))
                .await
                .expect("Failed to search");
            assert_eq!(result.total_count, expected);
        }
    }

    #[tokio::test]
    async fn pages_partition_the_result_set() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);
        let all = executor
            .search(filters(&[("sort", "price-low"), ("limit", "100")]))
            .await
            .expect("Failed to search");

        let mut paged = vec![];
        for page in 1..=3 {
            let result = executor
                .search(filters(&[("sort", "price-low"), ("page", &page.to_string()), ("limit", "5")]))
                .await
                .expect("Failed to search");
            assert_eq!(result.pagination.total_pages, 3);
            assert_eq!(result.pagination.has_next_page, page < 3);
            assert_eq!(result.pagination.has_prev_page, page > 1);
            paged.extend(result.listings);
        }
        assert_eq!(titles(&paged), titles(&all.listings));
    }

    #[tokio::test]
    async fn page_beyond_data_is_empty() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let result = SearchExecutor::new(&db)
            .search(filters(&[("page", "40"), ("limit", "5")]))
            .await
            .expect("Failed to search");
        assert!(result.listings.is_empty());
        assert_eq!(result.total_count, 12);
        assert!(!result.pagination.has_next_page);
    }

    #[tokio::test]
    async fn unresolvable_category_matches_omitted_category() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);
        let without = executor
            .search(filters(&[("limit", "100")]))
            .await
            .expect("Failed to search");
        let unknown = executor
            .search(filters(&[("category", "spaceships"), ("limit", "100")]))
            .await
            .expect("Failed to search");

        assert_eq!(without.total_count, unknown.total_count);
        assert_eq!(titles(&without.listings), titles(&unknown.listings));
    }

    #[tokio::test]
    async fn category_resolves_by_slug_or_name() {
        let (db, outerwear, shoes) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);

        let by_slug = executor
            .search(filters(&[("category", "shoes"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        assert_eq!(by_slug.total_count, 6);
        assert!(by_slug.listings.iter().all(|l| l.category_id == shoes.id));

        let by_name = executor
            .search(filters(&[("category", "OUTER"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        assert_eq!(by_name.total_count, 6);
        assert!(by_name.listings.iter().all(|l| l.category_id == outerwear.id));
    }

    #[tokio::test]
    async fn ambiguous_category_is_dropped() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        // "o" is part of both "Outerwear" and "Shoes".
        let result = SearchExecutor::new(&db)
            .search(filters(&[("category", "o"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        assert_eq!(result.total_count, 12);
    }

    #[tokio::test]
    async fn subcategory_resolves_independently() {
        let outerwear = category("Outerwear", "outerwear", 1);
        let parkas = Category {
            parent_id: Some(outerwear.id),
            ..category("Parkas", "parkas", 1)
        };
        let mut parka = listing("Arctic Parka", 120.0, "L", outerwear.id);
        parka.subcategory_id = Some(parkas.id);
        let trench = listing("Trench Coat", 90.0, "M", outerwear.id);
        let db = in_memory(InMemoryDB::new(vec![outerwear, parkas], vec![parka, trench]));

        let result = SearchExecutor::new(&db)
            .search(filters(&[("category", "nonexistent"), ("subcategory", "parkas")]))
            .await
            .expect("Failed to search");
        assert_eq!(titles(&result.listings), vec!["Arctic Parka"]);
    }

    #[tokio::test]
    async fn every_sort_is_monotonic() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);
        for sort in ["price-low", "price-high", "popular", "liked", "recent", "bogus"] {
            let result = executor
                .search(filters(&[("sort", sort), ("limit", "100")]))
                .await
                .expect("Failed to search");
            for pair in result.listings.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let ordered = match sort {
                    "price-low" => a.price <= b.price,
                    "price-high" => a.price >= b.price,
                    "popular" => a.view_count >= b.view_count,
                    "liked" => a.favorite_count >= b.favorite_count,
                    _ => a.created_at >= b.created_at,
                };
                assert!(ordered, "{sort} out of order: {} then {}", a.title, b.title);
            }
        }
    }

    #[tokio::test]
    async fn inactive_listings_never_returned() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let result = SearchExecutor::new(&db)
            .search(filters(&[("q", "parka"), ("limit", "100")]))
            .await
            .expect("Failed to search");
        assert!(result.listings.is_empty());
        assert_eq!(result.total_count, 0);
        assert_eq!(result.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn facets_ignore_user_filters() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let result = SearchExecutor::new(&db)
            .search(filters(&[("brands", "Nike"), ("category", "shoes")]))
            .await
            .expect("Failed to search");
        assert_eq!(result.popular_brands, vec!["Levi's", "Nike", "Zara"]);
        let slugs: Vec<&str> = result.categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["outerwear", "shoes"]);
    }

    #[tokio::test]
    async fn load_more_reports_full_pages() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);

        let full = executor
            .load_more(&filters(&[("page", "2"), ("limit", "5")]))
            .await
            .expect("Failed to load more");
        assert_eq!(full.listings.len(), 5);
        assert!(full.has_more);
        assert_eq!(full.page, 2);

        let short = executor
            .load_more(&filters(&[("page", "3"), ("limit", "5")]))
            .await
            .expect("Failed to load more");
        assert_eq!(short.listings.len(), 2);
        assert!(!short.has_more);
    }

    #[tokio::test]
    async fn load_more_takes_extra_request_on_exact_multiple() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let executor = SearchExecutor::new(&db);

        let last_full = executor
            .load_more(&filters(&[("page", "2"), ("limit", "6")]))
            .await
            .expect("Failed to load more");
        assert!(last_full.has_more);

        let after = executor
            .load_more(&filters(&[("page", "3"), ("limit", "6")]))
            .await
            .expect("Failed to load more");
        assert!(after.listings.is_empty());
        assert!(!after.has_more);
    }

    #[tokio::test]
    async fn home_feed_sections() {
        let (db, _, _) = catalogue();
        let db = in_memory(db);
        let feed = SearchExecutor::new(&db).home().await;
        assert_eq!(feed.categories.len(), 2);
        // The sold listing counts toward its category.
        let counts: Vec<u64> = feed.categories.iter().map(|entry| entry.product_count).collect();
        assert_eq!(counts, vec![7, 6]);
        assert_eq!(feed.featured_listings.len(), 12);
        assert!(feed
            .popular_listings
            .windows(2)
            .all(|pair| pair[0].view_count >= pair[1].view_count));
    }

    #[test]
    fn popular_brands_dedupes_sorts_and_caps() {
        let mut sample: Vec<String> = (0..30).rev().map(|i| format!("Brand {i:02}")).collect();
        sample.push("Brand 03".to_string());
        sample.push(String::new());
        let brands = popular_brands(sample);
        assert_eq!(brands.len(), MAX_POPULAR_BRANDS);
        assert_eq!(brands.first().map(String::as_str), Some("Brand 00"));
        assert_eq!(brands.last().map(String::as_str), Some("Brand 19"));
    }

    fn listing_model(title: &str) -> entities::listing::Model {
        entities::listing::Model {
            id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            price: rust_decimal::Decimal::new(2500, 2),
            currency: "USD".to_string(),
            category_id: Uuid::new_v4(),
            subcategory_id: None,
            brand: None,
            size: Some("M".to_string()),
            condition: "good".to_string(),
            status: ACTIVE_STATUS.to_string(),
            images: serde_json::json!([]),
            location: None,
            view_count: 0,
            favorite_count: 0,
            is_negotiable: false,
            shipping_included: false,
            shipping_cost: None,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00")
                .expect("Failed to parse date"),
        }
    }

    #[tokio::test]
    async fn primary_failure_is_fatal() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let db = Database::Relational(RelationalDB::init(connection));
        let result = SearchExecutor::new(&db).search(FilterParameters::default()).await;
        assert!(matches!(result, Err(SearchError::ListingsUnavailable(_))));
    }

    #[tokio::test]
    async fn primary_failure_fails_load_more() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let db = Database::Relational(RelationalDB::init(connection));
        let result = SearchExecutor::new(&db).load_more(&FilterParameters::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn auxiliary_failures_degrade_to_empty() {
        // Only the page query and its seller and category lookups get rows;
        // count and both facets hit an exhausted mock and fail.
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![listing_model("Denim Skirt")]])
            .append_query_results([Vec::<entities::profile::Model>::new()])
            .append_query_results([Vec::<entities::category::Model>::new()])
            .into_connection();
        let db = Database::Relational(RelationalDB::init(connection));
        let result = SearchExecutor::new(&db)
            .search(FilterParameters::default())
            .await
            .expect("Failed to search");

        assert_eq!(titles(&result.listings), vec!["Denim Skirt"]);
        assert_eq!(result.total_count, 0);
        assert_eq!(result.pagination.total_pages, 0);
        assert!(result.categories.is_empty());
        assert!(result.popular_brands.is_empty());
        assert_eq!(result.listings[0].seller, None);
    }

    #[tokio::test]
    async fn failed_category_counts_fall_back_to_zero() {
        let women = entities::category::Model {
            id: Uuid::new_v4(),
            name: "Women".to_string(),
            slug: "women".to_string(),
            description: None,
            icon_url: None,
            parent_id: None,
            sort_order: 1,
            is_active: true,
        };
        // Navigation gets its row; the count query hits an exhausted mock.
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![women.clone()]])
            .into_connection();
        let db = Database::Relational(RelationalDB::init(connection));
        let executor = SearchExecutor::new(&db);
        let categories = executor.navigation_with_counts().await;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category.slug, "women");
        assert_eq!(categories[0].product_count, 0);
    }
}
