use crate::db::{Category, CategoryWithCount, ListingSummary};
use crate::search::filter_params::FilterParameters;
use crate::search::pagination::{has_more, PaginationInfo};
use serde::Serialize;

/// One page of listings as returned by the page query, before assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub listings: Vec<ListingSummary>,
    pub page: u64,
    pub limit: u64,
}

/// Response of the full browse page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub listings: Vec<ListingSummary>,
    pub total_count: u64,
    pub categories: Vec<Category>,
    pub popular_brands: Vec<String>,
    pub pagination: PaginationInfo,
    pub filters: FilterParameters,
}

impl SearchResult {
    pub fn assemble(
        page: ListingPage,
        total_count: u64,
        categories: Vec<Category>,
        popular_brands: Vec<String>,
        filters: FilterParameters,
    ) -> Self {
        Self {
            pagination: PaginationInfo::new(page.page, page.limit, total_count),
            listings: page.listings,
            total_count,
            categories,
            popular_brands,
            filters,
        }
    }
}

/// Response of the incremental "load more" fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadMoreResult {
    pub listings: Vec<ListingSummary>,
    pub has_more: bool,
    pub page: u64,
    pub failed: bool,
}

impl From<ListingPage> for LoadMoreResult {
    fn from(page: ListingPage) -> Self {
        Self {
            has_more: has_more(page.listings.len(), page.limit),
            listings: page.listings,
            page: page.page,
            failed: false,
        }
    }
}

impl LoadMoreResult {
    /// Empty page telling the client to stop scrolling.
    pub fn failed(page: u64) -> Self {
        Self {
            listings: vec![],
            has_more: false,
            page,
            failed: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeed {
    pub categories: Vec<CategoryWithCount>,
    pub featured_listings: Vec<ListingSummary>,
    pub popular_listings: Vec<ListingSummary>,
}
