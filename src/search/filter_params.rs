use crate::search::search_text::SearchText;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 24;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Recent,
    PriceLow,
    PriceHigh,
    Popular,
    Liked,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Recent => "recent",
            SortBy::PriceLow => "price-low",
            SortBy::PriceHigh => "price-high",
            SortBy::Popular => "popular",
            SortBy::Liked => "liked",
        }
    }
}

impl From<&str> for SortBy {
    /// Unrecognized values sort by recency.
    fn from(value: &str) -> Self {
        match value.trim() {
            "price-low" => SortBy::PriceLow,
            "price-high" => SortBy::PriceHigh,
            "popular" => SortBy::Popular,
            "liked" => SortBy::Liked,
            _ => SortBy::Recent,
        }
    }
}

impl Display for SortBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a browse request can filter, sort or paginate by.
///
/// Built once per request from the query string. Parsing never fails:
/// malformed values fall back to "unset" or to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParameters {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<SearchText>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sizes: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub conditions: BTreeSet<String>,
    pub sort_by: SortBy,
    #[serde(skip)]
    pub page: u64,
    #[serde(skip)]
    pub limit: u64,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            search: None,
            min_price: None,
            max_price: None,
            sizes: BTreeSet::new(),
            brands: BTreeSet::new(),
            conditions: BTreeSet::new(),
            sort_by: SortBy::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<&HashMap<String, String>> for FilterParameters {
    fn from(query: &HashMap<String, String>) -> Self {
        let get = |key: &str| query.get(key).map(String::as_str);
        Self {
            category: parse_text(get("category")),
            subcategory: parse_text(get("subcategory")),
            search: get("q").and_then(SearchText::parse),
            min_price: parse_price(get("min_price")),
            max_price: parse_price(get("max_price")),
            sizes: parse_list(get("sizes")),
            brands: parse_list(get("brands")),
            conditions: parse_list(get("conditions")),
            sort_by: get("sort").map(SortBy::from).unwrap_or_default(),
            page: parse_positive(get("page")).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(get("limit")).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

impl FilterParameters {
    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit.max(1);
        self
    }
}

fn parse_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_price(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|price| price.is_finite())
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|number| *number >= 1)
}

fn parse_list(value: Option<&str>) -> BTreeSet<String> {
    value
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
