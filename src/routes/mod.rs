use crate::app_state::AppState;
use crate::db::Category;
use crate::errors::AppErrors;
use crate::search::{FilterParameters, HomeFeed, LoadMoreResult, SearchResult};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Result};
use std::collections::HashMap;

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<SearchResult>, AppErrors> {
    let filters = FilterParameters::from(&query);
    let result = state.executor().search(filters).await?;
    Ok(Json(result))
}

/// Next page for infinite scroll. Failures still answer with a
/// `LoadMoreResult`, flagged `failed`, so the client can stop paging.
pub async fn load_more(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<LoadMoreResult>) {
    let filters = FilterParameters::from(&query);
    match state.executor().load_more(&filters).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(LoadMoreResult::failed(filters.page)),
        ),
    }
}

pub async fn category_page(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(mut query): Query<HashMap<String, String>>,
) -> Result<Json<SearchResult>, AppErrors> {
    query.insert("category".to_string(), category);
    browse(State(state), Query(query)).await
}

pub async fn subcategory_page(
    State(state): State<AppState>,
    Path((category, subcategory)): Path<(String, String)>,
    Query(mut query): Query<HashMap<String, String>>,
) -> Result<Json<SearchResult>, AppErrors> {
    query.insert("category".to_string(), category);
    query.insert("subcategory".to_string(), subcategory);
    browse(State(state), Query(query)).await
}

pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.executor().navigation().await)
}

pub async fn home(State(state): State<AppState>) -> Json<HomeFeed> {
    Json(state.executor().home().await)
}
