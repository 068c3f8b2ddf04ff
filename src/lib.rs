pub mod app_state;
pub mod configuration;
pub mod db;
pub mod errors;
mod routes;
pub mod search;

use crate::app_state::AppState;
use crate::db::Database;
use crate::errors::Error;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_app(db: Database) -> Result<(Router, AppState), Error> {
    let app_state = AppState::init(db);
    let app = Router::new()
        .route("/", get(routes::home))
        .route("/health_check", get(routes::health_check))
        .route("/browse", get(routes::browse))
        .route("/browse/load-more", get(routes::load_more))
        .route("/categories", get(routes::categories))
        .route("/category/:category", get(routes::category_page))
        .route("/category/:category/:subcategory", get(routes::subcategory_page))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());
    Ok((app, app_state))
}
