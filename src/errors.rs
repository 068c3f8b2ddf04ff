use crate::db::DatabaseError;
use crate::search::SearchError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read with serde: {0}")]
    SerdeError(#[from] serde_json::error::Error),
    #[error("socket address parsing error: {0}")]
    SocketAddressParsingError(#[from] std::net::AddrParseError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    AppErrors(#[from] AppErrors),
}

#[derive(Error, Debug)]
pub enum AppErrors {
    #[error("database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error(transparent)]
    SearchError(#[from] SearchError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown database type, use `in_memory` or `relational`")]
    UnknownDatabaseType,
    #[error("data file for the in-memory database not found")]
    DataFileNotFound,
    #[error("relational database settings are incomplete")]
    MissingDatabaseSettings,
    #[error("{0} is not a supported environment, use `dev` or `prod`")]
    UnknownEnvironment(String),
}

impl IntoResponse for AppErrors {
    fn into_response(self) -> Response {
        let message = match &self {
            AppErrors::SearchError(_) => "Failed to load browse page",
            AppErrors::DatabaseError(_) | AppErrors::ConfigurationError(_) => "Internal server error",
        };
        error!("request failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
    }
}
