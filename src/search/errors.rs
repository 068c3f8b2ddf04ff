use crate::db::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("failed to load listings: {0}")]
    ListingsUnavailable(#[source] DatabaseError),
}
