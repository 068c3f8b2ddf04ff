use crate::db::Database;
use crate::search::SearchExecutor;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn init(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn executor(&self) -> SearchExecutor<'_> {
        SearchExecutor::new(&self.db)
    }
}
