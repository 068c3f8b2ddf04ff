mod category;
mod database;
pub mod errors;
pub mod in_memory;
mod listing;
pub mod relational;
mod seller;

pub use category::{Category, CategorySummary, CategoryWithCount};
pub use database::Database;
pub use errors::DBError as DatabaseError;
pub use in_memory::InMemoryDB;
pub use listing::{Listing, ListingSummary, ACTIVE_STATUS};
pub use seller::Seller;
