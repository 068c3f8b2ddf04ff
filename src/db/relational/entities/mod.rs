pub mod prelude;

pub mod category;
pub mod listing;
pub mod profile;
