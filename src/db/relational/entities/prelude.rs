pub use super::category::Entity as Categories;
pub use super::listing::Entity as Listings;
pub use super::profile::Entity as Profiles;
