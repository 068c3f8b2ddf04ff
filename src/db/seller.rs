use crate::db::relational::entities;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public seller profile shown next to a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seller {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl From<entities::profile::Model> for Seller {
    fn from(profile: entities::profile::Model) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            is_verified: profile.is_verified,
        }
    }
}
