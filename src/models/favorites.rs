use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::Campsite;

/// Favorites document (collection "favorites"), one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorites {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Owner of the list (unique index)
    pub user: String,

    /// Favorite campsite ids, no duplicates, insertion order
    #[serde(default)]
    pub campsites: Vec<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime>,
}

impl Favorites {
    /// New list for `user` holding `campsites` with duplicates collapsed.
    pub fn new(user: &str, campsites: &[ObjectId]) -> Self {
        let now = DateTime::now();
        let mut favorites = Favorites {
            id: ObjectId::new(),
            user: user.to_string(),
            campsites: Vec::with_capacity(campsites.len()),
            created_at: Some(now),
            updated_at: Some(now),
        };
        favorites.merge(campsites);
        favorites
    }

    pub fn contains(&self, campsite: &ObjectId) -> bool {
        self.campsites.contains(campsite)
    }

    /// Appends the ids not yet present, keeping the existing order.
    /// Returns how many were added.
    pub fn merge(&mut self, campsites: &[ObjectId]) -> usize {
        let mut added = 0;
        for campsite in campsites {
            if !self.contains(campsite) {
                self.campsites.push(*campsite);
                added += 1;
            }
        }
        if added > 0 {
            self.touch();
        }
        added
    }

    /// Removes `campsite` if present. Returns whether anything was removed.
    pub fn remove(&mut self, campsite: &ObjectId) -> bool {
        match self.campsites.iter().position(|c| c == campsite) {
            Some(index) => {
                self.campsites.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.campsites.is_empty()
    }

    fn touch(&mut self) {
        self.updated_at = Some(DateTime::now());
    }
}

/// Campsite reference as sent by clients: `[{"_id": "..."}]`
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CampsiteRef {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FavoritesResponse {
    pub id: String,
    pub user: String,
    pub campsites: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Favorites> for FavoritesResponse {
    fn from(favorites: Favorites) -> Self {
        FavoritesResponse {
            id: favorites.id.to_hex(),
            user: favorites.user,
            campsites: favorites.campsites.iter().map(|id| id.to_hex()).collect(),
            created_at: favorites.created_at.map(|dt| dt.to_string()),
            updated_at: favorites.updated_at.map(|dt| dt.to_string()),
        }
    }
}

/// Favorites with campsite ids resolved to full records
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PopulatedFavorites {
    pub id: String,
    pub user: String,
    pub campsites: Vec<Campsite>,
}
