// In-memory stores used by the unit and HTTP tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{FavoritesStore, PartnerStore};
use crate::models::{Campsite, Favorites, Partner, UpdatePartnerRequest, User};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    favorites: RwLock<HashMap<String, Favorites>>,
    partners: RwLock<Vec<Partner>>,
    campsites: RwLock<Vec<Campsite>>,
    users: RwLock<Vec<User>>,
}

fn poisoned() -> AppError {
    AppError::DatabaseError("memory store lock poisoned".into())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_campsite(&self, name: &str) -> ObjectId {
        let campsite = Campsite {
            id: ObjectId::new(),
            name: name.to_string(),
            description: String::new(),
            image: None,
            elevation: None,
            cost: None,
            featured: false,
        };
        let id = campsite.id;
        self.campsites.write().unwrap().push(campsite);
        id
    }

    pub fn insert_user(&self, user_id: &str, name: &str) {
        self.users.write().unwrap().push(User {
            user_id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            name: Some(name.to_string()),
        });
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.read().unwrap().len()
    }
}

#[async_trait]
impl FavoritesStore for MemoryStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Favorites>, AppError> {
        Ok(self.favorites.read().map_err(|_| poisoned())?.get(user_id).cloned())
    }

    async fn create(&self, favorites: Favorites) -> Result<Favorites, AppError> {
        let mut all = self.favorites.write().map_err(|_| poisoned())?;
        if all.contains_key(&favorites.user) {
            return Err(AppError::DatabaseError("E11000 duplicate key error: favorites.user".into()));
        }
        all.insert(favorites.user.clone(), favorites.clone());
        Ok(favorites)
    }

    async fn save(&self, favorites: &Favorites) -> Result<(), AppError> {
        self.favorites
            .write()
            .map_err(|_| poisoned())?
            .insert(favorites.user.clone(), favorites.clone());
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<Option<Favorites>, AppError> {
        Ok(self.favorites.write().map_err(|_| poisoned())?.remove(user_id))
    }

    async fn find_campsites(&self, ids: &[ObjectId]) -> Result<Vec<Campsite>, AppError> {
        let campsites = self.campsites.read().map_err(|_| poisoned())?;
        Ok(ids
            .iter()
            .filter_map(|id| campsites.iter().find(|c| &c.id == id).cloned())
            .collect())
    }
}

#[async_trait]
impl PartnerStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Partner>, AppError> {
        Ok(self.partners.read().map_err(|_| poisoned())?.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Partner>, AppError> {
        Ok(self
            .partners
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn create(&self, partner: Partner) -> Result<Partner, AppError> {
        self.partners.write().map_err(|_| poisoned())?.push(partner.clone());
        Ok(partner)
    }

    async fn save(&self, partner: &Partner) -> Result<(), AppError> {
        let mut partners = self.partners.write().map_err(|_| poisoned())?;
        match partners.iter_mut().find(|p| p.id == partner.id) {
            Some(existing) => *existing = partner.clone(),
            None => partners.push(partner.clone()),
        }
        Ok(())
    }

    async fn update_fields(&self, id: &ObjectId, patch: &UpdatePartnerRequest) -> Result<Option<Partner>, AppError> {
        let mut partners = self.partners.write().map_err(|_| poisoned())?;
        Ok(partners.iter_mut().find(|p| &p.id == id).map(|partner| {
            patch.apply_to(partner);
            partner.clone()
        }))
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Partner>, AppError> {
        let mut partners = self.partners.write().map_err(|_| poisoned())?;
        let index = partners.iter().position(|p| &p.id == id);
        Ok(index.map(|i| partners.remove(i)))
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut partners = self.partners.write().map_err(|_| poisoned())?;
        let deleted = partners.len() as u64;
        partners.clear();
        Ok(deleted)
    }

    async fn find_authors(&self, user_ids: &[String]) -> Result<Vec<User>, AppError> {
        Ok(self
            .users
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|u| user_ids.contains(&u.user_id))
            .cloned()
            .collect())
    }
}
