// ==================== MONGODB STORES ====================
// FavoritesStore / PartnerStore sobre as collections do MongoDB.
// Saves are whole-document replaces (last writer wins).

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::ReturnDocument;

use super::{FavoritesStore, MongoDB, PartnerStore, CAMPSITES, FAVORITES, PARTNERS, USERS};
use crate::models::{Campsite, Favorites, Partner, UpdatePartnerRequest, User};
use crate::utils::AppError;

#[async_trait]
impl FavoritesStore for MongoDB {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Favorites>, AppError> {
        Ok(self
            .collection::<Favorites>(FAVORITES)
            .find_one(doc! { "user": user_id })
            .await?)
    }

    async fn create(&self, favorites: Favorites) -> Result<Favorites, AppError> {
        self.collection::<Favorites>(FAVORITES)
            .insert_one(&favorites)
            .await?;
        Ok(favorites)
    }

    async fn save(&self, favorites: &Favorites) -> Result<(), AppError> {
        self.collection::<Favorites>(FAVORITES)
            .replace_one(doc! { "_id": favorites.id }, favorites)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<Option<Favorites>, AppError> {
        Ok(self
            .collection::<Favorites>(FAVORITES)
            .find_one_and_delete(doc! { "user": user_id })
            .await?)
    }

    async fn find_campsites(&self, ids: &[ObjectId]) -> Result<Vec<Campsite>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<Campsite> = self
            .collection::<Campsite>(CAMPSITES)
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;

        // $in does not keep the list order
        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|c| &c.id == id).cloned())
            .collect())
    }
}

#[async_trait]
impl PartnerStore for MongoDB {
    async fn find_all(&self) -> Result<Vec<Partner>, AppError> {
        Ok(self
            .collection::<Partner>(PARTNERS)
            .find(doc! {})
            .await?
            .try_collect()
            .await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Partner>, AppError> {
        Ok(self
            .collection::<Partner>(PARTNERS)
            .find_one(doc! { "_id": *id })
            .await?)
    }

    async fn create(&self, partner: Partner) -> Result<Partner, AppError> {
        self.collection::<Partner>(PARTNERS)
            .insert_one(&partner)
            .await?;
        Ok(partner)
    }

    async fn save(&self, partner: &Partner) -> Result<(), AppError> {
        self.collection::<Partner>(PARTNERS)
            .replace_one(doc! { "_id": partner.id }, partner)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn update_fields(&self, id: &ObjectId, patch: &UpdatePartnerRequest) -> Result<Option<Partner>, AppError> {
        Ok(self
            .collection::<Partner>(PARTNERS)
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set_document(patch) })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Partner>, AppError> {
        Ok(self
            .collection::<Partner>(PARTNERS)
            .find_one_and_delete(doc! { "_id": *id })
            .await?)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let result = self
            .collection::<Partner>(PARTNERS)
            .delete_many(doc! {})
            .await?;
        Ok(result.deleted_count)
    }

    async fn find_authors(&self, user_ids: &[String]) -> Result<Vec<User>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .collection::<User>(USERS)
            .find(doc! { "user_id": { "$in": user_ids.to_vec() } })
            .await?
            .try_collect()
            .await?)
    }
}

/// `$set` body with only the fields present in the patch
fn set_document(patch: &UpdatePartnerRequest) -> Document {
    let mut set = doc! { "updated_at": DateTime::now() };
    if let Some(name) = &patch.name {
        set.insert("name", name.clone());
    }
    if let Some(image) = &patch.image {
        set.insert("image", image.clone());
    }
    if let Some(featured) = patch.featured {
        set.insert("featured", featured);
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.clone());
    }
    set
}
