use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Campsite, Favorites, Partner, UpdatePartnerRequest, User};
use crate::utils::AppError;

/// Persistence for the per-user favorites aggregate.
///
/// Every call is a single-document operation; callers read the whole
/// document, change it in memory and hand it back to `save`.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Favorites>, AppError>;

    async fn create(&self, favorites: Favorites) -> Result<Favorites, AppError>;

    /// Whole-document upsert keyed by `_id`.
    async fn save(&self, favorites: &Favorites) -> Result<(), AppError>;

    /// Deletes the user's list, returning it if there was one.
    async fn delete_by_user(&self, user_id: &str) -> Result<Option<Favorites>, AppError>;

    /// Resolves ids to campsites. Missing ids are skipped; order follows `ids`.
    async fn find_campsites(&self, ids: &[ObjectId]) -> Result<Vec<Campsite>, AppError>;
}

/// Persistence for partners and their embedded comments.
#[async_trait]
pub trait PartnerStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Partner>, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Partner>, AppError>;

    async fn create(&self, partner: Partner) -> Result<Partner, AppError>;

    /// Whole-document upsert keyed by `_id`.
    async fn save(&self, partner: &Partner) -> Result<(), AppError>;

    /// `$set` of the present fields; returns the updated document.
    async fn update_fields(&self, id: &ObjectId, patch: &UpdatePartnerRequest) -> Result<Option<Partner>, AppError>;

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Partner>, AppError>;

    /// Returns the number of deleted partners.
    async fn delete_all(&self) -> Result<u64, AppError>;

    /// Looks up users by `user_id`. Unknown ids are skipped.
    async fn find_authors(&self, user_ids: &[String]) -> Result<Vec<User>, AppError>;
}
