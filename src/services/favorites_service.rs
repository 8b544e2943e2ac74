// ==================== FAVORITES MANAGEMENT ====================
// Lista de campsites favoritos, um documento por usuário.
// A list that becomes empty through a single removal is deleted, so a stored
// favorites document always holds at least one campsite.

use mongodb::bson::oid::ObjectId;

use crate::{
    database::FavoritesStore,
    models::{Favorites, PopulatedFavorites},
    utils::AppError,
};

#[derive(Debug, PartialEq)]
pub enum AddOutcome {
    /// No list existed; one was created.
    Created(Favorites),
    /// At least one campsite was appended.
    Added(Favorites),
    /// Every campsite was already a favorite; nothing was written.
    AlreadyPresent(Favorites),
}

impl AddOutcome {
    pub fn into_favorites(self) -> Favorites {
        match self {
            AddOutcome::Created(f) | AddOutcome::Added(f) | AddOutcome::AlreadyPresent(f) => f,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum RemoveOutcome {
    Removed(Favorites),
    /// The last campsite was removed and the list deleted.
    Emptied,
    /// The campsite was not in the list; nothing was written.
    NotInList(Favorites),
    NoList,
}

/// GET /favorites - lista do usuário com campsites resolvidos
pub async fn get_favorites(
    store: &dyn FavoritesStore,
    user_id: &str,
) -> Result<Option<PopulatedFavorites>, AppError> {
    let favorites = match store.find_by_user(user_id).await? {
        Some(favorites) => favorites,
        None => return Ok(None),
    };

    let campsites = store.find_campsites(&favorites.campsites).await?;

    Ok(Some(PopulatedFavorites {
        id: favorites.id.to_hex(),
        user: favorites.user,
        campsites,
    }))
}

/// POST /favorites - union of the given campsites into the user's list
pub async fn add_favorites(
    store: &dyn FavoritesStore,
    user_id: &str,
    campsites: &[ObjectId],
) -> Result<AddOutcome, AppError> {
    log::info!("⭐ Adding {} favorites for user {}", campsites.len(), user_id);

    match store.find_by_user(user_id).await? {
        Some(mut favorites) => {
            if favorites.merge(campsites) == 0 {
                return Ok(AddOutcome::AlreadyPresent(favorites));
            }
            store.save(&favorites).await?;
            Ok(AddOutcome::Added(favorites))
        }
        None if campsites.is_empty() => Err(AppError::InvalidRequest(
            "At least one campsite is required".to_string(),
        )),
        None => {
            let favorites = store.create(Favorites::new(user_id, campsites)).await?;
            Ok(AddOutcome::Created(favorites))
        }
    }
}

/// POST /favorites/{campsiteId}
pub async fn add_favorite(
    store: &dyn FavoritesStore,
    user_id: &str,
    campsite: ObjectId,
) -> Result<AddOutcome, AppError> {
    add_favorites(store, user_id, &[campsite]).await
}

/// DELETE /favorites/{campsiteId}
pub async fn remove_favorite(
    store: &dyn FavoritesStore,
    user_id: &str,
    campsite: &ObjectId,
) -> Result<RemoveOutcome, AppError> {
    log::info!("🗑️  Removing favorite {} for user {}", campsite, user_id);

    let mut favorites = match store.find_by_user(user_id).await? {
        Some(favorites) => favorites,
        None => return Ok(RemoveOutcome::NoList),
    };

    if !favorites.remove(campsite) {
        return Ok(RemoveOutcome::NotInList(favorites));
    }

    if favorites.is_empty() {
        store.delete_by_user(user_id).await?;
        return Ok(RemoveOutcome::Emptied);
    }

    store.save(&favorites).await?;
    Ok(RemoveOutcome::Removed(favorites))
}

/// DELETE /favorites - apaga a lista inteira
pub async fn clear_favorites(
    store: &dyn FavoritesStore,
    user_id: &str,
) -> Result<Option<Favorites>, AppError> {
    log::info!("🧹 Clearing favorites for user {}", user_id);
    store.delete_by_user(user_id).await
}
