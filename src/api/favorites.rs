use actix_web::{http::Method, web, HttpResponse};

use super::not_supported;
use crate::{
    database::FavoritesStore,
    middleware::{auth::Claims, AuthMiddleware},
    models::{CampsiteRef, FavoritesResponse, PopulatedFavorites},
    services::favorites_service::{self, AddOutcome, RemoveOutcome},
    utils::{parse_object_id, AppError},
};

pub const ALREADY_FAVORITE: &str = "That campsite is already in the list of favorites!";
pub const NOTHING_TO_DELETE: &str = "There are no favorites to delete!";
pub const NOT_A_FAVORITE: &str = "That campsite is not in the list of favorites!";
pub const LIST_EMPTIED: &str = "Favorite removed. Your list of favorites is now empty.";

fn text(message: &'static str) -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body(message)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/favorites")
            .wrap(AuthMiddleware::required())
            .service(
                web::resource("")
                    .route(web::get().to(get_favorites))
                    .route(web::post().to(add_favorites))
                    .route(not_supported(Method::PUT, "/favorites"))
                    .route(web::delete().to(clear_favorites)),
            )
            .service(
                web::resource("/{campsite_id}")
                    .route(web::post().to(add_favorite))
                    .route(not_supported(Method::PUT, "/favorites/{campsiteId}"))
                    .route(web::delete().to(remove_favorite)),
            ),
    );
}

/// GET /api/v1/favorites - Lista de favoritos do usuário (campsites resolvidos)
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "Favorites",
    responses(
        (status = 200, description = "The user's favorites, or null when there is no list", body = PopulatedFavorites),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_favorites(
    user: web::ReqData<Claims>,
    store: web::Data<dyn FavoritesStore>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /favorites - user {}", user.sub);

    let favorites = favorites_service::get_favorites(store.get_ref(), &user.sub).await?;
    Ok(HttpResponse::Ok().json(favorites))
}

/// POST /api/v1/favorites - Adiciona vários campsites (`[{"_id": "..."}]`)
#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    tag = "Favorites",
    request_body = Vec<CampsiteRef>,
    responses(
        (status = 200, description = "Resulting favorites list", body = FavoritesResponse),
        (status = 400, description = "Malformed campsite id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_favorites(
    user: web::ReqData<Claims>,
    store: web::Data<dyn FavoritesStore>,
    request: web::Json<Vec<CampsiteRef>>,
) -> Result<HttpResponse, AppError> {
    log::info!("⭐ POST /favorites - user {}, {} campsites", user.sub, request.len());

    let campsites = request
        .iter()
        .map(|c| parse_object_id(&c.id, "campsite"))
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = favorites_service::add_favorites(store.get_ref(), &user.sub, &campsites).await?;
    Ok(HttpResponse::Ok().json(FavoritesResponse::from(outcome.into_favorites())))
}

/// DELETE /api/v1/favorites - Remove a lista inteira
#[utoipa::path(
    delete,
    path = "/api/v1/favorites",
    tag = "Favorites",
    responses(
        (status = 200, description = "Deleted list, or a plain-text note when there was none", body = FavoritesResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn clear_favorites(
    user: web::ReqData<Claims>,
    store: web::Data<dyn FavoritesStore>,
) -> Result<HttpResponse, AppError> {
    log::info!("🧹 DELETE /favorites - user {}", user.sub);

    match favorites_service::clear_favorites(store.get_ref(), &user.sub).await? {
        Some(deleted) => Ok(HttpResponse::Ok().json(FavoritesResponse::from(deleted))),
        None => Ok(text(NOTHING_TO_DELETE)),
    }
}

/// POST /api/v1/favorites/{campsite_id}
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{campsite_id}",
    tag = "Favorites",
    params(("campsite_id" = String, Path, description = "Campsite ObjectId")),
    responses(
        (status = 200, description = "Resulting list, or a plain-text note when already a favorite", body = FavoritesResponse),
        (status = 400, description = "Malformed campsite id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_favorite(
    user: web::ReqData<Claims>,
    store: web::Data<dyn FavoritesStore>,
    campsite_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("⭐ POST /favorites/{} - user {}", campsite_id, user.sub);

    let campsite = parse_object_id(&campsite_id, "campsite")?;

    match favorites_service::add_favorite(store.get_ref(), &user.sub, campsite).await? {
        AddOutcome::AlreadyPresent(_) => Ok(text(ALREADY_FAVORITE)),
        outcome => Ok(HttpResponse::Ok().json(FavoritesResponse::from(outcome.into_favorites()))),
    }
}

/// DELETE /api/v1/favorites/{campsite_id}
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{campsite_id}",
    tag = "Favorites",
    params(("campsite_id" = String, Path, description = "Campsite ObjectId")),
    responses(
        (status = 200, description = "Remaining list, or a plain-text note", body = FavoritesResponse),
        (status = 400, description = "Malformed campsite id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_favorite(
    user: web::ReqData<Claims>,
    store: web::Data<dyn FavoritesStore>,
    campsite_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /favorites/{} - user {}", campsite_id, user.sub);

    let campsite = parse_object_id(&campsite_id, "campsite")?;

    match favorites_service::remove_favorite(store.get_ref(), &user.sub, &campsite).await? {
        RemoveOutcome::Removed(favorites) => Ok(HttpResponse::Ok().json(FavoritesResponse::from(favorites))),
        RemoveOutcome::Emptied => Ok(text(LIST_EMPTIED)),
        RemoveOutcome::NotInList(_) => Ok(text(NOT_A_FAVORITE)),
        RemoveOutcome::NoList => Ok(text(NOTHING_TO_DELETE)),
    }
}
