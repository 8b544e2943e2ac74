use actix_web::{http::Method, web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use super::not_supported;
use crate::{
    database::PartnerStore,
    middleware::auth::Claims,
    models::{CommentResponse, CreateCommentRequest, PartnerResponse, UpdateCommentRequest},
    services::partner_service,
    utils::{parse_object_id, AppError},
};

/// Registered inside the /partners scope, behind its auth middleware.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{partner_id}/comments")
            .route(web::get().to(list_comments))
            .route(web::post().to(add_comment))
            .route(not_supported(Method::PUT, "/partners/{partnerId}/comments"))
            .route(web::delete().to(clear_comments)),
    )
    .service(
        web::resource("/{partner_id}/comments/{comment_id}")
            .route(web::get().to(get_comment))
            .route(not_supported(Method::POST, "/partners/{partnerId}/comments/{commentId}"))
            .route(web::put().to(update_comment))
            .route(web::delete().to(delete_comment)),
    );
}

fn ids(path: &(String, String)) -> Result<(ObjectId, ObjectId), AppError> {
    Ok((parse_object_id(&path.0, "partner")?, parse_object_id(&path.1, "comment")?))
}

/// GET /api/v1/partners/{partner_id}/comments
#[utoipa::path(
    get,
    path = "/api/v1/partners/{partner_id}/comments",
    tag = "Comments",
    params(("partner_id" = String, Path, description = "Partner ObjectId")),
    responses(
        (status = 200, description = "Comments in creation order", body = Vec<CommentResponse>),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn list_comments(
    store: web::Data<dyn PartnerStore>,
    partner_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("💬 GET /partners/{}/comments", partner_id);

    let id = parse_object_id(&partner_id, "partner")?;
    let comments = partner_service::list_comments(store.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/v1/partners/{partner_id}/comments - qualquer usuário autenticado
#[utoipa::path(
    post,
    path = "/api/v1/partners/{partner_id}/comments",
    tag = "Comments",
    params(("partner_id" = String, Path, description = "Partner ObjectId")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Partner with the new comment appended", body = PartnerResponse),
        (status = 400, description = "Rating out of range or empty text"),
        (status = 404, description = "Partner not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_comment(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
    partner_id: web::Path<String>,
    request: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("💬 POST /partners/{}/comments - by {}", partner_id, user.sub);

    let id = parse_object_id(&partner_id, "partner")?;
    let partner = partner_service::add_comment(store.get_ref(), &id, &user.sub, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}

/// DELETE /api/v1/partners/{partner_id}/comments - admin, remove todos
#[utoipa::path(
    delete,
    path = "/api/v1/partners/{partner_id}/comments",
    tag = "Comments",
    params(("partner_id" = String, Path, description = "Partner ObjectId")),
    responses(
        (status = 200, description = "Partner without comments", body = PartnerResponse),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Partner not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn clear_comments(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
    partner_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🧹 DELETE /partners/{}/comments - by {}", partner_id, user.sub);

    let id = parse_object_id(&partner_id, "partner")?;
    let partner = partner_service::clear_comments(store.get_ref(), &user, &id).await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}

/// GET /api/v1/partners/{partner_id}/comments/{comment_id}
#[utoipa::path(
    get,
    path = "/api/v1/partners/{partner_id}/comments/{comment_id}",
    tag = "Comments",
    params(
        ("partner_id" = String, Path, description = "Partner ObjectId"),
        ("comment_id" = String, Path, description = "Comment ObjectId")
    ),
    responses(
        (status = 200, description = "The comment", body = CommentResponse),
        (status = 404, description = "Partner or comment not found")
    )
)]
pub async fn get_comment(
    store: web::Data<dyn PartnerStore>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /partners/{}/comments/{}", path.0, path.1);

    let (partner_id, comment_id) = ids(&path)?;
    let comment = partner_service::get_comment(store.get_ref(), &partner_id, &comment_id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// PUT /api/v1/partners/{partner_id}/comments/{comment_id} - só o autor
#[utoipa::path(
    put,
    path = "/api/v1/partners/{partner_id}/comments/{comment_id}",
    tag = "Comments",
    params(
        ("partner_id" = String, Path, description = "Partner ObjectId"),
        ("comment_id" = String, Path, description = "Comment ObjectId")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Partner with the comment updated", body = PartnerResponse),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Partner or comment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_comment(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
    path: web::Path<(String, String)>,
    request: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("✏️  PUT /partners/{}/comments/{} - by {}", path.0, path.1, user.sub);

    let (partner_id, comment_id) = ids(&path)?;
    let partner = partner_service::update_comment(
        store.get_ref(),
        &partner_id,
        &comment_id,
        &user.sub,
        request.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}

/// DELETE /api/v1/partners/{partner_id}/comments/{comment_id} - só o autor
#[utoipa::path(
    delete,
    path = "/api/v1/partners/{partner_id}/comments/{comment_id}",
    tag = "Comments",
    params(
        ("partner_id" = String, Path, description = "Partner ObjectId"),
        ("comment_id" = String, Path, description = "Comment ObjectId")
    ),
    responses(
        (status = 200, description = "Partner without the comment", body = PartnerResponse),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Partner or comment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /partners/{}/comments/{} - by {}", path.0, path.1, user.sub);

    let (partner_id, comment_id) = ids(&path)?;
    let partner = partner_service::delete_comment(store.get_ref(), &partner_id, &comment_id, &user.sub).await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}
