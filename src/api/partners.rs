use actix_web::{http::Method, web, HttpResponse};

use super::{comments, not_supported};
use crate::{
    database::PartnerStore,
    middleware::{auth::Claims, AuthMiddleware},
    models::{CreatePartnerRequest, PartnerResponse, UpdatePartnerRequest},
    services::partner_service,
    utils::{parse_object_id, AppError},
};

/// Reads are public; everything else needs a token.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/partners")
            .wrap(AuthMiddleware::public_reads())
            .service(
                web::resource("")
                    .route(web::get().to(list_partners))
                    .route(web::post().to(create_partner))
                    .route(not_supported(Method::PUT, "/partners"))
                    .route(web::delete().to(delete_all_partners)),
            )
            .service(
                web::resource("/{partner_id}")
                    .route(web::get().to(get_partner))
                    .route(not_supported(Method::POST, "/partners/{partnerId}"))
                    .route(web::put().to(update_partner))
                    .route(web::delete().to(delete_partner)),
            )
            .configure(comments::routes),
    );
}

/// GET /api/v1/partners
#[utoipa::path(
    get,
    path = "/api/v1/partners",
    tag = "Partners",
    responses((status = 200, description = "All partners with comment authors resolved", body = Vec<PartnerResponse>))
)]
pub async fn list_partners(store: web::Data<dyn PartnerStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /partners");

    let partners = partner_service::list_partners(store.get_ref()).await?;
    log::info!("✅ Listed {} partners", partners.len());
    Ok(HttpResponse::Ok().json(partners))
}

/// POST /api/v1/partners - admin
#[utoipa::path(
    post,
    path = "/api/v1/partners",
    tag = "Partners",
    request_body = CreatePartnerRequest,
    responses(
        (status = 200, description = "Created partner", body = PartnerResponse),
        (status = 403, description = "Not an administrator")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_partner(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
    request: web::Json<CreatePartnerRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /partners - {} by {}", request.name, user.sub);

    let partner = partner_service::create_partner(store.get_ref(), &user, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}

/// DELETE /api/v1/partners - admin, apaga todos
#[utoipa::path(
    delete,
    path = "/api/v1/partners",
    tag = "Partners",
    responses(
        (status = 200, description = "Number of deleted partners"),
        (status = 403, description = "Not an administrator")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_all_partners(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /partners - by {}", user.sub);

    let deleted = partner_service::delete_all_partners(store.get_ref(), &user).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "deleted_count": deleted
    })))
}

/// GET /api/v1/partners/{partner_id}
#[utoipa::path(
    get,
    path = "/api/v1/partners/{partner_id}",
    tag = "Partners",
    params(("partner_id" = String, Path, description = "Partner ObjectId")),
    responses(
        (status = 200, description = "The partner", body = PartnerResponse),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn get_partner(
    store: web::Data<dyn PartnerStore>,
    partner_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /partners/{}", partner_id);

    let id = parse_object_id(&partner_id, "partner")?;
    let partner = partner_service::get_partner(store.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}

/// PUT /api/v1/partners/{partner_id} - admin, $set parcial
#[utoipa::path(
    put,
    path = "/api/v1/partners/{partner_id}",
    tag = "Partners",
    params(("partner_id" = String, Path, description = "Partner ObjectId")),
    request_body = UpdatePartnerRequest,
    responses(
        (status = 200, description = "Updated partner", body = PartnerResponse),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Partner not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_partner(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
    partner_id: web::Path<String>,
    request: web::Json<UpdatePartnerRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PUT /partners/{} - by {}", partner_id, user.sub);

    let id = parse_object_id(&partner_id, "partner")?;
    let partner = partner_service::update_partner(store.get_ref(), &user, &id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}

/// DELETE /api/v1/partners/{partner_id} - admin
#[utoipa::path(
    delete,
    path = "/api/v1/partners/{partner_id}",
    tag = "Partners",
    params(("partner_id" = String, Path, description = "Partner ObjectId")),
    responses(
        (status = 200, description = "Deleted partner", body = PartnerResponse),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Partner not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_partner(
    user: web::ReqData<Claims>,
    store: web::Data<dyn PartnerStore>,
    partner_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /partners/{} - by {}", partner_id, user.sub);

    let id = parse_object_id(&partner_id, "partner")?;
    let partner = partner_service::delete_partner(store.get_ref(), &user, &id).await?;
    Ok(HttpResponse::Ok().json(partner_service::populate(store.get_ref(), partner).await?))
}
