use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campsite Service API",
        version = "1.0.0",
        description = "Favorites and partners for the campsite booking app. \n\n**Authentication:** mutations require a JWT Bearer token. Partner and comment reads are public.\n\n**Ownership:** only the author of a comment may update or delete it. Partner management and clearing all comments require the `admin` role."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Favorites
        crate::api::favorites::get_favorites,
        crate::api::favorites::add_favorites,
        crate::api::favorites::clear_favorites,
        crate::api::favorites::add_favorite,
        crate::api::favorites::remove_favorite,

        // Partners
        crate::api::partners::list_partners,
        crate::api::partners::create_partner,
        crate::api::partners::delete_all_partners,
        crate::api::partners::get_partner,
        crate::api::partners::update_partner,
        crate::api::partners::delete_partner,

        // Comments
        crate::api::comments::list_comments,
        crate::api::comments::add_comment,
        crate::api::comments::clear_comments,
        crate::api::comments::get_comment,
        crate::api::comments::update_comment,
        crate::api::comments::delete_comment,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,

            crate::models::Campsite,
            crate::models::CampsiteRef,
            crate::models::FavoritesResponse,
            crate::models::PopulatedFavorites,

            crate::models::User,
            crate::models::CreatePartnerRequest,
            crate::models::UpdatePartnerRequest,
            crate::models::PartnerResponse,
            crate::models::CreateCommentRequest,
            crate::models::UpdateCommentRequest,
            crate::models::CommentResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check."),
        (name = "Favorites", description = "Per-user list of favorite campsites."),
        (name = "Partners", description = "Partner businesses. Writes are admin only."),
        (name = "Comments", description = "Reviews embedded in a partner. Only the author may change or delete a comment."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build()
                ),
            );
        }
    }
}
