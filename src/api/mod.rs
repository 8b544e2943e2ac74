use actix_web::{http::Method, web, HttpResponse, Route};

use crate::utils::AppError;

pub mod comments;
pub mod favorites;
pub mod health;
pub mod partners;
pub mod swagger;

#[cfg(test)]
mod tests;

/// Route answering `method` with the fixed 403 "not supported" text for
/// the route template, whatever the request carries.
pub fn not_supported(method: Method, route: &'static str) -> Route {
    web::method(method.clone()).to(move || {
        let method = method.clone();
        async move { Err::<HttpResponse, AppError>(AppError::unsupported(method.as_str(), route)) }
    })
}

/// Body deserialization failures answer like every other bad request.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("❌ {} {} malformed body: {}", req.method(), req.path(), err);
        AppError::InvalidRequest(format!("Invalid request body: {}", err)).into()
    })
}

/// Every /api/v1 resource, registered in one place.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .configure(favorites::routes)
            .configure(partners::routes),
    );
}
