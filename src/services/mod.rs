pub mod auth_service;
pub mod favorites_service;
pub mod partner_service;
