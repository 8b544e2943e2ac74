use mongodb::bson::oid::ObjectId;

use super::AppError;

/// Parses a path segment as an ObjectId, naming the resource in the error.
pub fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidRequest(format!("Invalid {} ID: {}", what, raw)))
}
