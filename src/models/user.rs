use serde::{Deserialize, Serialize};

/// User record, looked up to show who wrote a comment
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct User {
    pub user_id: String,  // PRIMARY IDENTIFIER - matches the JWT subject
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

impl User {
    /// Stand-in for an author whose user record is gone
    pub fn unknown(user_id: &str) -> Self {
        User {
            user_id: user_id.to_string(),
            email: String::new(),
            name: None,
        }
    }
}
