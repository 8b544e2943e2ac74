use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::User;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Partner (collection "partners") com comentários embutidos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub description: String,

    /// Creation order, append-only
    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime>,
}

/// Item dentro do array comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// user_id of whoever wrote it
    pub author: String,
    pub rating: u8,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime>,
}

impl Partner {
    pub fn new(request: CreatePartnerRequest) -> Self {
        let now = DateTime::now();
        Partner {
            id: ObjectId::new(),
            name: request.name,
            image: request.image,
            featured: request.featured.unwrap_or(false),
            description: request.description.unwrap_or_default(),
            comments: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn comment(&self, comment_id: &ObjectId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == comment_id)
    }

    pub fn comment_mut(&mut self, comment_id: &ObjectId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| &c.id == comment_id)
    }

    /// Appends a comment and returns its id.
    pub fn add_comment(&mut self, author: &str, rating: u8, text: String) -> ObjectId {
        let now = DateTime::now();
        let comment = Comment {
            id: ObjectId::new(),
            author: author.to_string(),
            rating,
            text,
            created_at: Some(now),
            updated_at: Some(now),
        };
        let id = comment.id;
        self.comments.push(comment);
        self.updated_at = Some(now);
        id
    }

    /// Removes by identity; the remaining comments keep their order.
    pub fn remove_comment(&mut self, comment_id: &ObjectId) -> Option<Comment> {
        let index = self.comments.iter().position(|c| &c.id == comment_id)?;
        self.updated_at = Some(DateTime::now());
        Some(self.comments.remove(index))
    }

    /// Drops every comment. Returns how many were removed.
    pub fn clear_comments(&mut self) -> usize {
        let removed = self.comments.len();
        self.comments.clear();
        self.updated_at = Some(DateTime::now());
        removed
    }
}

impl Comment {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author == user_id
    }

    /// Applies only the fields present in the patch.
    pub fn apply(&mut self, patch: &UpdateCommentRequest) {
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        self.updated_at = Some(DateTime::now());
    }
}

pub fn validate_rating(rating: u8) -> Result<(), String> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(format!("Rating must be between {} and {}", MIN_RATING, MAX_RATING))
    }
}

/// Request para criar partner
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreatePartnerRequest {
    pub name: String,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub description: Option<String>,
}

/// Request para atualizar partner ($set dos campos presentes)
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdatePartnerRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub description: Option<String>,
}

impl UpdatePartnerRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image.is_none() && self.featured.is_none() && self.description.is_none()
    }

    /// Applies the present fields in memory.
    pub fn apply_to(&self, partner: &mut Partner) {
        if let Some(name) = &self.name {
            partner.name = name.clone();
        }
        if let Some(image) = &self.image {
            partner.image = Some(image.clone());
        }
        if let Some(featured) = self.featured {
            partner.featured = featured;
        }
        if let Some(description) = &self.description {
            partner.description = description.clone();
        }
        partner.updated_at = Some(DateTime::now());
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    pub rating: u8,
    pub text: String,
}

/// Partial update: omitted fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateCommentRequest {
    pub rating: Option<u8>,
    pub text: Option<String>,
}

/// Response de comentário com autor resolvido
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub author: User,
    pub rating: u8,
    pub text: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CommentResponse {
    pub fn new(comment: Comment, author: User) -> Self {
        CommentResponse {
            id: comment.id.to_hex(),
            author,
            rating: comment.rating,
            text: comment.text,
            created_at: comment.created_at.map(|dt| dt.to_string()),
            updated_at: comment.updated_at.map(|dt| dt.to_string()),
        }
    }
}

/// Response de partner
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PartnerResponse {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub featured: bool,
    pub description: String,
    pub comments: Vec<CommentResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl PartnerResponse {
    /// `resolve` maps an author id to the user shown in the response.
    pub fn new(partner: Partner, resolve: impl Fn(&str) -> User) -> Self {
        PartnerResponse {
            id: partner.id.to_hex(),
            name: partner.name,
            image: partner.image,
            featured: partner.featured,
            description: partner.description,
            comments: partner
                .comments
                .into_iter()
                .map(|c| {
                    let author = resolve(&c.author);
                    CommentResponse::new(c, author)
                })
                .collect(),
            created_at: partner.created_at.map(|dt| dt.to_string()),
            updated_at: partner.updated_at.map(|dt| dt.to_string()),
        }
    }
}
