// ==================== PARTNERS & COMMENTS ====================
// Partners com comentários embutidos. Every comment mutation reads the whole
// partner, changes it in memory and saves it back.

use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;

use crate::{
    database::PartnerStore,
    middleware::auth::Claims,
    models::{
        validate_rating, Comment, CommentResponse, CreateCommentRequest, CreatePartnerRequest, Partner,
        PartnerResponse, UpdateCommentRequest, UpdatePartnerRequest, User,
    },
    utils::AppError,
};

fn partner_not_found(partner_id: &ObjectId) -> AppError {
    AppError::NotFound(format!("Partner {} not found", partner_id))
}

fn comment_not_found(comment_id: &ObjectId) -> AppError {
    AppError::NotFound(format!("Comment {} not found", comment_id))
}

fn not_the_author(action: &str) -> AppError {
    AppError::Forbidden(format!("You are not authorized to {} this comment!", action))
}

async fn load(store: &dyn PartnerStore, partner_id: &ObjectId) -> Result<Partner, AppError> {
    store
        .find_by_id(partner_id)
        .await?
        .ok_or_else(|| partner_not_found(partner_id))
}

/// Locates a comment the acting user is allowed to change.
fn owned_comment<'a>(
    partner: &'a mut Partner,
    comment_id: &ObjectId,
    user_id: &str,
    action: &str,
) -> Result<&'a mut Comment, AppError> {
    let comment = partner
        .comment_mut(comment_id)
        .ok_or_else(|| comment_not_found(comment_id))?;

    if !comment.is_authored_by(user_id) {
        log::warn!("⛔ User {} tried to {} comment {} by {}", user_id, action, comment_id, comment.author);
        return Err(not_the_author(action));
    }

    Ok(comment)
}

async fn author_directory<'a>(
    store: &dyn PartnerStore,
    partners: impl Iterator<Item = &'a Partner>,
) -> Result<HashMap<String, User>, AppError> {
    let mut ids: Vec<String> = partners
        .flat_map(|p| p.comments.iter().map(|c| c.author.clone()))
        .collect();
    ids.sort();
    ids.dedup();

    Ok(store
        .find_authors(&ids)
        .await?
        .into_iter()
        .map(|u| (u.user_id.clone(), u))
        .collect())
}

fn lookup(directory: &HashMap<String, User>, user_id: &str) -> User {
    directory
        .get(user_id)
        .cloned()
        .unwrap_or_else(|| User::unknown(user_id))
}

/// Builds the response with every comment author resolved.
pub async fn populate(store: &dyn PartnerStore, partner: Partner) -> Result<PartnerResponse, AppError> {
    let directory = author_directory(store, std::iter::once(&partner)).await?;
    Ok(PartnerResponse::new(partner, |id| lookup(&directory, id)))
}

// ==================== PARTNERS ====================

pub async fn list_partners(store: &dyn PartnerStore) -> Result<Vec<PartnerResponse>, AppError> {
    let partners = store.find_all().await?;
    let directory = author_directory(store, partners.iter()).await?;

    Ok(partners
        .into_iter()
        .map(|p| PartnerResponse::new(p, |id| lookup(&directory, id)))
        .collect())
}

pub async fn get_partner(store: &dyn PartnerStore, partner_id: &ObjectId) -> Result<Partner, AppError> {
    load(store, partner_id).await
}

pub async fn create_partner(
    store: &dyn PartnerStore,
    claims: &Claims,
    request: CreatePartnerRequest,
) -> Result<Partner, AppError> {
    claims.require_admin()?;

    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("Partner name is required".to_string()));
    }

    let partner = store.create(Partner::new(request)).await?;
    log::info!("✅ Partner created: {} ({})", partner.name, partner.id);
    Ok(partner)
}

pub async fn update_partner(
    store: &dyn PartnerStore,
    claims: &Claims,
    partner_id: &ObjectId,
    patch: UpdatePartnerRequest,
) -> Result<Partner, AppError> {
    claims.require_admin()?;

    if patch.is_empty() {
        return load(store, partner_id).await;
    }

    store
        .update_fields(partner_id, &patch)
        .await?
        .ok_or_else(|| partner_not_found(partner_id))
}

pub async fn delete_partner(
    store: &dyn PartnerStore,
    claims: &Claims,
    partner_id: &ObjectId,
) -> Result<Partner, AppError> {
    claims.require_admin()?;

    store
        .delete_by_id(partner_id)
        .await?
        .ok_or_else(|| partner_not_found(partner_id))
}

pub async fn delete_all_partners(store: &dyn PartnerStore, claims: &Claims) -> Result<u64, AppError> {
    claims.require_admin()?;

    let deleted = store.delete_all().await?;
    log::info!("🗑️  Deleted {} partners", deleted);
    Ok(deleted)
}

// ==================== COMMENTS ====================

/// Comments in creation order, authors resolved. Empty is not an error.
pub async fn list_comments(
    store: &dyn PartnerStore,
    partner_id: &ObjectId,
) -> Result<Vec<CommentResponse>, AppError> {
    let partner = load(store, partner_id).await?;
    Ok(populate(store, partner).await?.comments)
}

pub async fn get_comment(
    store: &dyn PartnerStore,
    partner_id: &ObjectId,
    comment_id: &ObjectId,
) -> Result<CommentResponse, AppError> {
    let partner = load(store, partner_id).await?;
    let comment = partner
        .comment(comment_id)
        .cloned()
        .ok_or_else(|| comment_not_found(comment_id))?;

    let author = store
        .find_authors(std::slice::from_ref(&comment.author))
        .await?
        .into_iter()
        .next()
        .unwrap_or_else(|| User::unknown(&comment.author));

    Ok(CommentResponse::new(comment, author))
}

/// Any authenticated user may comment.
pub async fn add_comment(
    store: &dyn PartnerStore,
    partner_id: &ObjectId,
    user_id: &str,
    request: CreateCommentRequest,
) -> Result<Partner, AppError> {
    validate_rating(request.rating).map_err(AppError::InvalidRequest)?;
    if request.text.trim().is_empty() {
        return Err(AppError::InvalidRequest("Comment text is required".to_string()));
    }

    let mut partner = load(store, partner_id).await?;
    let comment_id = partner.add_comment(user_id, request.rating, request.text);
    store.save(&partner).await?;

    log::info!("💬 Comment {} added to partner {} by {}", comment_id, partner_id, user_id);
    Ok(partner)
}

/// Author only. Applies the fields present in `patch`.
pub async fn update_comment(
    store: &dyn PartnerStore,
    partner_id: &ObjectId,
    comment_id: &ObjectId,
    user_id: &str,
    patch: UpdateCommentRequest,
) -> Result<Partner, AppError> {
    if let Some(rating) = patch.rating {
        validate_rating(rating).map_err(AppError::InvalidRequest)?;
    }
    if patch.text.as_deref().is_some_and(|text| text.trim().is_empty()) {
        return Err(AppError::InvalidRequest("Comment text is required".to_string()));
    }

    let mut partner = load(store, partner_id).await?;
    owned_comment(&mut partner, comment_id, user_id, "update")?.apply(&patch);
    store.save(&partner).await?;

    log::info!("✏️  Comment {} updated on partner {}", comment_id, partner_id);
    Ok(partner)
}

/// Author only. Remaining comments keep their order.
pub async fn delete_comment(
    store: &dyn PartnerStore,
    partner_id: &ObjectId,
    comment_id: &ObjectId,
    user_id: &str,
) -> Result<Partner, AppError> {
    let mut partner = load(store, partner_id).await?;
    owned_comment(&mut partner, comment_id, user_id, "delete")?;
    partner.remove_comment(comment_id);
    store.save(&partner).await?;

    log::info!("🗑️  Comment {} deleted from partner {}", comment_id, partner_id);
    Ok(partner)
}

/// Admin only, no per-comment ownership check.
pub async fn clear_comments(
    store: &dyn PartnerStore,
    claims: &Claims,
    partner_id: &ObjectId,
) -> Result<Partner, AppError> {
    claims.require_admin()?;

    let mut partner = load(store, partner_id).await?;
    let removed = partner.clear_comments();
    store.save(&partner).await?;

    log::info!("🧹 Removed {} comments from partner {}", removed, partner_id);
    Ok(partner)
}
