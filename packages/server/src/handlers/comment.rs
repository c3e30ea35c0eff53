use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{comment, company, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::comment::*;
use crate::models::shared::MessageResponse;
use crate::state::AppState;
use crate::utils::company::find_active_company;

/// Active comments on active companies, newest first, optionally for one company.
async fn load_comments<C: ConnectionTrait>(
    db: &C,
    company_id: Option<Uuid>,
) -> Result<Vec<CommentResponse>, AppError> {
    let mut select = comment::Entity::find().filter(comment::Column::DeletedAt.is_null());
    if let Some(company_id) = company_id {
        select = select.filter(comment::Column::CompanyId.eq(company_id));
    }

    let rows = select
        .find_also_related(company::Entity)
        .filter(company::Column::DeletedAt.is_null())
        .order_by_desc(comment::Column::CreatedAt)
        .order_by_desc(comment::Column::Id)
        .all(db)
        .await?;

    let mut author_ids: Vec<Uuid> = rows.iter().map(|(c, _)| c.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<Uuid, user::Model> = if author_ids.is_empty() {
        HashMap::new()
    } else {
        user::Entity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    };

    Ok(rows
        .into_iter()
        .filter_map(|(comment, company)| {
            let company = company?;
            let author = authors.get(&comment.user_id)?;
            Some(CommentResponse::new(comment, author, &company))
        })
        .collect())
}

async fn find_own_comment<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    id: Uuid,
) -> Result<comment::Model, AppError> {
    let existing = comment::Entity::find_by_id(id)
        .filter(comment::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;
    auth_user.require_self(existing.user_id)?;
    Ok(existing)
}

async fn comment_response<C: ConnectionTrait>(
    db: &C,
    model: comment::Model,
) -> Result<CommentResponse, AppError> {
    let author = user::Entity::find_by_id(model.user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let company = company::Entity::find_by_id(model.company_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".into()))?;
    Ok(CommentResponse::new(model, &author, &company))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List all comments",
    responses(
        (status = 200, description = "Comments, newest first", body = Vec<CommentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    Ok(Json(load_comments(&state.db, None).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Comments",
    operation_id = "listCompanyComments",
    summary = "List comments on a company",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Comments, newest first", body = Vec<CommentResponse>),
        (status = 404, description = "Company not found or deleted (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(company_id = %company_id))]
pub async fn list_company_comments(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    find_active_company(&state.db, company_id).await?;
    Ok(Json(load_comments(&state.db, Some(company_id)).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a company",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Company not found or deleted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, company_id = %payload.company_id))]
pub async fn create_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_comment_content(&payload.content)?;
    find_active_company(&state.db, payload.company_id).await?;

    let now = chrono::Utc::now();
    let model = comment::ActiveModel {
        id: Set(Uuid::now_v7()),
        content: Set(payload.content.trim().to_string()),
        user_id: Set(auth_user.user_id),
        company_id: Set(payload.company_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    let response = comment_response(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Comments",
    operation_id = "updateComment",
    summary = "Edit your comment",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id))]
pub async fn update_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    validate_comment_content(&payload.content)?;

    let existing = find_own_comment(&state.db, &auth_user, id).await?;
    let mut active: comment::ActiveModel = existing.into();
    active.content = Set(payload.content.trim().to_string());
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&state.db).await?;

    Ok(Json(comment_response(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete your comment",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn delete_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = find_own_comment(&state.db, &auth_user, id).await?;

    let now = chrono::Utc::now();
    let mut active: comment::ActiveModel = existing.into();
    active.deleted_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(&state.db).await?;

    Ok(Json(MessageResponse::new("Comment deleted")))
}
