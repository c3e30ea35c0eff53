use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{bookmark, company};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::bookmark::*;
use crate::state::AppState;
use crate::utils::company::find_active_company;

fn active_bookmark(user_id: Uuid, company_id: Uuid) -> Select<bookmark::Entity> {
    bookmark::Entity::find()
        .filter(bookmark::Column::UserId.eq(user_id))
        .filter(bookmark::Column::CompanyId.eq(company_id))
        .filter(bookmark::Column::DeletedAt.is_null())
}

#[utoipa::path(
    get,
    path = "/{user_id}",
    tag = "Bookmarks",
    operation_id = "listBookmarks",
    summary = "List your bookmarks",
    description = "Active bookmarks of active companies, newest first. An empty list is a 200.",
    params(("user_id" = Uuid, Path, description = "User ID (must be the caller)")),
    responses(
        (status = 200, description = "Bookmarks", body = Vec<BookmarkListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not your bookmarks (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %user_id))]
pub async fn list_bookmarks(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<BookmarkListItem>>, AppError> {
    auth_user.require_self(user_id)?;

    let rows = bookmark::Entity::find()
        .filter(bookmark::Column::UserId.eq(user_id))
        .filter(bookmark::Column::DeletedAt.is_null())
        .find_also_related(company::Entity)
        .filter(company::Column::DeletedAt.is_null())
        .order_by_desc(bookmark::Column::CreatedAt)
        .order_by_desc(bookmark::Column::Id)
        .all(&state.db)
        .await?;

    let data = rows
        .into_iter()
        .filter_map(|(b, c)| {
            c.map(|c| BookmarkListItem {
                id: b.id,
                company_id: c.id,
                name: c.name,
                image: c.image,
                created_at: b.created_at,
            })
        })
        .collect();

    Ok(Json(data))
}

#[utoipa::path(
    post,
    path = "/{user_id}",
    tag = "Bookmarks",
    operation_id = "addBookmark",
    summary = "Bookmark a company",
    params(("user_id" = Uuid, Path, description = "User ID (must be the caller)")),
    request_body = BookmarkRequest,
    responses(
        (status = 201, description = "Bookmark created", body = BookmarkResponse),
        (status = 400, description = "Already bookmarked (DUPLICATE)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not your bookmarks (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Company not found or deleted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %user_id, company_id = %payload.company_id))]
pub async fn add_bookmark(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    AppJson(payload): AppJson<BookmarkRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_self(user_id)?;

    let txn = state.db.begin().await?;
    find_active_company(&txn, payload.company_id).await?;

    if active_bookmark(user_id, payload.company_id)
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::Duplicate("Company is already bookmarked".into()));
    }

    let model = bookmark::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user_id),
        company_id: Set(payload.company_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(BookmarkResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/{user_id}",
    tag = "Bookmarks",
    operation_id = "removeBookmark",
    summary = "Remove a bookmark",
    description = "Soft delete of the caller's active bookmark on `companyId`.",
    params(("user_id" = Uuid, Path, description = "User ID (must be the caller)")),
    request_body = BookmarkRequest,
    responses(
        (status = 200, description = "Bookmark removed", body = BookmarkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not your bookmarks (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "No active bookmark (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %user_id, company_id = %payload.company_id))]
pub async fn remove_bookmark(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    AppJson(payload): AppJson<BookmarkRequest>,
) -> Result<Json<BookmarkResponse>, AppError> {
    auth_user.require_self(user_id)?;

    let existing = active_bookmark(user_id, payload.company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bookmark not found".into()))?;

    let mut active: bookmark::ActiveModel = existing.into();
    active.deleted_at = Set(Some(chrono::Utc::now()));
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}
