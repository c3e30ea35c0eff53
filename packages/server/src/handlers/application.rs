use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{ApplicationStatus, PageRequest};
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{application, company};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::application::*;
use crate::models::shared::floor_param;
use crate::state::AppState;
use crate::utils::company::{applicant_counts, category_tags, find_active_company};

/// A concurrent apply that lost the race on `uq_application_user_company`.
fn already_applied(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Application unique constraint caught on write");
            AppError::Duplicate("You have already applied to this company".into())
        }
        _ => AppError::from(e),
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Applications",
    operation_id = "listApplications",
    summary = "List your applications",
    description = "Ten per page, newest first. Applications to deleted companies are neither listed nor counted.",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "A page of applications", body = ApplicationListResponse),
        (status = 400, description = "Malformed query (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = %auth_user.user_id, page = ?query.page, filter = ?query.filter))]
pub async fn list_applications(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ApplicationListQuery>,
) -> Result<Json<ApplicationListResponse>, AppError> {
    let page = PageRequest::new(floor_param(query.page), None, APPLICATIONS_PER_PAGE);

    let mut select = application::Entity::find()
        .filter(application::Column::UserId.eq(auth_user.user_id))
        .filter(
            application::Column::CompanyId.in_subquery(
                SeaQuery::select()
                    .column(company::Column::Id)
                    .from(company::Entity)
                    .and_where(company::Column::DeletedAt.is_null())
                    .to_owned(),
            ),
        );
    if let Some(status) = query.status_filter() {
        select = select.filter(application::Column::Status.eq(status));
    }

    let total = select.clone().count(&state.db).await?;

    let rows = select
        .order_by_desc(application::Column::CreatedAt)
        .order_by_desc(application::Column::Id)
        .offset(Some(page.offset()))
        .limit(Some(page.per_page))
        .all(&state.db)
        .await?;

    let mut company_ids: Vec<Uuid> = rows.iter().map(|a| a.company_id).collect();
    company_ids.sort_unstable();
    company_ids.dedup();

    let companies: HashMap<Uuid, company::Model> = if company_ids.is_empty() {
        HashMap::new()
    } else {
        company::Entity::find()
            .filter(company::Column::Id.is_in(company_ids.clone()))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    };
    let tags = category_tags(&state.db, &company_ids).await?;
    let counts = applicant_counts(&state.db, Some(&company_ids)).await?;

    let applications = rows
        .into_iter()
        .filter_map(|a| {
            let c = companies.get(&a.company_id)?;
            Some(ApplicationListItem {
                id: a.id,
                company_id: c.id,
                name: c.name.clone(),
                image: c.image.clone(),
                content: c.content.clone(),
                category: tags.get(&c.id).cloned().unwrap_or_default(),
                status: a.status,
                applicant_cnt: counts.get(&c.id).copied().unwrap_or(0),
                created_at: a.created_at,
                updated_at: a.updated_at,
            })
        })
        .collect();

    Ok(Json(ApplicationListResponse {
        applications,
        page: page.page,
        total_pages: page.total_pages(total),
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Applications",
    operation_id = "apply",
    summary = "Apply to a company",
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application submitted as PENDING", body = ApplicationResponse),
        (status = 400, description = "Already applied (DUPLICATE)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Company not found or deleted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, company_id = %payload.company_id))]
pub async fn apply(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ApplyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_active_company(&txn, payload.company_id).await?;

    let existing = application::Entity::find()
        .filter(application::Column::UserId.eq(auth_user.user_id))
        .filter(application::Column::CompanyId.eq(payload.company_id))
        .count(&txn)
        .await?;
    if existing > 0 {
        return Err(AppError::Duplicate(
            "You have already applied to this company".into(),
        ));
    }

    let now = chrono::Utc::now();
    let model = application::ActiveModel {
        id: Set(Uuid::now_v7()),
        status: Set(ApplicationStatus::Pending),
        user_id: Set(auth_user.user_id),
        company_id: Set(payload.company_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(already_applied)?;
    txn.commit().await?;

    tracing::info!(application_id = %model.id, "Application submitted");
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Applications",
    operation_id = "withdrawApplication",
    summary = "Withdraw your application",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application withdrawn"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not your application (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Application not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn withdraw_application(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let existing = application::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".into()))?;
    auth_user.require_self(existing.user_id)?;

    application::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
