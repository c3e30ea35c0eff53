use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::company;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::company::*;
use crate::state::AppState;
use crate::utils::company::{active_companies, category_tags, find_active_company, replace_categories};

async fn company_response<C: ConnectionTrait>(
    db: &C,
    model: company::Model,
) -> Result<CompanyResponse, AppError> {
    let mut tags = category_tags(db, &[model.id]).await?;
    let category = tags.remove(&model.id).unwrap_or_default();
    Ok(CompanyResponse::new(model, category))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Companies",
    operation_id = "listCompanies",
    summary = "List active companies",
    responses(
        (status = 200, description = "Active companies, newest first", body = Vec<CompanyResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let companies = active_companies()
        .order_by_desc(company::Column::CreatedAt)
        .order_by_desc(company::Column::Id)
        .all(&state.db)
        .await?;

    let ids: Vec<Uuid> = companies.iter().map(|c| c.id).collect();
    let mut tags = category_tags(&state.db, &ids).await?;

    let data = companies
        .into_iter()
        .map(|c| {
            let category = tags.remove(&c.id).unwrap_or_default();
            CompanyResponse::new(c, category)
        })
        .collect();

    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Companies",
    operation_id = "getCompany",
    summary = "Get a company by ID",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company details", body = CompanyResponse),
        (status = 404, description = "Company not found or deleted (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, AppError> {
    let model = find_active_company(&state.db, id).await?;
    Ok(Json(company_response(&state.db, model).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Companies",
    operation_id = "createCompany",
    summary = "Create a company",
    description = "`salesRevenue` may be sent as a decimal string or an integer and is always returned as a string.",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Validation error or unknown category (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(name = %payload.name))]
pub async fn create_company(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_company(&payload)?;

    let now = chrono::Utc::now();
    let new_company = company::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name.trim().to_string()),
        content: Set(payload.content),
        image: Set(payload.image),
        sales_revenue: Set(payload.sales_revenue),
        employee_cnt: Set(payload.employee_cnt),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let txn = state.db.begin().await?;
    let model = new_company.insert(&txn).await?;
    replace_categories(&txn, model.id, &payload.category_ids).await?;
    let response = company_response(&txn, model).await?;
    txn.commit().await?;

    tracing::info!(company_id = %response.id, "Company created");
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Companies",
    operation_id = "updateCompany",
    summary = "Update a company",
    description = "Partial update. `categoryIds`, when present, replaces the whole category set.",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Company not found or deleted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(id = %id))]
pub async fn update_company(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>, AppError> {
    validate_update_company(&payload)?;

    if payload == UpdateCompanyRequest::default() {
        let existing = find_active_company(&state.db, id).await?;
        return Ok(Json(company_response(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;
    let existing = find_active_company(&txn, id).await?;
    let mut active: company::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(revenue) = payload.sales_revenue {
        active.sales_revenue = Set(revenue);
    }
    if let Some(cnt) = payload.employee_cnt {
        active.employee_cnt = Set(cnt);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    if let Some(ref category_ids) = payload.category_ids {
        replace_categories(&txn, id, category_ids).await?;
    }
    let response = company_response(&txn, model).await?;
    txn.commit().await?;

    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Companies",
    operation_id = "deleteCompany",
    summary = "Soft-delete a company",
    description = "Sets `deleted_at`. The company disappears from every listing, ranking and count; its applications are kept.",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company deleted", body = CompanyResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Company not found or already deleted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id = %id))]
pub async fn delete_company(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, AppError> {
    let existing = find_active_company(&state.db, id).await?;

    let now = chrono::Utc::now();
    let mut active: company::ActiveModel = existing.into();
    active.deleted_at = Set(Some(now));
    active.updated_at = Set(now);
    let model = active.update(&state.db).await?;

    Ok(Json(company_response(&state.db, model).await?))
}
