//! Company comparison views.
//!
//! Both views rank every active company by applicant count, revenue and
//! employee count on each request, then attach those global ranks to a page
//! of companies. `/pick` pages through the companies the caller applied to;
//! `/search` pages through all active companies.

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use common::PageRequest;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{application, company};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::query::AppQuery;
use crate::models::comparison::*;
use crate::models::shared::{CategoryTag, floor_param, non_blank};
use crate::state::AppState;
use crate::utils::company::{
    RankingSnapshot, active_companies, category_tags, ilike, load_rankings,
};

/// Case-insensitive substring match on a company name.
fn name_matches(name: &str, keyword: &str) -> bool {
    name.to_lowercase().contains(&keyword.to_lowercase())
}

fn labels(tags: Option<Vec<CategoryTag>>) -> Vec<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|t| t.category)
        .collect()
}

fn summarize(
    m: company::Model,
    tags: &mut HashMap<Uuid, Vec<CategoryTag>>,
    snapshot: &RankingSnapshot,
) -> (CompanySummary, Option<u32>) {
    let id = m.id;
    let summary = CompanySummary::new(
        m,
        labels(tags.remove(&id)),
        snapshot.applicant_count(&id),
        snapshot.rankings.applicant_rank(&id),
        snapshot.rankings.employee_rank(&id),
    );
    (summary, snapshot.rankings.revenue_rank(&id))
}

#[utoipa::path(
    get,
    path = "/pick",
    tag = "Comparison",
    operation_id = "pickAppliedCompanies",
    summary = "Rank the companies you applied to",
    description = "Pages through the caller's applied companies (optionally filtered by a case-insensitive name keyword) and attaches ranks computed over all active companies. With no applications the response is 200 with `companies: []` and `pagination: {}`.",
    params(ComparisonQuery),
    responses(
        (status = 200, description = "Applied companies with ranks", body = PickResponse),
        (status = 400, description = "Malformed query (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = %auth_user.user_id, keyword = ?query.keyword, page = ?query.page))]
pub async fn pick(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ComparisonQuery>,
) -> Result<Json<PickResponse>, AppError> {
    let page = PageRequest::new(
        floor_param(query.page),
        floor_param(query.limit),
        DEFAULT_COMPARISON_LIMIT,
    );

    let applied: Vec<Uuid> = application::Entity::find()
        .select_only()
        .column(application::Column::CompanyId)
        .distinct()
        .filter(application::Column::UserId.eq(auth_user.user_id))
        .into_tuple()
        .all(&state.db)
        .await?;

    if applied.is_empty() {
        return Ok(Json(PickResponse {
            success: true,
            message: "No applied companies".into(),
            data: PickData {
                companies: Vec::new(),
                pagination: ComparisonPagination::default(),
            },
        }));
    }

    let mut companies = active_companies()
        .filter(company::Column::Id.is_in(applied))
        .order_by_asc(company::Column::Id)
        .all(&state.db)
        .await?;

    if let Some(keyword) = non_blank(query.keyword.as_deref()) {
        companies.retain(|c| name_matches(&c.name, keyword));
    }

    let total_items = companies.len() as u64;
    let window = page.slice(&companies).to_vec();

    let snapshot = load_rankings(&state.db).await?;
    let ids: Vec<Uuid> = window.iter().map(|c| c.id).collect();
    let mut tags = category_tags(&state.db, &ids).await?;

    let data = window
        .into_iter()
        .map(|m| {
            let (company, revenue_rank) = summarize(m, &mut tags, &snapshot);
            PickedCompany {
                company,
                sales_revenue_rank: revenue_rank,
            }
        })
        .collect();

    Ok(Json(PickResponse {
        success: true,
        message: "Applied companies retrieved".into(),
        data: PickData {
            companies: data,
            pagination: ComparisonPagination::new(&page, total_items),
        },
    }))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "Comparison",
    operation_id = "searchCompanies",
    summary = "Search companies with ranks",
    description = "Pages through all active companies whose name contains `keyword` (case-insensitive), attaching ranks computed over all active companies. No match is a 200 with `totalItems: 0`.",
    params(ComparisonQuery),
    responses(
        (status = 200, description = "Matching companies with ranks", body = SearchResponse),
        (status = 400, description = "Malformed query (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, query), fields(keyword = ?query.keyword, page = ?query.page))]
pub async fn search(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ComparisonQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let page = PageRequest::new(
        floor_param(query.page),
        floor_param(query.limit),
        DEFAULT_COMPARISON_LIMIT,
    );

    let mut select = active_companies();
    if let Some(keyword) = non_blank(query.keyword.as_deref()) {
        select = select.filter(ilike(company::Column::Name, keyword));
    }

    // Count and page are separate reads; concurrent writes may skew them.
    let total_items = select.clone().count(&state.db).await?;
    let window = select
        .order_by_asc(company::Column::Id)
        .offset(Some(page.offset()))
        .limit(Some(page.per_page))
        .all(&state.db)
        .await?;

    let snapshot = load_rankings(&state.db).await?;
    let ids: Vec<Uuid> = window.iter().map(|c| c.id).collect();
    let mut tags = category_tags(&state.db, &ids).await?;

    let data = window
        .into_iter()
        .map(|m| {
            let (company, revenue_rank) = summarize(m, &mut tags, &snapshot);
            SearchedCompany {
                company,
                revenue_rank,
            }
        })
        .collect();

    Ok(Json(SearchResponse {
        success: true,
        message: "Companies retrieved".into(),
        data: SearchData {
            companies: data,
            pagination: ComparisonPagination::new(&page, total_items),
        },
    }))
}
