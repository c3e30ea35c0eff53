use axum::Json;
use axum::extract::State;
use common::PageRequest;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{category, company, company_category};
use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::main_listing::*;
use crate::models::shared::{floor_param, non_blank};
use crate::state::AppState;
use crate::utils::company::{active_companies, applicant_counts, category_tags, ilike};

/// Name, description or any category label contains `term`.
fn search_condition(term: &str) -> Condition {
    let labelled = SeaQuery::select()
        .column((company_category::Entity, company_category::Column::CompanyId))
        .from(company_category::Entity)
        .inner_join(
            category::Entity,
            Expr::col((category::Entity, category::Column::Id))
                .equals((company_category::Entity, company_category::Column::CategoryId)),
        )
        .and_where(ilike((category::Entity, category::Column::Label), term))
        .to_owned();

    Condition::any()
        .add(ilike(company::Column::Name, term))
        .add(ilike(company::Column::Content, term))
        .add(company::Column::Id.in_subquery(labelled))
}

fn sorted(select: Select<company::Entity>, key: MainSortKey) -> Select<company::Entity> {
    let (column, order) = match key {
        MainSortKey::RevenueDesc => (company::Column::SalesRevenue, Order::Desc),
        MainSortKey::RevenueAsc => (company::Column::SalesRevenue, Order::Asc),
        MainSortKey::EmployeeDesc => (company::Column::EmployeeCnt, Order::Desc),
        MainSortKey::EmployeeAsc => (company::Column::EmployeeCnt, Order::Asc),
    };
    select
        .order_by(column, order)
        .order_by_asc(company::Column::Id)
}

#[utoipa::path(
    get,
    path = "/companies",
    tag = "Main",
    operation_id = "listMainCompanies",
    summary = "Browse companies",
    description = "Ten per page. `filter` picks the sort (`revenueDesc` by default, also for unknown values). `search` matches name, description or category label, case-insensitively. No ranks are attached.",
    params(MainListQuery),
    responses(
        (status = 200, description = "A page of companies", body = MainListResponse),
        (status = 400, description = "Malformed query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(page = ?query.page, filter = ?query.filter, search = ?query.search))]
pub async fn list_main_companies(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MainListQuery>,
) -> Result<Json<MainListResponse>, AppError> {
    let page = PageRequest::new(floor_param(query.page), None, MAIN_PAGE_SIZE);
    let key = MainSortKey::parse(query.filter.as_deref());

    let mut select = active_companies();
    if let Some(term) = non_blank(query.search.as_deref()) {
        select = select.filter(search_condition(term));
    }

    let total = select.clone().count(&state.db).await?;
    let rows = sorted(select, key)
        .offset(Some(page.offset()))
        .limit(Some(page.per_page))
        .all(&state.db)
        .await?;

    let ids: Vec<Uuid> = rows.iter().map(|c| c.id).collect();
    let mut tags = category_tags(&state.db, &ids).await?;
    let counts = applicant_counts(&state.db, Some(&ids)).await?;

    let companies = rows
        .into_iter()
        .map(|c| MainCompanyItem {
            category: tags.remove(&c.id).unwrap_or_default(),
            applicant_cnt: counts.get(&c.id).copied().unwrap_or(0),
            id: c.id,
            name: c.name,
            image: c.image,
            content: c.content,
            sales_revenue: c.sales_revenue,
            employee_cnt: c.employee_cnt,
            created_at: c.created_at,
            updated_at: c.updated_at,
        })
        .collect();

    Ok(Json(MainListResponse {
        companies,
        page: page.page,
        total_pages: page.total_pages(total),
    }))
}
