use std::collections::HashMap;

use common::{CompanyMetrics, Rankings};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, SimpleExpr};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{application, category, company, company_category};
use crate::error::AppError;
use crate::models::shared::{CategoryTag, escape_like};

/// Companies that have not been soft-deleted.
pub fn active_companies() -> Select<company::Entity> {
    company::Entity::find().filter(company::Column::DeletedAt.is_null())
}

/// Load an active company or fail with 404.
pub async fn find_active_company<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<company::Model, AppError> {
    active_companies()
        .filter(company::Column::Id.eq(id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".into()))
}

/// Case-insensitive substring match of `column` against `term`.
pub fn ilike(column: impl sea_orm::sea_query::IntoColumnRef, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{}%", escape_like(&term.to_lowercase()))).escape('\\'))
}

/// Category tags for each of `company_ids`, ordered by label.
pub async fn category_tags<C: ConnectionTrait>(
    db: &C,
    company_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<CategoryTag>>, DbErr> {
    let mut tags: HashMap<Uuid, Vec<CategoryTag>> = HashMap::new();
    if company_ids.is_empty() {
        return Ok(tags);
    }

    let rows = company_category::Entity::find()
        .filter(company_category::Column::CompanyId.is_in(company_ids.to_vec()))
        .find_also_related(category::Entity)
        .order_by_asc(category::Column::Label)
        .all(db)
        .await?;

    for (link, cat) in rows {
        if let Some(cat) = cat {
            tags.entry(link.company_id).or_default().push(cat.into());
        }
    }
    Ok(tags)
}

/// Number of applications per company. With `company_ids`, only those
/// companies are counted; companies without applications are absent.
pub async fn applicant_counts<C: ConnectionTrait>(
    db: &C,
    company_ids: Option<&[Uuid]>,
) -> Result<HashMap<Uuid, u64>, DbErr> {
    let mut select = application::Entity::find()
        .select_only()
        .column(application::Column::CompanyId)
        .column_as(application::Column::Id.count(), "applicants")
        .group_by(application::Column::CompanyId);

    if let Some(ids) = company_ids {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        select = select.filter(application::Column::CompanyId.is_in(ids.to_vec()));
    }

    let rows: Vec<(Uuid, i64)> = select.into_tuple().all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(id, count)| (id, std::cmp::Ord::max(count, 0) as u64))
        .collect())
}

/// Rankings over every active company plus the applicant counts they were built from.
pub struct RankingSnapshot {
    pub rankings: Rankings<Uuid>,
    pub applicant_counts: HashMap<Uuid, u64>,
}

impl RankingSnapshot {
    pub fn applicant_count(&self, id: &Uuid) -> u64 {
        self.applicant_counts.get(id).copied().unwrap_or(0)
    }
}

/// Read the current company and application snapshot and rank it.
///
/// Recomputed on every call; nothing is cached between requests.
pub async fn load_rankings<C: ConnectionTrait>(db: &C) -> Result<RankingSnapshot, DbErr> {
    let rows: Vec<(Uuid, i64, i32)> = active_companies()
        .select_only()
        .column(company::Column::Id)
        .column(company::Column::SalesRevenue)
        .column(company::Column::EmployeeCnt)
        .order_by_asc(company::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    let applicant_counts = applicant_counts(db, None).await?;

    let metrics: Vec<CompanyMetrics<Uuid>> = rows
        .into_iter()
        .map(|(id, revenue, employees)| CompanyMetrics {
            id,
            revenue,
            employees,
            applicants: applicant_counts.get(&id).copied().unwrap_or(0),
        })
        .collect();

    Ok(RankingSnapshot {
        rankings: Rankings::compute(&metrics),
        applicant_counts,
    })
}

/// Replace the category set of a company. Every id must exist.
pub async fn replace_categories<C: ConnectionTrait>(
    db: &C,
    company_id: Uuid,
    category_ids: &[Uuid],
) -> Result<(), AppError> {
    let mut unique = category_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    if !unique.is_empty() {
        let found = category::Entity::find()
            .filter(category::Column::Id.is_in(unique.clone()))
            .count(db)
            .await?;
        if found != unique.len() as u64 {
            return Err(AppError::Validation("Unknown category id".into()));
        }
    }

    company_category::Entity::delete_many()
        .filter(company_category::Column::CompanyId.eq(company_id))
        .exec(db)
        .await?;

    if unique.is_empty() {
        return Ok(());
    }

    let links = unique.into_iter().map(|category_id| company_category::ActiveModel {
        company_id: Set(company_id),
        category_id: Set(category_id),
        ..Default::default()
    });
    company_category::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}
