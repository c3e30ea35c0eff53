use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{application, bookmark, comment, company_category};

/// Indexes that enforce invariants. Failing to create one aborts startup.
fn unique_indexes() -> Vec<(&'static str, IndexCreateStatement)> {
    vec![
        // One application per user and company; also serves per-user listing
        (
            "uq_application_user_company",
            Index::create()
                .if_not_exists()
                .unique()
                .name("uq_application_user_company")
                .table(application::Entity)
                .col(application::Column::UserId)
                .col(application::Column::CompanyId)
                .to_owned(),
        ),
    ]
}

/// Lookup indexes. Failures are logged, not fatal.
fn indexes() -> Vec<(&'static str, IndexCreateStatement)> {
    vec![
        // Applicant counts: GROUP BY company_id
        (
            "idx_application_company",
            Index::create()
                .if_not_exists()
                .name("idx_application_company")
                .table(application::Entity)
                .col(application::Column::CompanyId)
                .to_owned(),
        ),
        (
            "idx_bookmark_user_company",
            Index::create()
                .if_not_exists()
                .name("idx_bookmark_user_company")
                .table(bookmark::Entity)
                .col(bookmark::Column::UserId)
                .col(bookmark::Column::CompanyId)
                .to_owned(),
        ),
        (
            "idx_comment_company_created",
            Index::create()
                .if_not_exists()
                .name("idx_comment_company_created")
                .table(comment::Entity)
                .col(comment::Column::CompanyId)
                .col(comment::Column::CreatedAt)
                .to_owned(),
        ),
        // Category search and category delete go through category_id
        (
            "idx_company_category_category",
            Index::create()
                .if_not_exists()
                .name("idx_company_category_category")
                .table(company_category::Entity)
                .col(company_category::Column::CategoryId)
                .to_owned(),
        ),
    ]
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't create composite indexes, so they are
/// created manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    for (name, stmt) in unique_indexes() {
        db.execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
            .await?;
        info!("Ensured unique index {} exists", name);
    }
    for (name, stmt) in indexes() {
        match db
            .execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
            .await
        {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }
    Ok(())
}
