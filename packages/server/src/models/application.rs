use chrono::{DateTime, Utc};
use common::ApplicationStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::shared::CategoryTag;

pub const APPLICATIONS_PER_PAGE: u64 = 10;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub company_id: Uuid,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationListQuery {
    /// 1-based page number (default 1).
    pub page: Option<i64>,
    /// `all` or one of `PENDING`, `ACCEPTED`, `REJECTED` (case-insensitive).
    /// Unrecognized values list everything.
    pub filter: Option<String>,
}

impl ApplicationListQuery {
    /// Status to filter by, or `None` for every status.
    pub fn status_filter(&self) -> Option<ApplicationStatus> {
        self.filter.as_deref().and_then(|f| f.parse().ok())
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::application::Model> for ApplicationResponse {
    fn from(m: crate::entity::application::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            company_id: m.company_id,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// One of the caller's applications with the company it targets.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListItem {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub content: String,
    pub category: Vec<CategoryTag>,
    pub status: ApplicationStatus,
    /// Applications the company has received from all users.
    pub applicant_cnt: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationListItem>,
    pub page: u64,
    pub total_pages: u64,
}
