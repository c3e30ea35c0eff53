use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::shared::CategoryTag;

pub const MAIN_PAGE_SIZE: u64 = 10;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MainListQuery {
    /// 1-based page number (default 1).
    pub page: Option<i64>,
    /// `revenueDesc` (default), `revenueAsc`, `employeeDesc` or `employeeAsc`.
    pub filter: Option<String>,
    /// Case-insensitive substring matched against name, description and category labels.
    pub search: Option<String>,
}

/// Sort order of the main listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MainSortKey {
    #[default]
    RevenueDesc,
    RevenueAsc,
    EmployeeDesc,
    EmployeeAsc,
}

impl MainSortKey {
    /// Unknown or missing keys fall back to `revenueDesc`.
    pub fn parse(filter: Option<&str>) -> Self {
        match filter.map(str::trim) {
            Some("revenueAsc") => Self::RevenueAsc,
            Some("employeeDesc") => Self::EmployeeDesc,
            Some("employeeAsc") => Self::EmployeeAsc,
            _ => Self::RevenueDesc,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MainCompanyItem {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub content: String,
    pub category: Vec<CategoryTag>,
    #[serde(with = "common::revenue")]
    #[schema(value_type = String, example = "1000000000000")]
    pub sales_revenue: i64,
    pub employee_cnt: i32,
    pub applicant_cnt: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MainListResponse {
    pub companies: Vec<MainCompanyItem>,
    pub page: u64,
    pub total_pages: u64,
}
