use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::company;

pub const DEFAULT_COMPARISON_LIMIT: u64 = 5;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComparisonQuery {
    /// 1-based page number (default 1).
    pub page: Option<i64>,
    /// Page size (default 5, at most 100).
    pub limit: Option<i64>,
    /// Case-insensitive substring matched against company names.
    pub keyword: Option<String>,
}

/// Company fields shared by both comparison views.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub content: String,
    pub employee_cnt: i32,
    #[serde(with = "common::revenue")]
    #[schema(value_type = String, example = "1000000000000")]
    pub sales_revenue: i64,
    /// Category labels.
    pub category: Vec<String>,
    pub applicant_count: u64,
    pub applicant_rank: Option<u32>,
    pub employee_rank: Option<u32>,
}

impl CompanySummary {
    pub fn new(
        m: company::Model,
        category: Vec<String>,
        applicant_count: u64,
        applicant_rank: Option<u32>,
        employee_rank: Option<u32>,
    ) -> Self {
        Self {
            id: m.id,
            name: m.name,
            image: m.image,
            content: m.content,
            employee_cnt: m.employee_cnt,
            sales_revenue: m.sales_revenue,
            category,
            applicant_count,
            applicant_rank,
            employee_rank,
        }
    }
}

/// Entry of the applied-companies view.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickedCompany {
    #[serde(flatten)]
    pub company: CompanySummary,
    pub sales_revenue_rank: Option<u32>,
}

/// Entry of the all-companies search view.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchedCompany {
    #[serde(flatten)]
    pub company: CompanySummary,
    pub revenue_rank: Option<u32>,
}

/// Page metadata. Serialized as `{}` when the caller has no applications.
#[derive(Serialize, Debug, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u64>,
}

impl ComparisonPagination {
    pub fn new(page: &common::PageRequest, total_items: u64) -> Self {
        Self {
            current_page: Some(page.page),
            total_pages: Some(page.total_pages(total_items)),
            total_items: Some(total_items),
            items_per_page: Some(page.per_page),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PickData {
    pub companies: Vec<PickedCompany>,
    pub pagination: ComparisonPagination,
}

#[derive(Serialize, ToSchema)]
pub struct PickResponse {
    pub success: bool,
    pub message: String,
    pub data: PickData,
}

#[derive(Serialize, ToSchema)]
pub struct SearchData {
    pub companies: Vec<SearchedCompany>,
    pub pagination: ComparisonPagination,
}

#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub message: String,
    pub data: SearchData,
}
