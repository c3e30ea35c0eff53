use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::shared::{CategoryTag, double_option, validate_text};
use crate::error::AppError;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    #[schema(example = "Toss")]
    pub name: String,
    /// Free-text description.
    pub content: String,
    pub image: Option<String>,
    /// Decimal string or JSON integer.
    #[serde(with = "common::revenue")]
    #[schema(value_type = String, example = "1000000000000")]
    pub sales_revenue: i64,
    #[schema(example = 50)]
    pub employee_cnt: i32,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub content: Option<String>,
    /// `null` clears the image.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    #[serde(default, with = "common::revenue::option")]
    #[schema(value_type = Option<String>)]
    pub sales_revenue: Option<i64>,
    pub employee_cnt: Option<i32>,
    /// Replaces the whole category set when present.
    pub category_ids: Option<Vec<Uuid>>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(with = "common::revenue")]
    #[schema(value_type = String, example = "1000000000000")]
    pub sales_revenue: i64,
    pub employee_cnt: i32,
    pub category: Vec<CategoryTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyResponse {
    pub fn new(m: crate::entity::company::Model, category: Vec<CategoryTag>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            content: m.content,
            image: m.image,
            sales_revenue: m.sales_revenue,
            employee_cnt: m.employee_cnt,
            category,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() || content.len() > 100_000 {
        return Err(AppError::Validation(
            "Content must be non-empty and at most 100KB".into(),
        ));
    }
    Ok(())
}

fn validate_employee_cnt(cnt: i32) -> Result<(), AppError> {
    if cnt < 0 {
        return Err(AppError::Validation(
            "employeeCnt must not be negative".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_company(req: &CreateCompanyRequest) -> Result<(), AppError> {
    validate_text(&req.name, "Name", 100)?;
    validate_content(&req.content)?;
    validate_employee_cnt(req.employee_cnt)
}

pub fn validate_update_company(req: &UpdateCompanyRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_text(name, "Name", 100)?;
    }
    if let Some(ref content) = req.content {
        validate_content(content)?;
    }
    if let Some(cnt) = req.employee_cnt {
        validate_employee_cnt(cnt)?;
    }
    Ok(())
}
