use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::shared::validate_text;
use crate::error::AppError;

#[derive(Deserialize, ToSchema)]
pub struct CategoryRequest {
    /// Category label. Labels need not be unique.
    #[schema(example = "Fintech")]
    pub category: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::category::Model> for CategoryResponse {
    fn from(m: crate::entity::category::Model) -> Self {
        Self {
            id: m.id,
            category: m.label,
            created_at: m.created_at,
        }
    }
}

pub fn validate_category_request(req: &CategoryRequest) -> Result<(), AppError> {
    validate_text(&req.category, "Category", 64)
}
