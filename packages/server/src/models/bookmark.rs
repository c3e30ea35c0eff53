use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRequest {
    pub company_id: Uuid,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A bookmark together with the company it points at.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkListItem {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::bookmark::Model> for BookmarkResponse {
    fn from(m: crate::entity::bookmark::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            company_id: m.company_id,
            created_at: m.created_at,
            deleted_at: m.deleted_at,
        }
    }
}
