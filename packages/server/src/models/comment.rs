use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::shared::validate_text;
use crate::error::AppError;

pub const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub company_id: Uuid,
    #[schema(example = "Great place to work")]
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Serialize, ToSchema)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub nickname: String,
}

#[derive(Serialize, ToSchema)]
pub struct CommentCompany {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub user: CommentAuthor,
    pub company: CommentCompany,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(
        m: crate::entity::comment::Model,
        author: &crate::entity::user::Model,
        company: &crate::entity::company::Model,
    ) -> Self {
        Self {
            id: m.id,
            content: m.content,
            user: CommentAuthor {
                id: author.id,
                nickname: author.nickname.clone(),
            },
            company: CommentCompany {
                id: company.id,
                name: company.name.clone(),
            },
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_comment_content(content: &str) -> Result<(), AppError> {
    validate_text(content, "Content", MAX_COMMENT_CHARS)
}
