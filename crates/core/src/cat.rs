//! The `Cat` entity and its client-writable creation input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::CatId;

/// A persisted cat.
///
/// `id` and `created_at` are assigned by the service on creation and never
/// change afterwards. `user_id` is a reserved owner slot that no operation
/// currently sets or filters on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    pub id: CatId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub breed: String,
    pub color: String,
}

impl Cat {
    /// Assemble a cat from system-assigned fields and client input.
    pub fn from_input(id: CatId, created_at: DateTime<Utc>, input: CatDto) -> Self {
        Self {
            id,
            user_id: None,
            created_at,
            name: input.name,
            date_of_birth: input.date_of_birth,
            breed: input.breed,
            color: input.color,
        }
    }
}

/// Creation payload for a cat.
///
/// Carries no id or timestamp, so clients cannot forge them. Extra JSON keys
/// such as `id` or `createdAt` are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatDto {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub breed: String,
    pub color: String,
}
