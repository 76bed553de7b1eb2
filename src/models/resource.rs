//! Resource-related models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable entity (doctor, room, equipment) belonging to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /resources/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}
