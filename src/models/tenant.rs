//! Tenant-related models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business account owning WhatsApp/Calendar credentials and data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub whatsapp_phone_number_id: String,
    pub whatsapp_access_token: String,
    pub webhook_verify_token: Option<String>,
    pub google_calendar_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /tenants/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TenantCreate {
    pub name: String,
    pub whatsapp_phone_number_id: String,
    pub whatsapp_access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_verify_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_calendar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_service_account_json: Option<String>,
}

/// Payload for `PATCH /tenants/me`.
///
/// Only fields the operator actually filled in are serialized. Blank strings
/// are dropped by [`TenantUpdate::cleaned`] so stored secrets are never
/// overwritten with empty values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TenantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_verify_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_calendar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_service_account_json: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TenantUpdate {
    /// Drop empty-string fields so they are omitted from the PATCH payload.
    pub fn cleaned(self) -> Self {
        Self {
            name: non_empty(self.name),
            whatsapp_access_token: non_empty(self.whatsapp_access_token),
            webhook_verify_token: non_empty(self.webhook_verify_token),
            google_calendar_id: non_empty(self.google_calendar_id),
            google_service_account_json: non_empty(self.google_service_account_json),
        }
    }

    /// True when there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.whatsapp_access_token.is_none()
            && self.webhook_verify_token.is_none()
            && self.google_calendar_id.is_none()
            && self.google_service_account_json.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_omits_blank_fields() {
        let update = TenantUpdate {
            name: Some(String::new()),
            whatsapp_access_token: Some("abc".to_string()),
            ..Default::default()
        }
        .cleaned();

        let payload = serde_json::to_value(&update).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({ "whatsapp_access_token": "abc" })
        );
    }

    #[test]
    fn test_cleaned_treats_whitespace_as_blank() {
        let update = TenantUpdate {
            name: Some("   ".to_string()),
            ..Default::default()
        }
        .cleaned();
        assert!(update.is_empty());
    }

    #[test]
    fn test_all_blank_update_is_empty() {
        let update = TenantUpdate::default().cleaned();
        assert!(update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_create_omits_unset_optionals() {
        let create = TenantCreate {
            name: "Acme Clinic".to_string(),
            whatsapp_phone_number_id: "12345".to_string(),
            whatsapp_access_token: "tok".to_string(),
            ..Default::default()
        };
        let payload = serde_json::to_value(&create).unwrap();
        assert!(payload.get("webhook_verify_token").is_none());
        assert!(payload.get("google_calendar_id").is_none());
    }
}
