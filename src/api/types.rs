//! Response types for the temp-mail backend API.
//!
//! Fields mirror the backend's JSON keys. Every field is optional because
//! the client falls back to defaults for anything missing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response from GET /open_api/settings.
///
/// A field of the wrong type reads as absent so the rest still merges.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenSettingsResponse {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub prefix: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub min_address_len: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub max_address_len: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub need_auth: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub domains: Option<Vec<String>>,
    /// Display labels, parallel to `domains`. May be shorter.
    #[serde(deserialize_with = "lenient")]
    pub domain_labels: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub admin_contact: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub enable_user_create_email: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub enable_user_delete_email: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub enable_auto_reply: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub enable_index_about: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub copyright: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cf_turnstile_site_key: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub enable_webhook: Option<bool>,
    #[serde(rename = "isS3Enabled", deserialize_with = "lenient")]
    pub is_s3_enabled: Option<bool>,
}

/// Response from GET /api/settings (snake_case on the wire).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountSettingsResponse {
    pub address: Option<String>,
    pub auto_reply: Option<serde_json::Value>,
    pub send_balance: Option<i64>,
}

/// Response from GET /admin/show_password/:id.
#[derive(Debug, Deserialize)]
pub struct AddressCredentialResponse {
    /// Address JWT usable as a bearer token.
    pub jwt: String,
}

/// Read a field as `T`, or `None` when it is null or of another type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}
