//! Settings snapshots kept on `AppState`.
//!
//! Each snapshot is rebuilt from a backend response with a per-field
//! fallback: a field that is missing, empty, zero or false in the response
//! takes its default instead.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::types::{AccountSettingsResponse, OpenSettingsResponse};

/// Default lower bound for a new address name.
pub const DEFAULT_MIN_ADDRESS_LEN: u32 = 1;

/// Default upper bound for a new address name.
pub const DEFAULT_MAX_ADDRESS_LEN: u32 = 30;

/// A selectable mail domain with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainOption {
    pub label: String,
    pub value: String,
}

/// Public site configuration visible to every visitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSettings {
    /// Password-gated access is enabled. Set by the caller, never by a fetch.
    pub auth: bool,
    pub title: String,
    pub prefix: String,
    pub min_address_len: u32,
    pub max_address_len: u32,
    pub need_auth: bool,
    pub domains: Vec<DomainOption>,
    pub admin_contact: String,
    pub enable_user_create_email: bool,
    pub enable_user_delete_email: bool,
    pub enable_auto_reply: bool,
    pub enable_index_about: bool,
    pub copyright: String,
    pub cf_turnstile_site_key: String,
    pub enable_webhook: bool,
    pub is_s3_enabled: bool,
}

impl Default for OpenSettings {
    fn default() -> Self {
        Self {
            auth: false,
            title: String::new(),
            prefix: String::new(),
            min_address_len: DEFAULT_MIN_ADDRESS_LEN,
            max_address_len: DEFAULT_MAX_ADDRESS_LEN,
            need_auth: false,
            domains: Vec::new(),
            admin_contact: String::new(),
            enable_user_create_email: false,
            enable_user_delete_email: false,
            enable_auto_reply: false,
            enable_index_about: false,
            copyright: String::new(),
            cf_turnstile_site_key: String::new(),
            enable_webhook: false,
            is_s3_enabled: false,
        }
    }
}

impl OpenSettings {
    /// Overwrite every fetched field from `res`.
    ///
    /// `auth` is untouched and `copyright` keeps its previous value when
    /// the response has none.
    pub fn merge_response(&mut self, res: OpenSettingsResponse) {
        let domains = pair_domain_labels(
            res.domains.unwrap_or_default(),
            res.domain_labels.unwrap_or_default(),
        );

        self.title = non_empty(res.title).unwrap_or_default();
        self.prefix = non_empty(res.prefix).unwrap_or_default();
        self.min_address_len = non_zero(res.min_address_len).unwrap_or(DEFAULT_MIN_ADDRESS_LEN);
        self.max_address_len = non_zero(res.max_address_len).unwrap_or(DEFAULT_MAX_ADDRESS_LEN);
        self.need_auth = res.need_auth.unwrap_or(false);
        self.domains = domains;
        self.admin_contact = non_empty(res.admin_contact).unwrap_or_default();
        self.enable_user_create_email = res.enable_user_create_email.unwrap_or(false);
        self.enable_user_delete_email = res.enable_user_delete_email.unwrap_or(false);
        self.enable_auto_reply = res.enable_auto_reply.unwrap_or(false);
        self.enable_index_about = res.enable_index_about.unwrap_or(false);
        if let Some(copyright) = non_empty(res.copyright) {
            self.copyright = copyright;
        }
        self.cf_turnstile_site_key = non_empty(res.cf_turnstile_site_key).unwrap_or_default();
        self.enable_webhook = res.enable_webhook.unwrap_or(false);
        self.is_s3_enabled = res.is_s3_enabled.unwrap_or(false);
    }
}

/// Pair each domain with the label at the same index, or with itself when
/// the label list is shorter.
pub fn pair_domain_labels(domains: Vec<String>, labels: Vec<String>) -> Vec<DomainOption> {
    let mut labels = labels.into_iter();
    domains
        .into_iter()
        .map(|value| {
            let label = labels.next().unwrap_or_else(|| value.clone());
            DomainOption { label, value }
        })
        .collect()
}

/// Settings of the address identified by the bearer JWT.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountSettings {
    pub address: Option<String>,
    pub auto_reply: Option<Value>,
    pub send_balance: Option<i64>,
    /// A fetch attempt has completed, successfully or not.
    pub fetched: bool,
}

impl AccountSettings {
    /// Replace the snapshot wholesale. `fetched` is reset until the caller
    /// marks the attempt complete.
    pub fn replace_with(&mut self, res: AccountSettingsResponse) {
        *self = Self {
            address: res.address,
            auto_reply: res.auto_reply,
            send_balance: res.send_balance,
            fetched: false,
        };
    }
}

/// Public user-registration settings. Keys are whatever the backend sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserOpenSettings {
    pub values: Map<String, Value>,
}

impl UserOpenSettings {
    pub fn merge(&mut self, values: Map<String, Value>) {
        self.values.extend(values);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// Settings of the logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserSettings {
    #[serde(flatten)]
    pub values: Map<String, Value>,
    /// A fetch attempt has completed, successfully or not.
    pub fetched: bool,
}

/// Key reserved for the local `fetched` flag in serialized output.
const FETCHED_KEY: &str = "fetched";

impl UserSettings {
    /// Merge backend keys. A backend `fetched` key is dropped so it cannot
    /// collide with the local flag.
    pub fn merge(&mut self, values: Map<String, Value>) {
        self.values
            .extend(values.into_iter().filter(|(key, _)| key != FETCHED_KEY));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|&n| n != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> OpenSettingsResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_domain_labels_fall_back_to_value() {
        let domains = pair_domain_labels(
            vec!["a".into(), "b".into()],
            vec!["Alpha".into()],
        );
        assert_eq!(
            domains,
            vec![
                DomainOption { label: "Alpha".into(), value: "a".into() },
                DomainOption { label: "b".into(), value: "b".into() },
            ]
        );
    }

    #[test]
    fn test_extra_labels_ignored() {
        let domains = pair_domain_labels(vec!["a".into()], vec!["A".into(), "B".into()]);
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].label, "A");
    }

    #[test]
    fn test_merge_applies_defaults() {
        let mut settings = OpenSettings::default();
        settings.merge_response(response(json!({
            "title": "",
            "minAddressLen": 0,
            "domains": ["example.com"],
        })));

        assert_eq!(settings.title, "");
        assert_eq!(settings.min_address_len, DEFAULT_MIN_ADDRESS_LEN);
        assert_eq!(settings.max_address_len, DEFAULT_MAX_ADDRESS_LEN);
        assert!(!settings.need_auth);
        assert_eq!(settings.domains[0].label, "example.com");
    }

    #[test]
    fn test_merge_overwrites_stale_values() {
        let mut settings = OpenSettings::default();
        settings.merge_response(response(json!({
            "title": "Old",
            "enableWebhook": true,
            "isS3Enabled": true,
            "domains": ["old.com"],
        })));
        settings.merge_response(response(json!({ "domains": [] })));

        assert_eq!(settings.title, "");
        assert!(!settings.enable_webhook);
        assert!(!settings.is_s3_enabled);
        assert!(settings.domains.is_empty());
    }

    #[test]
    fn test_merge_keeps_copyright_and_auth() {
        let mut settings = OpenSettings {
            auth: true,
            copyright: "Example Co".into(),
            ..OpenSettings::default()
        };
        settings.merge_response(response(json!({ "copyright": "", "domains": [] })));
        assert!(settings.auth);
        assert_eq!(settings.copyright, "Example Co");

        settings.merge_response(response(json!({ "copyright": "New Co", "domains": [] })));
        assert_eq!(settings.copyright, "New Co");
    }

    #[test]
    fn test_account_settings_replaced_wholesale() {
        let mut settings = AccountSettings {
            address: Some("old@example.com".into()),
            send_balance: Some(3),
            fetched: true,
            ..AccountSettings::default()
        };
        settings.replace_with(AccountSettingsResponse {
            address: Some("new@example.com".into()),
            ..AccountSettingsResponse::default()
        });

        assert_eq!(settings.address.as_deref(), Some("new@example.com"));
        assert_eq!(settings.send_balance, None);
        assert!(!settings.fetched);
    }

    #[test]
    fn test_user_settings_merge_keeps_previous_keys() {
        let mut settings = UserSettings::default();
        settings.merge(json!({ "user_email": "a@b.c", "user_id": 1 }).as_object().unwrap().clone());
        settings.merge(json!({ "user_id": 2 }).as_object().unwrap().clone());

        assert_eq!(settings.get("user_email"), Some(&json!("a@b.c")));
        assert_eq!(settings.get("user_id"), Some(&json!(2)));
    }

    #[test]
    fn test_user_settings_ignores_backend_fetched_key() {
        let mut settings = UserSettings::default();
        settings.merge(json!({ "fetched": "x", "user_id": 1 }).as_object().unwrap().clone());
        settings.fetched = true;

        assert_eq!(settings.get("fetched"), None);
        let rendered = serde_json::to_string(&settings).unwrap();
        assert_eq!(rendered.matches("\"fetched\"").count(), 1);
        assert_eq!(serde_json::to_value(&settings).unwrap()["fetched"], json!(true));
    }

    #[test]
    fn test_merge_wrong_typed_field_keeps_others() {
        let mut settings = OpenSettings::default();
        settings.merge_response(response(json!({
            "title": "Temp Mail",
            "domains": ["a.com", "b.com"],
            "minAddressLen": "5",
            "copyright": null,
        })));

        assert_eq!(settings.title, "Temp Mail");
        assert_eq!(settings.domains.len(), 2);
        assert_eq!(settings.min_address_len, DEFAULT_MIN_ADDRESS_LEN);
    }
}
