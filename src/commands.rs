//! UI-facing commands built on the endpoint wrappers.
//!
//! Endpoint wrappers return `Result`. Screens that only need to show a
//! message and carry on route the result through `report`, which hands the
//! error text to a `Notifier` and swallows it.

use crate::api::{settings, ApiClient, ApiError};

/// Message sink for errors the UI shows but does not act on.
pub trait Notifier {
    fn error(&self, message: &str);
}

/// Notifier that writes to the log. Used by the command-line front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// Report an error through `notifier` and continue.
///
/// Returns the success value, or `None` after reporting.
pub fn report<T>(notifier: &dyn Notifier, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            notifier.error(&e.to_string());
            None
        }
    }
}

/// Load public site settings, reporting failures.
///
/// Returns `true` if the settings were refreshed.
pub async fn load_open_settings(api: &ApiClient, notifier: &dyn Notifier) -> bool {
    report(notifier, settings::fetch_open_settings(api).await).is_some()
}

/// Load public user-registration settings, reporting failures.
pub async fn load_user_open_settings(api: &ApiClient, notifier: &dyn Notifier) -> bool {
    report(notifier, settings::fetch_user_open_settings(api).await).is_some()
}

/// Load the logged-in user's settings, reporting failures.
pub async fn load_user_settings(api: &ApiClient, notifier: &dyn Notifier) -> bool {
    report(notifier, settings::fetch_user_settings(api).await).is_some()
}

/// Logout: zero all tokens and drop per-user settings.
pub async fn logout(api: &ApiClient) {
    log::info!("Logging out");
    api.state().clear_credentials().await;
    log::info!("Logout complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::ClientConfig;
    use crate::state::{AppState, Credentials};

    /// Collects reported messages.
    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_report_passes_success_through() {
        let notifier = RecordingNotifier::default();
        assert_eq!(report(&notifier, Ok::<_, ApiError>(5)), Some(5));
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_report_swallows_error() {
        let notifier = RecordingNotifier::default();
        let result: Result<(), ApiError> = Err(ApiError::Status {
            status: 503,
            body: "maintenance".into(),
        });
        assert_eq!(report(&notifier, result), None);
        assert_eq!(notifier.messages(), vec!["Code 503: maintenance".to_string()]);
    }

    #[tokio::test]
    async fn test_load_user_settings_reports_and_marks_fetched() {
        let server = MockServer::start().await;
        Mock::given(path("/user_api/settings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let state = Arc::new(AppState::with_credentials(Credentials {
            user_token: "user".into(),
            ..Credentials::default()
        }));
        let api = ApiClient::new(&ClientConfig::new(&server.uri()), state);
        let notifier = RecordingNotifier::default();

        assert!(!load_user_settings(&api, &notifier).await);
        assert_eq!(notifier.messages(), vec!["Code 500: boom".to_string()]);
        assert!(api.state().user_settings.read().await.fetched);
    }

    #[tokio::test]
    async fn test_logout_clears_tokens() {
        let state = Arc::new(AppState::with_credentials(Credentials {
            jwt: "addr-jwt".into(),
            ..Credentials::default()
        }));
        let api = ApiClient::new(&ClientConfig::new("http://127.0.0.1:1"), state);

        logout(&api).await;
        assert!(api.state().credentials().await.jwt.is_empty());
    }
}
