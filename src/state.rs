//! Session state shared between the UI and the API client.
//!
//! Holds the four credential channels, the settings snapshots rebuilt by
//! the endpoint wrappers, the loading indicator and the two auth dialog
//! toggles. Tokens are zeroed on logout via `clear_credentials()`.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use zeroize::Zeroize;

use crate::settings::{AccountSettings, OpenSettings, UserOpenSettings, UserSettings};

/// Credential channels sent with every request.
///
/// An empty string means the token is absent. The backend ignores empty
/// tokens, so they are still sent as empty headers.
#[derive(Debug, Clone, Default, Zeroize)]
pub struct Credentials {
    /// End-user session token (`x-user-token`).
    pub user_token: String,
    /// Site-wide access password (`x-custom-auth`).
    pub custom_auth: String,
    /// Admin password (`x-admin-auth`).
    pub admin_auth: String,
    /// Address JWT sent as `Authorization: Bearer <jwt>`.
    pub jwt: String,
}

/// Application session passed to `ApiClient::new`.
///
/// The client only reads credentials; it writes settings snapshots, the
/// loading flag and the dialog toggles.
#[derive(Debug, Default)]
pub struct AppState {
    pub credentials: RwLock<Credentials>,

    /// Public configuration from `/open_api/settings`.
    pub open_settings: RwLock<OpenSettings>,

    /// Address account settings from `/api/settings`.
    pub settings: RwLock<AccountSettings>,

    pub user_open_settings: RwLock<UserOpenSettings>,
    pub user_settings: RwLock<UserSettings>,

    /// True while any request is in flight. Best-effort UI indicator.
    loading: AtomicBool,

    /// Site password dialog should be shown.
    show_auth: AtomicBool,

    /// Admin password dialog should be shown.
    show_admin_auth: AtomicBool,
}

impl AppState {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the given credentials already set.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
            ..Self::default()
        }
    }

    /// Snapshot of the current credentials for building request headers.
    pub async fn credentials(&self) -> Credentials {
        self.credentials.read().await.clone()
    }

    /// Enable or disable password-gated access for the site.
    pub async fn set_access_gated(&self, gated: bool) {
        self.open_settings.write().await.auth = gated;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Mark a request as in flight until the returned guard is dropped.
    pub fn begin_loading(&self) -> LoadingGuard<'_> {
        self.loading.store(true, Ordering::SeqCst);
        LoadingGuard { state: self }
    }

    pub fn show_auth_dialog(&self) {
        self.show_auth.store(true, Ordering::SeqCst);
    }

    pub fn show_admin_auth_dialog(&self) {
        self.show_admin_auth.store(true, Ordering::SeqCst);
    }

    pub fn is_auth_dialog_shown(&self) -> bool {
        self.show_auth.load(Ordering::SeqCst)
    }

    pub fn is_admin_auth_dialog_shown(&self) -> bool {
        self.show_admin_auth.load(Ordering::SeqCst)
    }

    /// Hide both auth dialogs (after the user submitted a password).
    pub fn dismiss_auth_dialogs(&self) {
        self.show_auth.store(false, Ordering::SeqCst);
        self.show_admin_auth.store(false, Ordering::SeqCst);
    }

    /// Zero all tokens and forget per-user snapshots.
    ///
    /// Open settings are public and survive logout.
    pub async fn clear_credentials(&self) {
        {
            let mut creds = self.credentials.write().await;
            creds.zeroize();
        }

        *self.settings.write().await = AccountSettings::default();
        *self.user_settings.write().await = UserSettings::default();
        self.dismiss_auth_dialogs();
    }
}

/// Holds the loading flag for the duration of one request.
///
/// Dropping the guard clears the flag, so it is released on success,
/// on error and on early return alike.
#[must_use = "the loading flag is cleared as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    state: &'a AppState,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.loading.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_guard_releases_on_drop() {
        let state = AppState::new();
        assert!(!state.is_loading());
        {
            let _guard = state.begin_loading();
            assert!(state.is_loading());
        }
        assert!(!state.is_loading());
    }

    #[test]
    fn test_loading_guard_releases_on_early_return() {
        fn fails(state: &AppState) -> Result<(), String> {
            let _guard = state.begin_loading();
            let step: Result<(), String> = Err("boom".to_string());
            step?;
            Ok(())
        }

        let state = AppState::new();
        assert!(fails(&state).is_err());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_dialog_flags() {
        let state = AppState::new();
        assert!(!state.is_auth_dialog_shown());
        assert!(!state.is_admin_auth_dialog_shown());

        state.show_auth_dialog();
        state.show_admin_auth_dialog();
        assert!(state.is_auth_dialog_shown());
        assert!(state.is_admin_auth_dialog_shown());

        state.dismiss_auth_dialogs();
        assert!(!state.is_auth_dialog_shown());
        assert!(!state.is_admin_auth_dialog_shown());
    }

    #[tokio::test]
    async fn test_clear_credentials() {
        let state = AppState::with_credentials(Credentials {
            user_token: "user".into(),
            custom_auth: "site".into(),
            admin_auth: "admin".into(),
            jwt: "jwt".into(),
        });
        state.settings.write().await.fetched = true;
        state.set_access_gated(true).await;

        state.clear_credentials().await;

        let creds = state.credentials().await;
        assert!(creds.user_token.is_empty());
        assert!(creds.custom_auth.is_empty());
        assert!(creds.admin_auth.is_empty());
        assert!(creds.jwt.is_empty());
        assert!(!state.settings.read().await.fetched);
        // Public settings are kept
        assert!(state.open_settings.read().await.auth);
    }
}
