//! Settings endpoints: public, account and user settings.
//!
//! Each fetch shapes the response into the matching snapshot on
//! `AppState`. Account and user settings mark `fetched` once the attempt
//! completes, whether it succeeded, failed or was skipped.

use serde_json::{Map, Value};

use super::client::{ApiClient, ApiError};
use super::types::{AccountSettingsResponse, OpenSettingsResponse};

/// Literal some callers store when the JWT was never set.
const UNSET_TOKEN: &str = "undefined";

/// Fetch the public site settings and merge them onto `open_settings`.
///
/// GET /open_api/settings. Raises the auth dialog when the site reports
/// that a password is required.
pub async fn fetch_open_settings(api: &ApiClient) -> Result<(), ApiError> {
    let value = api.get("/open_api/settings").await?;
    let res: OpenSettingsResponse = decode(value, "open settings")?;

    let need_auth = {
        let mut open_settings = api.state().open_settings.write().await;
        open_settings.merge_response(res);
        open_settings.need_auth
    };

    if need_auth {
        log::info!("Site requires an access password");
        api.state().show_auth_dialog();
    }
    Ok(())
}

/// Fetch the settings of the address behind the bearer JWT.
///
/// GET /api/settings. Skipped when no JWT is set.
pub async fn fetch_account_settings(api: &ApiClient) -> Result<(), ApiError> {
    let result = load_account_settings(api).await;
    api.state().settings.write().await.fetched = true;
    result
}

async fn load_account_settings(api: &ApiClient) -> Result<(), ApiError> {
    let jwt = api.state().credentials.read().await.jwt.clone();
    if !has_jwt(&jwt) {
        log::debug!("No address JWT, account settings skipped");
        return Ok(());
    }

    let value = api.get("/api/settings").await?;
    let res: AccountSettingsResponse = decode(value, "account settings")?;
    api.state().settings.write().await.replace_with(res);
    Ok(())
}

/// Fetch public user-registration settings.
///
/// GET /user_api/open_settings. The whole response object is merged.
pub async fn fetch_user_open_settings(api: &ApiClient) -> Result<(), ApiError> {
    let value = api.get("/user_api/open_settings").await?;
    let values = into_object(value, "user open settings")?;
    api.state().user_open_settings.write().await.merge(values);
    Ok(())
}

/// Fetch the logged-in user's settings.
///
/// GET /user_api/settings. Skipped when no user token is set.
pub async fn fetch_user_settings(api: &ApiClient) -> Result<(), ApiError> {
    let result = load_user_settings(api).await;
    api.state().user_settings.write().await.fetched = true;
    result
}

async fn load_user_settings(api: &ApiClient) -> Result<(), ApiError> {
    if api.state().credentials.read().await.user_token.is_empty() {
        log::debug!("No user token, user settings skipped");
        return Ok(());
    }

    let value = api.get("/user_api/settings").await?;
    let values = into_object(value, "user settings")?;
    api.state().user_settings.write().await.merge(values);
    Ok(())
}

/// A JWT counts as set unless it is blank or the literal `"undefined"`.
fn has_jwt(jwt: &str) -> bool {
    !jwt.trim().is_empty() && jwt != UNSET_TOKEN
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::Decode(format!("Failed to parse {} response: {}", what, e)))
}

fn into_object(value: Value, what: &str) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Decode(format!(
            "Expected {} object, got {}",
            what, other
        ))),
    }
}
