//! User account operations.

use reqwest::Method;

use super::client::{ApiClient, ApiError, RequestOptions};

/// Bind the current address (bearer JWT) to the logged-in user.
///
/// POST /user_api/bind_address. Does nothing when no user token is set.
pub async fn bind_address(api: &ApiClient) -> Result<(), ApiError> {
    if api.state().credentials.read().await.user_token.is_empty() {
        log::debug!("No user token, bind address skipped");
        return Ok(());
    }

    api.request("/user_api/bind_address", RequestOptions::method(Method::POST))
        .await?;
    Ok(())
}
