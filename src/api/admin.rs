//! Admin address management via the backend API.
//!
//! Requests under `/admin` authenticate with the admin password; a 401
//! raises the admin auth dialog (see `ApiClient::request`).

use reqwest::Method;

use super::client::{ApiClient, ApiError, RequestOptions};
use super::types::AddressCredentialResponse;

/// Reveal the credential (address JWT) of an address.
///
/// GET /admin/show_password/{id}
pub async fn show_address_credential(api: &ApiClient, id: u64) -> Result<String, ApiError> {
    let value = api.get(&format!("/admin/show_password/{}", id)).await?;
    let resp: AddressCredentialResponse = serde_json::from_value(value)
        .map_err(|e| ApiError::Decode(format!("Failed to parse credential response: {}", e)))?;
    Ok(resp.jwt)
}

/// Delete an address and its mail.
///
/// DELETE /admin/delete_address/{id}
pub async fn delete_address(api: &ApiClient, id: u64) -> Result<(), ApiError> {
    api.request(
        &format!("/admin/delete_address/{}", id),
        RequestOptions::method(Method::DELETE),
    )
    .await?;
    log::info!("Deleted address {}", id);
    Ok(())
}
