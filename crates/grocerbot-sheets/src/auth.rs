//! OAuth2 refresh-token grant.

use grocerbot_protocols::SourceError;
use reqwest::Client;
use tracing::{debug, warn};

/// A short-lived bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

/// Exchange a refresh token for an access token at `endpoint`.
pub(crate) async fn refresh_access_token(
    client: &Client,
    endpoint: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<AccessToken, SourceError> {
    debug!("Refreshing Google access token");

    let resp = client
        .post(endpoint)
        .form(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .map_err(|e| SourceError::Http(e.to_string()))?;

    let status = resp.status();
    let body: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| SourceError::AuthFailed(format!("unreadable token response: {}", e)))?;

    if !status.is_success() {
        let error_desc = body
            .get("error_description")
            .and_then(|v| v.as_str())
            .or_else(|| body.get("error").and_then(|v| v.as_str()))
            .unwrap_or("unknown error");
        warn!("Google token refresh failed: {}", error_desc);
        return Err(SourceError::AuthFailed(error_desc.to_string()));
    }

    let token = body
        .get("access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SourceError::AuthFailed("missing access_token in refresh response".into()))?
        .to_string();

    let expires_in = body
        .get("expires_in")
        .and_then(|v| v.as_i64())
        .unwrap_or(3600);

    Ok(AccessToken { token, expires_in })
}
