//! OAuth 2.0 authorization-code flows against third-party identity providers.

mod gitee;
mod github;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use self::gitee::GiteeProvider;
pub use self::github::GithubProvider;
use crate::fetch::FetchError;

#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("Request to the identity provider failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("OAuth token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Failed to decode user profile: {0}")]
    ProfileDecode(String),
}

/// Static per-provider settings, loaded from the `oauth.<provider>` config
/// section. `callback_uri` is sent to providers that require it in the
/// authorize and exchange requests; `post_auth_redirect_uri` is where the
/// callback handler sends the user after a completed login.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub callback_uri: Option<String>,
    #[serde(default)]
    pub post_auth_redirect_uri: Option<String>,
}

/// Access token in provider-independent form. Fields absent from a
/// provider's response stay `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Decodes a token-endpoint response body. Providers answer error cases
    /// with 200 and an `error` field, so that is checked before the shape.
    pub(crate) fn from_json(body: &str) -> Result<Self, OAuthError> {
        let raw: Value = serde_json::from_str(body)
            .map_err(|e| OAuthError::TokenExchange(format!("token response is not valid JSON: {e}")))?;

        if let Some(error) = raw.get("error").and_then(Value::as_str) {
            let detail = raw.get("error_description").and_then(Value::as_str).unwrap_or(error);
            return Err(OAuthError::TokenExchange(format!("provider rejected the exchange: {detail}")));
        }

        let token: AccessToken = serde_json::from_value(raw)
            .map_err(|e| OAuthError::TokenExchange(format!("unexpected token response shape: {e}")))?;

        if token.access_token.is_empty() {
            return Err(OAuthError::TokenExchange("token response contains an empty access token".to_string()));
        }

        Ok(token)
    }
}

/// User profile in provider-independent form. The core fields are extracted
/// by well-known name; everything the provider sent survives in `raw`.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub login: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub raw: Value,
}

impl UserProfile {
    pub(crate) fn from_json(body: &str) -> Result<Self, OAuthError> {
        let raw: Value = serde_json::from_str(body)
            .map_err(|e| OAuthError::ProfileDecode(format!("profile response is not valid JSON: {e}")))?;

        // Numeric on GitHub and Gitee, but some providers use strings.
        let id = match raw.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(OAuthError::ProfileDecode("profile response has no user id".to_string())),
        };

        let login = raw
            .get("login")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| OAuthError::ProfileDecode("profile response has no login".to_string()))?
            .to_string();

        let display_name = raw.get("name").and_then(Value::as_str).map(str::to_string);
        let avatar_url = raw.get("avatar_url").and_then(Value::as_str).map(str::to_string);

        Ok(Self { id, login, display_name, avatar_url, raw })
    }
}

#[async_trait::async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait OAuthProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// The provider's public documentation page for its OAuth flow.
    fn docs_url(&self) -> &str;

    /// The settings this provider was constructed with.
    fn settings(&self) -> &ProviderSettings;

    /// Builds the authorization URL the user agent is redirected to.
    fn authorize_url(&self) -> String;

    /// Exchanges an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, OAuthError>;

    /// Fetches the user's profile from the provider using an access token.
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, OAuthError>;
}
