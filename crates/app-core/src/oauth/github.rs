use std::sync::Arc;

use super::{AccessToken, OAuthError, OAuthProvider, ProviderSettings, UserProfile};
use crate::fetch::HttpFetcher;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const DOCS_URL: &str = "https://docs.github.com/en/free-pro-team@latest/developers/apps/authorizing-oauth-apps";
const SCOPES: &str = "user,public_repo";
// GitHub rejects API requests that carry no User-Agent.
const USER_AGENT: &str = "authbroker";

/// GitHub-shaped OAuth: the code is exchanged with a GET request and the
/// profile endpoint expects a bearer token.
pub struct GithubProvider {
    settings: ProviderSettings,
    fetcher: Arc<dyn HttpFetcher>,
}

impl GithubProvider {
    pub fn new(settings: ProviderSettings, fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { settings, fetcher }
    }
}

#[async_trait::async_trait]
impl OAuthProvider for GithubProvider {
    fn name(&self) -> &str {
        "github"
    }

    fn docs_url(&self) -> &str {
        DOCS_URL
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn authorize_url(&self) -> String {
        format!("{AUTHORIZE_URL}?client_id={}&scope={SCOPES}", self.settings.client_id)
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, OAuthError> {
        let url = format!(
            "{ACCESS_TOKEN_URL}?client_id={}&client_secret={}&code={code}",
            self.settings.client_id, self.settings.client_secret
        );
        // Without this header GitHub answers form-encoded.
        let headers = [("Accept".to_string(), "application/json".to_string())];

        let body = self.fetcher.get(&url, &headers).await?;

        AccessToken::from_json(&body).map_err(|e| {
            tracing::error!("GitHub token exchange failed: {e}");
            e
        })
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, OAuthError> {
        let headers = [
            ("Authorization".to_string(), format!("Bearer {access_token}")),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];

        let body = self.fetcher.get(USER_URL, &headers).await?;

        UserProfile::from_json(&body).map_err(|e| {
            tracing::error!("GitHub profile decode failed: {e}");
            e
        })
    }
}
