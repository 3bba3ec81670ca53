use std::sync::Arc;

use super::{AccessToken, OAuthError, OAuthProvider, ProviderSettings, UserProfile};
use crate::fetch::HttpFetcher;

const AUTHORIZE_URL: &str = "https://gitee.com/oauth/authorize";
const ACCESS_TOKEN_URL: &str = "https://gitee.com/oauth/token";
const USER_URL: &str = "https://gitee.com/api/v5/user";
const DOCS_URL: &str = "https://gitee.com/api/v5/oauth_doc#/";

/// Gitee-shaped OAuth: the code is exchanged with a POST carrying every
/// parameter in the query string, and the profile endpoint takes the token
/// as a query parameter instead of a header.
pub struct GiteeProvider {
    settings: ProviderSettings,
    fetcher: Arc<dyn HttpFetcher>,
}

impl GiteeProvider {
    pub fn new(settings: ProviderSettings, fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { settings, fetcher }
    }

    fn callback_uri(&self) -> &str {
        self.settings.callback_uri.as_deref().unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl OAuthProvider for GiteeProvider {
    fn name(&self) -> &str {
        "gitee"
    }

    fn docs_url(&self) -> &str {
        DOCS_URL
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn authorize_url(&self) -> String {
        format!(
            "{AUTHORIZE_URL}?client_id={}&redirect_uri={}&response_type=code",
            self.settings.client_id,
            self.callback_uri()
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, OAuthError> {
        let url = format!(
            "{ACCESS_TOKEN_URL}?grant_type=authorization_code&code={code}&client_id={}&redirect_uri={}&client_secret={}",
            self.settings.client_id,
            self.callback_uri(),
            self.settings.client_secret
        );

        let body = self.fetcher.post(&url, "", &[]).await?;

        AccessToken::from_json(&body).map_err(|e| {
            tracing::error!("Gitee token exchange failed: {e}");
            e
        })
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, OAuthError> {
        let url = format!("{USER_URL}?access_token={access_token}");

        let body = self.fetcher.get(&url, &[]).await?;

        UserProfile::from_json(&body).map_err(|e| {
            tracing::error!("Gitee profile decode failed: {e}");
            e
        })
    }
}
