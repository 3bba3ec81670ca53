use std::sync::Arc;

use app_core::error::AppError;
use app_core::oauth::OAuthProvider;
use async_trait::async_trait;
use validator::Validate;

use crate::domain::inout::flow::{AuthorizeOutput, CallbackInput, CallbackOutput, IndexOutput};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthFlowUseCase: Send + Sync {
    async fn index(&self) -> Result<IndexOutput, AppError>;
    async fn authorize(&self) -> Result<AuthorizeOutput, AppError>;
    async fn callback(&self, input: CallbackInput) -> Result<CallbackOutput, AppError>;
}

/// Runs the three-step login flow for one provider. The provider decides the
/// wire details; this service only sequences them.
#[derive(Clone)]
pub struct AuthFlowService {
    provider: Arc<dyn OAuthProvider>,
}

impl AuthFlowService {
    pub fn new(provider: Arc<dyn OAuthProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AuthFlowUseCase for AuthFlowService {
    async fn index(&self) -> Result<IndexOutput, AppError> {
        Ok(IndexOutput { docs_url: self.provider.docs_url().to_string() })
    }

    async fn authorize(&self) -> Result<AuthorizeOutput, AppError> {
        Ok(AuthorizeOutput { authorize_url: self.provider.authorize_url() })
    }

    async fn callback(&self, input: CallbackInput) -> Result<CallbackOutput, AppError> {
        input.validate()?;

        // The profile fetch only runs once the exchange produced a token.
        let token = self.provider.exchange_code(&input.code).await?;
        let profile = self.provider.fetch_profile(&token.access_token).await?;

        tracing::info!(provider = self.provider.name(), user_id = %profile.id, "Social login completed");

        let redirect_uri = self
            .provider
            .settings()
            .post_auth_redirect_uri
            .clone()
            .filter(|uri| !uri.trim().is_empty());

        match redirect_uri {
            Some(redirect_uri) => Ok(CallbackOutput::Redirect { redirect_uri }),
            None => Ok(CallbackOutput::Profile(profile)),
        }
    }
}

#[cfg(test)]
mod tests {
    use app_core::oauth::{AccessToken, MockOAuthProvider, OAuthError, ProviderSettings, UserProfile};
    use serde_json::json;

    use super::*;

    fn settings(post_auth_redirect_uri: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            client_id: "abc".to_string(),
            client_secret: "xyz".to_string(),
            callback_uri: None,
            post_auth_redirect_uri: post_auth_redirect_uri.map(str::to_string),
        }
    }

    fn token(secret: &str) -> AccessToken {
        AccessToken {
            access_token: secret.to_string(),
            token_type: Some("bearer".to_string()),
            scope: None,
            expires_in: None,
            refresh_token: None,
        }
    }

    fn profile(id: &str, login: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            login: login.to_string(),
            display_name: None,
            avatar_url: None,
            raw: json!({"id": id, "login": login}),
        }
    }

    #[tokio::test]
    async fn test_index_returns_docs_url() {
        let mut provider = MockOAuthProvider::new();
        provider
            .expect_docs_url()
            .return_const("https://gitee.com/api/v5/oauth_doc#/".to_string());

        let service = AuthFlowService::new(Arc::new(provider));
        let output = service.index().await.unwrap();

        assert_eq!(output.docs_url, "https://gitee.com/api/v5/oauth_doc#/");
    }

    #[tokio::test]
    async fn test_authorize_returns_provider_url() {
        let mut provider = MockOAuthProvider::new();
        provider
            .expect_authorize_url()
            .return_const("https://github.com/login/oauth/authorize?client_id=abc&scope=user,public_repo".to_string());

        let service = AuthFlowService::new(Arc::new(provider));
        let output = service.authorize().await.unwrap();

        assert_eq!(
            output.authorize_url,
            "https://github.com/login/oauth/authorize?client_id=abc&scope=user,public_repo"
        );
    }

    #[tokio::test]
    async fn test_callback_returns_profile_when_no_redirect_configured() {
        let mut provider = MockOAuthProvider::new();
        provider
            .expect_exchange_code()
            .withf(|code| code == "C123")
            .times(1)
            .returning(|_| Box::pin(async move { Ok(token("T1")) }));
        provider
            .expect_fetch_profile()
            .withf(|access_token| access_token == "T1")
            .times(1)
            .returning(|_| Box::pin(async move { Ok(profile("7", "alice")) }));
        provider.expect_name().return_const("gitee".to_string());
        provider.expect_settings().return_const(settings(None));

        let service = AuthFlowService::new(Arc::new(provider));
        let output = service.callback(CallbackInput { code: "C123".to_string() }).await.unwrap();

        match output {
            CallbackOutput::Profile(profile) => {
                assert_eq!(profile.id, "7");
                assert_eq!(profile.login, "alice");
            },
            other => panic!("Expected CallbackOutput::Profile, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_callback_redirects_when_configured() {
        let mut provider = MockOAuthProvider::new();
        provider
            .expect_exchange_code()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(token("T1")) }));
        provider
            .expect_fetch_profile()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(profile("7", "alice")) }));
        provider.expect_name().return_const("github".to_string());
        provider
            .expect_settings()
            .return_const(settings(Some("http://localhost:3000/welcome")));

        let service = AuthFlowService::new(Arc::new(provider));
        let output = service.callback(CallbackInput { code: "C123".to_string() }).await.unwrap();

        match output {
            CallbackOutput::Redirect { redirect_uri } => {
                assert_eq!(redirect_uri, "http://localhost:3000/welcome");
            },
            other => panic!("Expected CallbackOutput::Redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_callback_blank_redirect_counts_as_unset() {
        let mut provider = MockOAuthProvider::new();
        provider
            .expect_exchange_code()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(token("T1")) }));
        provider
            .expect_fetch_profile()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(profile("7", "alice")) }));
        provider.expect_name().return_const("github".to_string());
        provider.expect_settings().return_const(settings(Some("   ")));

        let service = AuthFlowService::new(Arc::new(provider));
        let output = service.callback(CallbackInput { code: "C123".to_string() }).await.unwrap();

        assert!(matches!(output, CallbackOutput::Profile(_)));
    }

    #[tokio::test]
    async fn test_callback_exchange_failure_skips_profile_fetch() {
        let mut provider = MockOAuthProvider::new();
        provider.expect_exchange_code().times(1).returning(|_| {
            Box::pin(async move { Err(OAuthError::TokenExchange("provider rejected the exchange".to_string())) })
        });
        provider.expect_fetch_profile().times(0);

        let service = AuthFlowService::new(Arc::new(provider));
        let result = service.callback(CallbackInput { code: "stale".to_string() }).await;

        assert!(matches!(result.unwrap_err(), AppError::OAuth(OAuthError::TokenExchange(_))));
    }

    #[tokio::test]
    async fn test_callback_empty_code_rejected_before_exchange() {
        let mut provider = MockOAuthProvider::new();
        provider.expect_exchange_code().times(0);
        provider.expect_fetch_profile().times(0);

        let service = AuthFlowService::new(Arc::new(provider));
        let result = service.callback(CallbackInput { code: String::new() }).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }
}
