use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::inbound::http::flow::{authorize, callback, index};
use crate::inbound::state::SocialState;
use crate::usecase::flow::AuthFlowUseCase;

pub fn create_router(state: SocialState) -> Router {
    Router::new()
        .nest("/api/github", flow_router(state.github))
        .nest("/api/gitee", flow_router(state.gitee))
}

fn flow_router(flow: Arc<dyn AuthFlowUseCase>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/auth", get(authorize))
        .route("/callback", get(callback))
        .with_state(flow)
}

#[cfg(test)]
mod tests {
    use app_core::fetch::MockHttpFetcher;
    use app_core::oauth::{GiteeProvider, GithubProvider, OAuthProvider, ProviderSettings};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::Dependency;

    fn github_settings() -> ProviderSettings {
        ProviderSettings {
            client_id: "abc".to_string(),
            client_secret: "shh".to_string(),
            callback_uri: None,
            post_auth_redirect_uri: None,
        }
    }

    fn gitee_settings() -> ProviderSettings {
        ProviderSettings {
            client_id: "gitee-id".to_string(),
            client_secret: "gitee-secret".to_string(),
            callback_uri: Some("http://localhost:8000/api/gitee/callback".to_string()),
            post_auth_redirect_uri: None,
        }
    }

    fn app(github_fetcher: MockHttpFetcher, gitee_fetcher: MockHttpFetcher) -> Router {
        let github: Arc<dyn OAuthProvider> = Arc::new(GithubProvider::new(github_settings(), Arc::new(github_fetcher)));
        let gitee: Arc<dyn OAuthProvider> = Arc::new(GiteeProvider::new(gitee_settings(), Arc::new(gitee_fetcher)));

        create_router(crate::new(Dependency { github, gitee }))
    }

    #[tokio::test]
    async fn test_github_authorize_redirects_to_github() {
        let request = Request::builder().uri("/api/github/auth").body(Body::empty()).unwrap();
        let response = app(MockHttpFetcher::new(), MockHttpFetcher::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://github.com/login/oauth/authorize?client_id=abc&scope=user,public_repo"
        );
    }

    #[tokio::test]
    async fn test_gitee_callback_full_flow_returns_profile() {
        let mut fetcher = MockHttpFetcher::new();
        fetcher
            .expect_post()
            .withf(|url, body, _headers| {
                url.starts_with("https://gitee.com/oauth/token?grant_type=authorization_code&code=C123")
                    && body.is_empty()
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async move { Ok(r#"{"access_token":"T1"}"#.to_string()) }));
        fetcher
            .expect_get()
            .withf(|url, _headers| url == "https://gitee.com/api/v5/user?access_token=T1")
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(r#"{"id":7,"login":"alice"}"#.to_string()) }));

        let request = Request::builder().uri("/api/gitee/callback?code=C123").body(Body::empty()).unwrap();
        let response = app(MockHttpFetcher::new(), fetcher).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["login"], "alice");
    }

    #[tokio::test]
    async fn test_gitee_callback_bad_token_payload_short_circuits() {
        let mut fetcher = MockHttpFetcher::new();
        fetcher
            .expect_post()
            .times(1)
            .returning(|_, _, _| Box::pin(async move { Ok("<html>service window</html>".to_string()) }));
        fetcher.expect_get().times(0);

        let request = Request::builder().uri("/api/gitee/callback?code=C123").body(Body::empty()).unwrap();
        let response = app(MockHttpFetcher::new(), fetcher).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_routes_link_provider_docs() {
        let request = Request::builder().uri("/api/github").body(Body::empty()).unwrap();
        let response = app(MockHttpFetcher::new(), MockHttpFetcher::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.starts_with("https://docs.github.com/"));

        let request = Request::builder().uri("/api/gitee").body(Body::empty()).unwrap();
        let response = app(MockHttpFetcher::new(), MockHttpFetcher::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(body, "https://gitee.com/api/v5/oauth_doc#/");
    }
}
