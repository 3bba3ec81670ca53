//! The binary entry point for the application.

use std::sync::Arc;
use std::time::Duration;

use app_core::config::Config;
use app_core::fetch::{HttpFetcher, ReqwestFetcher};
use app_core::middleware::request_response_logger;
use app_core::oauth::{GiteeProvider, GithubProvider, OAuthProvider, ProviderSettings};
use axum::http::StatusCode;
use axum::{Json, Router, middleware, routing};
use social;
use tokio::signal;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(fmt::format::FmtSpan::CLOSE),
        )
        .init();

    if let Err(err) = run().await {
        panic!("❌ Application failed to start: {err}");
    }
}

/// Initializes all dependencies and starts the web server.
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize configuration and watcher.
    // The .watch() method enables automatic reloading when the config file changes.
    let config = Arc::new(
        Config::builder("config/config.yaml")
            .watch_interval(Duration::from_secs(5))
            .watch()
            .build()?,
    );

    // Initialize the shared HTTP client that providers send requests through.
    let fetcher: Arc<dyn HttpFetcher> = Arc::new(ReqwestFetcher::new()?);

    // Initialize OAuth providers. Both sections are required; a broker with a
    // half-configured provider would only fail later, on a live callback.
    let github_settings: ProviderSettings = config.get("oauth.github")?;
    let gitee_settings: ProviderSettings = config.get("oauth.gitee")?;

    let github: Arc<dyn OAuthProvider> = Arc::new(GithubProvider::new(github_settings, fetcher.clone()));
    let gitee: Arc<dyn OAuthProvider> = Arc::new(GiteeProvider::new(gitee_settings, fetcher));

    // Initialize social module
    let social_state = social::new(social::Dependency { github, gitee });

    // Create the Router and Middlewares
    let timeout_secs = Duration::from_secs(config.get::<u64>("server.timeout_secs")?);
    let app = Router::new()
        .merge(social::create_router(social_state))
        .route("/", routing::get(|| async { "Welcome!" }))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"message": "Endpoint not found"})),
            )
        })
        .method_not_allowed_fallback(|| async {
            (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(serde_json::json!({"message": "Method not allowed"})),
            )
        })
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_response_logger))
                .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any)) // Enables CORS for all origins
                .layer(RequestDecompressionLayer::new()) // Enables request compression
                .layer(CompressionLayer::new()) // Enables response compression
                .layer(TimeoutLayer::new(timeout_secs)), // Adds a request timeout
        );

    let server_address = config.get::<String>("server.address")?;
    let listener = tokio::net::TcpListener::bind(&server_address).await?;

    tracing::info!("🚀 listening on {}", listener.local_addr()?);

    // Create a broadcast channel to signal shutdown to all application components.
    // Spawn a task to listen for shutdown signals (Ctrl+C and SIGTERM).
    let (shutdown_tx, _) = broadcast::channel(1);
    spawn_shutdown_listener(shutdown_tx.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_tx.subscribe().recv().await.ok();
            tracing::info!("🛑 Server is shutting down gracefully...");
        })
        .await?;

    Ok(())
}

/// Spawns a background task to listen for system shutdown signals.
fn spawn_shutdown_listener(shutdown_tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("🔻 Received SIGINT (Ctrl+C)")},
            _ = terminate => { tracing::info!("🔻 Received SIGTERM")},
        }

        // Send the shutdown signal to all parts of the application.
        if shutdown_tx.send(()).is_err() {
            tracing::error!("Failed to send shutdown signal");
        }
    });
}
