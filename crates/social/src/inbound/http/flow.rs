use std::sync::Arc;

use app_core::error::AppError;
use app_core::extractors::AppQuery;
use axum::Json;
use axum::debug_handler;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::domain::inout::flow::{CallbackInput, CallbackOutput};
use crate::inbound::model::flow::{CallbackRequest, ProfileResponse};
use crate::usecase::flow::AuthFlowUseCase;

#[debug_handler]
pub async fn index(State(flow): State<Arc<dyn AuthFlowUseCase>>) -> impl IntoResponse {
    flow.index().await.map(|output| output.docs_url)
}

#[debug_handler]
pub async fn authorize(State(flow): State<Arc<dyn AuthFlowUseCase>>) -> impl IntoResponse {
    flow.authorize().await.map(|output| found(&output.authorize_url))
}

#[debug_handler]
pub async fn callback(
    State(flow): State<Arc<dyn AuthFlowUseCase>>,
    AppQuery(query): AppQuery<CallbackRequest>,
) -> impl IntoResponse {
    // Providers report user denial back on the callback itself.
    if let Some(err) = query.error {
        let detail = query.error_description.unwrap_or(err);
        return Err(AppError::Forbidden(format!("OAuth authorization failed: {detail}")));
    }

    let code = query
        .code
        .ok_or_else(|| AppError::Forbidden("Missing authorization code".to_string()))?;

    flow.callback(CallbackInput { code }).await.map(|output| match output {
        CallbackOutput::Redirect { redirect_uri } => found(&redirect_uri).into_response(),
        CallbackOutput::Profile(profile) => Json(ProfileResponse::from(profile)).into_response(),
    })
}

// axum's Redirect helper answers 303; these flows promise a plain 302.
fn found(location: &str) -> (StatusCode, [(header::HeaderName, String); 1]) {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())])
}
