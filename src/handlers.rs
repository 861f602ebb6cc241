use std::sync::Arc;

use axum::extract::{FromRequest, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::error::AppError;
use crate::relay::Relay;
use crate::types::{HealthResponse, SendRequest};

pub struct AppState {
    pub relay: Relay,
}

/// JSON body whose rejections come back as 422 `{detail}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/notify/sms", post(send_sms))
        .route("/notify/whatsapp", post(send_whatsapp))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn send_sms(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SendRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.relay.send_sms(req.to, req.message).await?;
    Ok(Json(result))
}

pub async fn send_whatsapp(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SendRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.relay.send_whatsapp(req.to, req.message).await?;
    Ok(Json(result))
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mode = if state.relay.is_ready() { "live" } else { "fake" };
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        mode,
    })
}
