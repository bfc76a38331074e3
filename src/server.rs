//! 入站 HTTP 服务
//!
//! 对外暴露三个路由：
//! - `GET /health`: 存活检查
//! - `POST /`: 信封入口，按 action 分发
//! - `POST /log-grpc`: log 动作的 gRPC 备用入口
//!
//! 约定：路由结果（成功或归一化失败）一律 200 返回；
//! 只有格式错误的请求体与未知 action 回 400，且同样以
//! 失败信封作为响应体。

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::router::ActionRouter;

/// 服务共享状态
pub struct AppState {
    pub router: ActionRouter,
}

/// 装配 axum 应用
pub fn app(router: ActionRouter) -> Router {
    let state = Arc::new(AppState { router });

    Router::new()
        .route("/health", get(health_check))
        .route("/", post(handle_submission))
        .route("/log-grpc", post(log_via_grpc))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 绑定监听并开始服务
pub async fn serve(addr: SocketAddr, router: ActionRouter) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;

    info!("Broker service listening on {}", addr);
    axum::serve(listener, app(router))
        .await
        .context("Server error")?;

    Ok(())
}

/// 存活检查
async fn health_check() -> Json<ResponseEnvelope> {
    Json(ResponseEnvelope::ok(
        "broker service is up",
        Some(serde_json::json!({ "time": Utc::now().to_rfc3339() })),
    ))
}

/// 信封入口
async fn handle_submission(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();

    let Json(envelope) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(%request_id, "rejected malformed envelope: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ResponseEnvelope::failure(rejection.body_text())),
            );
        }
    };

    debug!(%request_id, action = %envelope.action, "handling submission");

    match state.router.route(envelope).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ResponseEnvelope::failure(err.to_string())),
        ),
    }
}

/// log 动作的 gRPC 备用入口
///
/// 与 `POST /` 上的 log 动作各自独立，互不合并。
async fn log_via_grpc(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> impl IntoResponse {
    let Json(envelope) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ResponseEnvelope::failure(rejection.body_text())),
            );
        }
    };

    let entry = envelope.log.unwrap_or_default();
    let response = state.router.log_via_rpc(entry).await;

    (StatusCode::OK, Json(response))
}
