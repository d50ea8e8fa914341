//! API 模块
//!
//! 负责 HTTP 路由。题库在启动时构建好，放在 `AppState` 里只读共享。

pub mod health;
pub mod questions;

use crate::error::{ApiError, ConfigError};
use crate::services::QuestionBank;
use axum::http::{header, HeaderValue, Method, Uri};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
}

impl AppState {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank: Arc::new(bank),
        }
    }
}

/// 构建完整路由（含 CORS 和请求日志）
///
/// # 参数
/// - `state`: 共享状态
/// - `client_url`: 允许跨域访问的前端地址
pub fn build_router(state: AppState, client_url: &str) -> Result<Router, ConfigError> {
    let origin = HeaderValue::from_str(client_url).map_err(|_| ConfigError::InvalidClientUrl {
        value: client_url.to_string(),
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(Router::new()
        .route("/health", get(health::health))
        .nest("/api/questions", questions::router())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        path: uri.path().to_string(),
    }
}
