//! HTTP 中间件与应用状态
//! 请求追踪、指标

use crate::{
    auth::{CredentialHasher, TokenCodec},
    config::AppConfig,
    error::AppError,
    repository::{ItemStore, ListStore, OwnershipStore, UserStore},
    services::{AuthService, ItemService, ListService, OwnershipGuard},
};
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// 启动时构建一次，之后只读；服务用 Arc 共享，Clone 只是指针拷贝
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: sqlx::PgPool,
    pub token_codec: Arc<TokenCodec>,
    pub auth_service: Arc<AuthService>,
    pub ownership_guard: Arc<OwnershipGuard>,
    pub list_service: Arc<ListService>,
    pub item_service: Arc<ItemService>,
}

/// 存储协作者
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub ownership: Arc<dyn OwnershipStore>,
    pub lists: Arc<dyn ListStore>,
    pub items: Arc<dyn ItemStore>,
}

impl AppState {
    /// 根据配置和存储实现组装所有服务
    pub fn new(config: AppConfig, db: sqlx::PgPool, stores: Stores) -> Result<Self, AppError> {
        let storage_timeout = Duration::from_secs(config.database.query_timeout_secs);

        let token_codec = Arc::new(TokenCodec::from_config(&config)?);
        let hasher = Arc::new(CredentialHasher::from_config(&config));

        let auth_service = Arc::new(AuthService::new(
            stores.users,
            hasher,
            token_codec.clone(),
            storage_timeout,
        ));
        let ownership_guard = Arc::new(OwnershipGuard::new(stores.ownership, storage_timeout));
        let list_service = Arc::new(ListService::new(
            stores.lists,
            ownership_guard.clone(),
            storage_timeout,
        ));
        let item_service = Arc::new(ItemService::new(
            stores.items,
            ownership_guard.clone(),
            storage_timeout,
        ));

        Ok(Self {
            config,
            db,
            token_codec,
            auth_service,
            ownership_guard,
            list_service,
            item_service,
        })
    }
}

tokio::task_local! {
    /// 当前请求的 request_id，由追踪中间件设置
    static REQUEST_ID: String;
}

/// 当前请求的 request_id；不在请求作用域内时返回 None
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        // 错误响应体中的 request_id 与响应头一致
        let mut response = REQUEST_ID.scope(request_id.clone(), next.run(req)).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 指标标签只使用有限取值
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            _ => "OTHER",
        };
        let status_class = match status {
            200..=299 => "2xx",
            400 => "400",
            401 => "401",
            404 => "404",
            409 => "409",
            400..=499 => "4xx",
            _ => "5xx",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_class)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        // 在响应头中返回追踪标识
        if let Ok(value) = trace_id.parse() {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = request_id.parse() {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
