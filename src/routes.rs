//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{handlers, middleware::AppState};

/// 请求体上限（字节）
const MAX_BODY_SIZE: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 注册与登录（无需认证）
    let auth_routes = Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/sign-in", post(handlers::auth::sign_in));

    // 需要认证的路由
    let api_routes = Router::new()
        .route(
            "/lists",
            get(handlers::list::list_lists).post(handlers::list::create_list),
        )
        .route(
            "/lists/{id}",
            get(handlers::list::get_list)
                .put(handlers::list::update_list)
                .delete(handlers::list::delete_list),
        )
        .route(
            "/lists/{id}/items",
            get(handlers::item::list_items).post(handlers::item::create_item),
        )
        .route(
            "/items/{id}",
            get(handlers::item::get_item)
                .put(handlers::item::update_item)
                .delete(handlers::item::delete_item),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.token_codec.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    // 组合所有路由，外层中间件先执行
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(
                    crate::middleware::request_tracking_middleware,
                ))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
                .layer(cors),
        )
        .with_state(state)
}
