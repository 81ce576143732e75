//! HTTP 路由：GraphQL 端点与健康检查

use std::sync::Arc;

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLBatchRequest, GraphQLResponse};
use axum::{
    extract::State,
    middleware,
    response::{Html, Json},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::error::CoreError;
use crate::core::middleware::request_logging_middleware;
use crate::core::response::{ApiResponse, HealthStatus};
use crate::graphql::{build_schema, CrmSchema, Services};
use crate::infrastructure::{Repositories, StorageHealth};

#[derive(Clone)]
pub struct AppState {
    pub schema: CrmSchema,
    pub health: Arc<dyn StorageHealth>,
}

impl AppState {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            schema: build_schema(Services::new(repos)),
            health: repos.health.clone(),
        }
    }
}

// 创建路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 单个或批量 GraphQL 请求（JSON 数组、multipart 均可）
async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLBatchRequest,
) -> GraphQLResponse {
    state.schema.execute_batch(req.into_inner()).await.into()
}

async fn graphql_playground() -> Html<String> {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

// 健康检查
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthStatus>>, CoreError> {
    state.health.ping().await?;

    Ok(Json(ApiResponse::success(HealthStatus {
        status: "healthy".to_string(),
        storage: state.health.backend().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}
