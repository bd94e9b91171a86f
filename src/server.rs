//! Demo HTTP server
//!
//! Mounts both pagination layers on a small axum router whose handlers echo
//! the normalized parameters back, plus the OpenAPI document describing them
//! at `/api-doc/openapi.json`. Used by the `pagination-demo` binary.

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

use crate::config::{AppConfig, LoggingConfig, OffsetPaginationConfig};
use crate::interfaces::http::{CursorPaginationLayer, OffsetPaginationLayer};
use crate::shared::{ApiResponse, CursorPagination, OffsetPagination};

/// Body of `GET /items`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemsPage {
    #[serde(flatten)]
    pub pagination: OffsetPagination,
    pub has_previous: bool,
}

/// OpenAPI documentation for the demo routes
#[derive(OpenApi)]
#[openapi(
    paths(list_items, list_feed),
    components(schemas(OffsetPagination, CursorPagination, ItemsPage)),
    tags((name = "Pagination", description = "Normalized pagination parameters"))
)]
pub struct ApiDoc;

#[derive(Clone)]
struct DemoState {
    offset: Arc<OffsetPaginationConfig>,
}

/// Build the demo router from the application config.
pub fn create_router(config: &AppConfig) -> Router {
    let offset_layer = OffsetPaginationLayer::new(config.offset.clone());
    let cursor_layer = CursorPaginationLayer::new(config.cursor.clone());
    let state = DemoState {
        offset: Arc::new(offset_layer.config().clone()),
    };

    let items: Router<DemoState> = Router::new()
        .route("/items", get(list_items))
        .layer(offset_layer);
    let feed: Router<DemoState> = Router::new()
        .route("/feed", get(list_feed))
        .layer(cursor_layer);

    Router::new()
        .merge(items)
        .merge(feed)
        .route("/api-doc/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    get,
    path = "/items",
    tag = "Pagination",
    params(
        ("page" = Option<u32>, Query, description = "Page number, 1-based. Defaults to 1"),
        ("limit" = Option<u32>, Query, description = "Page size, clamped to the configured maximum")
    ),
    responses(
        (status = 200, description = "Normalized offset pagination", body = ApiResponse<ItemsPage>)
    )
)]
async fn list_items(
    State(state): State<DemoState>,
    uri: Uri,
    pagination: OffsetPagination,
) -> ApiResponse<ItemsPage> {
    let has_previous = state.offset.has_previous_pages(&uri);
    ApiResponse::ok(ItemsPage {
        pagination,
        has_previous,
    })
}

#[utoipa::path(
    get,
    path = "/feed",
    tag = "Pagination",
    params(
        ("cursor" = Option<String>, Query, description = "Opaque position token"),
        ("limit" = Option<u32>, Query, description = "Page size, clamped to the configured maximum")
    ),
    responses(
        (status = 200, description = "Normalized cursor pagination", body = ApiResponse<CursorPagination>)
    )
)]
async fn list_feed(pagination: CursorPagination) -> ApiResponse<CursorPagination> {
    ApiResponse::ok(pagination)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Bind the configured address and serve until Ctrl+C.
pub async fn serve(config: AppConfig) -> std::io::Result<()> {
    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Pagination demo listening on http://{}", addr);

    axum::serve(listener, create_router(&config))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`. `logging.format = "json"`
/// switches to JSON lines, anything else prints plain text.
pub fn init_tracing(logging: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter, Layer};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let output = if logging.format.eq_ignore_ascii_case("json") {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(output).with(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn items_route_normalizes_offset_params() {
        let (status, body) = get_json(create_router(&AppConfig::default()), "/items?page=3&limit=500").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "data": {"page": 3, "limit": 50, "has_previous": true}})
        );
    }

    #[tokio::test]
    async fn feed_route_normalizes_cursor_params() {
        let (status, body) = get_json(create_router(&AppConfig::default()), "/feed?cursor=abc&cursor=def").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": {"cursor": "abc", "limit": 10}}));
    }

    #[tokio::test]
    async fn routes_follow_configured_names() {
        let config = AppConfig::from_toml(
            r#"
            [offset]
            page_query_param = "p"
            default_limit = 20

            [cursor]
            cursor_query_param = "after"
            max_limit = 5
            "#,
        )
        .unwrap();

        let app = create_router(&config);
        let (_, items) = get_json(app.clone(), "/items?p=1").await;
        assert_eq!(items["data"], json!({"page": 1, "limit": 20, "has_previous": false}));

        let (_, feed) = get_json(app, "/feed?after=tok&limit=9").await;
        assert_eq!(feed["data"], json!({"cursor": "tok", "limit": 5}));
    }

    #[tokio::test]
    async fn openapi_document_lists_demo_routes() {
        let (status, doc) = get_json(create_router(&AppConfig::default()), "/api-doc/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/items"]["get"].is_object());
        assert!(doc["paths"]["/feed"]["get"].is_object());
        assert!(doc["components"]["schemas"]["OffsetPagination"].is_object());
    }
}
