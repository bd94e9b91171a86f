//! # query-pagination
//!
//! Tower/axum middleware that normalizes pagination query parameters before
//! a request reaches its handler.
//!
//! ## Modules
//!
//! - **config**: per-mode settings and the TOML application config
//! - **shared**: query snapshot, pagination descriptors, errors, response envelope
//! - **interfaces**: the offset and cursor layers and their axum extractors
//! - **server**: logging bootstrap and the demo router
//!
//! ```ignore
//! use query_pagination::{OffsetPagination, OffsetPaginationConfig, OffsetPaginationLayer};
//!
//! async fn list(pagination: OffsetPagination) -> String {
//!     format!("page {} of size {}", pagination.page, pagination.limit)
//! }
//!
//! let app = Router::new()
//!     .route("/items", get(list))
//!     .layer(OffsetPaginationLayer::new(OffsetPaginationConfig::new().with_max_limit(100)));
//! ```

pub mod config;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{
    default_config_path, AppConfig, CursorPaginationConfig, OffsetPaginationConfig,
};

// Re-export the layers and descriptors for easy access
pub use interfaces::http::middleware::{cursor, offset};
pub use interfaces::http::{
    CursorPaginationLayer, CursorPaginationService, OffsetPaginationLayer,
    OffsetPaginationService,
};
pub use shared::{
    first_of, splice_query, with_query, ApiResponse, ConfigError, CursorPagination,
    OffsetPagination, PaginationRejection, QueryParams, QuerySource, QueryValue,
};
