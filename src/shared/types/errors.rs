use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::ApiResponse;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Extraction failure for the pagination descriptors.
#[derive(Debug, Error)]
pub enum PaginationRejection {
    /// The handler asked for a descriptor but the matching layer is not
    /// installed on the route.
    #[error("{0} is not available: pagination layer missing on this route")]
    MissingLayer(&'static str),
}

impl IntoResponse for PaginationRejection {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "pagination extractor rejected request");
        (StatusCode::INTERNAL_SERVER_ERROR, ApiResponse::failure(self)).into_response()
    }
}
