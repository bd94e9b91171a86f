//! Axum extractors for the normalized pagination descriptors
//!
//! The layers store their result in the request extensions, so handlers can
//! take `OffsetPagination` or `CursorPagination` as arguments directly:
//!
//! ```ignore
//! async fn list_items(pagination: OffsetPagination) -> Json<OffsetPagination> {
//!     Json(pagination)
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::shared::{CursorPagination, OffsetPagination, PaginationRejection};

impl<S> FromRequestParts<S> for OffsetPagination
where
    S: Send + Sync,
{
    type Rejection = PaginationRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OffsetPagination>()
            .copied()
            .ok_or(PaginationRejection::MissingLayer("OffsetPagination"))
    }
}

impl<S> FromRequestParts<S> for CursorPagination
where
    S: Send + Sync,
{
    type Rejection = PaginationRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CursorPagination>()
            .cloned()
            .ok_or(PaginationRejection::MissingLayer("CursorPagination"))
    }
}
