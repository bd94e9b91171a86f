//! HTTP interfaces
//!
//! - `middleware`: offset and cursor pagination layers
//! - `extract`: axum extractors for the normalized descriptors

pub mod extract;
pub mod middleware;

pub use middleware::{
    CursorPaginationLayer, CursorPaginationService, OffsetPaginationLayer,
    OffsetPaginationService,
};
