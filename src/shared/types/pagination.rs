use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Normalized offset pagination: a 1-based page number and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OffsetPagination {
    /// Current page (1-based)
    pub page: u32,
    /// Page size, within `[1, max_limit]`
    pub limit: u32,
}

/// Normalized cursor pagination: an opaque position token and a page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CursorPagination {
    /// Position to resume from. `null` on the first page.
    pub cursor: Option<String>,
    /// Page size, within `[1, max_limit]`
    pub limit: u32,
}
