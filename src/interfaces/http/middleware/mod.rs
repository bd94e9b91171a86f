//! Pagination middleware
//!
//! - `offset`: page/limit normalization
//! - `cursor`: cursor/limit normalization
//!
//! Both are `tower` layers: build one from its config, wrap a service (or
//! `Router::layer` it) and every request reaching the inner service carries
//! clamped pagination parameters in its query and a descriptor in its
//! extensions.

use axum::http::Request;

use crate::shared::{parse_leading_int, splice_query, with_query, QueryParams};

pub mod cursor;
pub mod offset;

pub use cursor::{CursorPaginationLayer, CursorPaginationService};
pub use offset::{OffsetPaginationLayer, OffsetPaginationService};

/// Parse a raw page size, fall back to `default` when it is missing, not a
/// number or zero, then clamp into `[1, max]`.
pub(crate) fn normalize_limit(raw: Option<&str>, default: u32, max: u32) -> u32 {
    let mut limit = raw
        .and_then(parse_leading_int)
        .filter(|v| *v != 0)
        .unwrap_or(i64::from(default));

    if limit < 1 {
        limit = 1;
    }
    if limit > i64::from(max) {
        limit = i64::from(max);
    }

    u32::try_from(limit).unwrap_or(max)
}

/// Current integer value of `key`, as left on the request by a normalizer.
pub(crate) fn current_u32(params: &QueryParams, key: &str) -> Option<u32> {
    params.first(key)?.parse().ok()
}

/// Replace the pagination keys named in `updates` in the request URI. Every
/// other query segment is kept byte-for-byte. On failure the request keeps
/// its original URI.
pub(crate) fn rewrite_query<B>(request: &mut Request<B>, updates: &[(&str, Option<&str>)]) {
    let query = splice_query(request.uri().query().unwrap_or_default(), updates);
    match with_query(request.uri(), &query) {
        Ok(uri) => *request.uri_mut() = uri,
        Err(e) => {
            tracing::warn!(error = %e, uri = %request.uri(), "failed to rewrite pagination query");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_when_missing_or_invalid() {
        assert_eq!(normalize_limit(None, 10, 50), 10);
        assert_eq!(normalize_limit(Some(""), 10, 50), 10);
        assert_eq!(normalize_limit(Some("abc"), 10, 50), 10);
        assert_eq!(normalize_limit(Some("0"), 10, 50), 10);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(normalize_limit(Some("5"), 10, 50), 5);
        assert_eq!(normalize_limit(Some("-5"), 10, 50), 1);
        assert_eq!(normalize_limit(Some("1000"), 10, 50), 50);
        assert_eq!(normalize_limit(Some("50"), 10, 50), 50);
        assert_eq!(normalize_limit(Some("99999999999999999999"), 10, 50), 50);
    }

    #[test]
    fn default_above_max_is_clamped() {
        assert_eq!(normalize_limit(None, 80, 50), 50);
    }

    #[test]
    fn current_u32_reads_plain_integers_only() {
        let params = QueryParams::parse("page=3&limit=ten&cursor=");
        assert_eq!(current_u32(&params, "page"), Some(3));
        assert_eq!(current_u32(&params, "limit"), None);
        assert_eq!(current_u32(&params, "cursor"), None);
        assert_eq!(current_u32(&params, "missing"), None);
    }

    #[test]
    fn rewrite_keeps_foreign_segments_verbatim() {
        let mut request = Request::builder()
            .uri("/items?sig=%FF%FE&page=x&debug&tag=a+b")
            .body(())
            .unwrap();
        rewrite_query(&mut request, &[("page", Some("1")), ("limit", Some("10"))]);
        assert_eq!(request.uri().query(), Some("sig=%FF%FE&page=1&debug&tag=a+b&limit=10"));
    }

    #[test]
    fn rewrite_to_empty_query_drops_question_mark() {
        let mut request = Request::builder().uri("/feed?cursor=").body(()).unwrap();
        rewrite_query(&mut request, &[("cursor", None)]);
        assert_eq!(request.uri().to_string(), "/feed");
    }
}
