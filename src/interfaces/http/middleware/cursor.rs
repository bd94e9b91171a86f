//! Cursor (cursor/limit) pagination middleware

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use super::{current_u32, normalize_limit, rewrite_query};
use crate::config::CursorPaginationConfig;
use crate::shared::{CursorPagination, QueryParams, QuerySource};

/// Layer that normalizes `cursor` and `limit` before the wrapped service runs.
#[derive(Debug, Clone)]
pub struct CursorPaginationLayer {
    config: Arc<CursorPaginationConfig>,
}

impl CursorPaginationLayer {
    pub fn new(config: CursorPaginationConfig) -> Self {
        Self {
            config: Arc::new(config.sanitized()),
        }
    }

    pub fn config(&self) -> &CursorPaginationConfig {
        &self.config
    }
}

impl Default for CursorPaginationLayer {
    fn default() -> Self {
        Self::new(CursorPaginationConfig::default())
    }
}

impl<S> Layer<S> for CursorPaginationLayer {
    type Service = CursorPaginationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CursorPaginationService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Service produced by [`CursorPaginationLayer`].
#[derive(Debug, Clone)]
pub struct CursorPaginationService<S> {
    inner: S,
    config: Arc<CursorPaginationConfig>,
}

impl<S, B> Service<Request<B>> for CursorPaginationService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        let pagination = normalize_request(&self.config, &mut request);
        request.extensions_mut().insert(pagination);
        self.inner.call(request)
    }
}

/// Normalize the cursor/limit parameters of `params` in place.
///
/// An empty or missing cursor is removed from the query. Unset config values
/// fall back to the defaults.
pub fn normalize(config: &CursorPaginationConfig, params: &mut QueryParams) -> CursorPagination {
    let config = config.effective();
    let cursor = params
        .first(&config.cursor_query_param)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    let raw_limit = params.first(&config.limit_query_param);
    let limit = normalize_limit(raw_limit, config.default_limit, config.max_limit);

    tracing::debug!(
        cursor = ?cursor,
        raw_limit = ?raw_limit,
        limit,
        "normalized cursor pagination"
    );

    match &cursor {
        Some(cursor) => params.set(&config.cursor_query_param, cursor.as_str()),
        None => {
            params.remove(&config.cursor_query_param);
        }
    }
    params.set(&config.limit_query_param, limit.to_string());

    CursorPagination { cursor, limit }
}

/// Normalize the request query and rewrite the cursor and limit in the
/// request URI. The rest of the query is left as it arrived.
pub fn normalize_request<B>(
    config: &CursorPaginationConfig,
    request: &mut Request<B>,
) -> CursorPagination {
    let config = config.effective();
    let mut params = QueryParams::from_source(&*request);
    let pagination = normalize(&config, &mut params);

    let limit = pagination.limit.to_string();
    rewrite_query(
        request,
        &[
            (config.cursor_query_param.as_str(), pagination.cursor.as_deref()),
            (config.limit_query_param.as_str(), Some(limit.as_str())),
        ],
    );
    pagination
}

/// Cursor and limit currently on the request, without defaulting or
/// clamping. Returns `None` when the limit is missing or not an integer.
pub fn get_pagination(
    source: &impl QuerySource,
    cursor_param: &str,
    limit_param: &str,
) -> Option<CursorPagination> {
    let params = QueryParams::from_source(source);
    Some(CursorPagination {
        limit: current_u32(&params, limit_param)?,
        cursor: params
            .first(cursor_param)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    })
}

impl CursorPaginationConfig {
    /// [`get_pagination`] with this config's parameter names.
    pub fn pagination(&self, source: &impl QuerySource) -> Option<CursorPagination> {
        let config = self.effective();
        get_pagination(source, &config.cursor_query_param, &config.limit_query_param)
    }
}
