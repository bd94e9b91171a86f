//! Offset (page/limit) pagination middleware

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use super::{current_u32, normalize_limit, rewrite_query};
use crate::config::OffsetPaginationConfig;
use crate::shared::{parse_leading_int, OffsetPagination, QueryParams, QuerySource};

/// Layer that normalizes `page` and `limit` before the wrapped service runs.
///
/// ```ignore
/// let app = Router::new()
///     .route("/items", get(list_items))
///     .layer(OffsetPaginationLayer::new(OffsetPaginationConfig::new().with_max_limit(100)));
/// ```
#[derive(Debug, Clone)]
pub struct OffsetPaginationLayer {
    config: Arc<OffsetPaginationConfig>,
}

impl OffsetPaginationLayer {
    pub fn new(config: OffsetPaginationConfig) -> Self {
        Self {
            config: Arc::new(config.sanitized()),
        }
    }

    pub fn config(&self) -> &OffsetPaginationConfig {
        &self.config
    }
}

impl Default for OffsetPaginationLayer {
    fn default() -> Self {
        Self::new(OffsetPaginationConfig::default())
    }
}

impl<S> Layer<S> for OffsetPaginationLayer {
    type Service = OffsetPaginationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OffsetPaginationService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Service produced by [`OffsetPaginationLayer`].
#[derive(Debug, Clone)]
pub struct OffsetPaginationService<S> {
    inner: S,
    config: Arc<OffsetPaginationConfig>,
}

impl<S, B> Service<Request<B>> for OffsetPaginationService<S>
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

/// Normalize the page/limit parameters of `params` in place.
///
/// Unset config values (empty names, zero limits) fall back to the defaults.
pub fn normalize(config: &OffsetPaginationConfig, params: &mut QueryParams) -> OffsetPagination {
    let config = config.effective();
    let raw_page = params.first(&config.page_query_param);
    let raw_limit = params.first(&config.limit_query_param);

    let page = raw_page
        .and_then(parse_leading_int)
        .filter(|v| *v != 0)
        .unwrap_or(1)
        .max(1);
    let page = u32::try_from(page).unwrap_or(u32::MAX);
    let limit = normalize_limit(raw_limit, config.default_limit, config.max_limit);

    tracing::debug!(
        raw_page = ?raw_page,
        raw_limit = ?raw_limit,
        page,
        limit,
        "normalized offset pagination"
    );

    params.set(&config.page_query_param, page.to_string());
    params.set(&config.limit_query_param, limit.to_string());

    OffsetPagination { page, limit }
}

/// Normalize the request query and rewrite the page and limit in the request
/// URI. The rest of the query is left as it arrived.
pub fn normalize_request<B>(
    config: &OffsetPaginationConfig,
    request: &mut Request<B>,
) -> OffsetPagination {
    let config = config.effective();
    let mut params = QueryParams::from_source(&*request);
    let pagination = normalize(&config, &mut params);

    let page = pagination.page.to_string();
    let limit = pagination.limit.to_string();
    rewrite_query(
        request,
        &[
            (config.page_query_param.as_str(), Some(page.as_str())),
            (config.limit_query_param.as_str(), Some(limit.as_str())),
        ],
    );
    pagination
}

/// Page and limit currently on the request, without defaulting or clamping.
///
/// Returns `None` when either is missing or not an integer, i.e. the request
/// has not been through [`OffsetPaginationLayer`].
pub fn get_pagination(
    source: &impl QuerySource,
    page_param: &str,
    limit_param: &str,
) -> Option<OffsetPagination> {
    let params = QueryParams::from_source(source);
    Some(OffsetPagination {
        page: current_u32(&params, page_param)?,
        limit: current_u32(&params, limit_param)?,
    })
}

/// True when the current page is present and past the first one.
pub fn has_previous_pages(source: &impl QuerySource, page_param: &str) -> bool {
    current_page(source, page_param).is_some_and(|page| page > 1)
}

/// Capture the current page and return a check against a total page count
/// that is only known later (e.g. after the data query ran).
pub fn has_next_pages(source: &impl QuerySource, page_param: &str) -> impl Fn(u32) -> bool {
    let page = current_page(source, page_param);
    move |total_pages| total_pages != 0 && page.is_some_and(|page| page < total_pages)
}

fn current_page(source: &impl QuerySource, page_param: &str) -> Option<u32> {
    current_u32(&QueryParams::from_source(source), page_param)
}

/// The accessors below read the same names the layer writes, so an empty
/// name means the default one.
impl OffsetPaginationConfig {
    /// [`get_pagination`] with this config's parameter names.
    pub fn pagination(&self, source: &impl QuerySource) -> Option<OffsetPagination> {
        let config = self.effective();
        get_pagination(source, &config.page_query_param, &config.limit_query_param)
    }

    pub fn has_previous_pages(&self, source: &impl QuerySource) -> bool {
        has_previous_pages(source, &self.effective().page_query_param)
    }

    pub fn has_next_pages(&self, source: &impl QuerySource) -> impl Fn(u32) -> bool {
        has_next_pages(source, &self.effective().page_query_param)
    }
}
