//! Configuration module
//!
//! Each pagination mode has its own config struct. [`AppConfig`] bundles both
//! with the logging and demo server settings and is read from a TOML file
//! where every section and key is optional.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::ConfigError;

pub const DEFAULT_PAGE_PARAM: &str = "page";
pub const DEFAULT_CURSOR_PARAM: &str = "cursor";
pub const DEFAULT_LIMIT_PARAM: &str = "limit";
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_MAX_LIMIT: u32 = 50;

/// Offset (page/limit) pagination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetPaginationConfig {
    /// Query key holding the page number
    pub page_query_param: String,
    /// Query key holding the page size
    pub limit_query_param: String,
    /// Page size used when the request supplies none
    pub default_limit: u32,
    /// Upper bound for the page size
    pub max_limit: u32,
}

impl OffsetPaginationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_query_param(mut self, name: impl Into<String>) -> Self {
        self.page_query_param = name.into();
        self
    }

    pub fn with_limit_query_param(mut self, name: impl Into<String>) -> Self {
        self.limit_query_param = name.into();
        self
    }

    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_max_limit(mut self, limit: u32) -> Self {
        self.max_limit = limit;
        self
    }

    /// Replace unset values (empty names, zero limits) with the defaults.
    pub fn sanitized(self) -> Self {
        Self {
            page_query_param: or_default_name(self.page_query_param, DEFAULT_PAGE_PARAM),
            limit_query_param: or_default_name(self.limit_query_param, DEFAULT_LIMIT_PARAM),
            default_limit: or_default_limit(self.default_limit, DEFAULT_LIMIT),
            max_limit: or_default_limit(self.max_limit, DEFAULT_MAX_LIMIT),
        }
    }

    /// This config with unset values filled in, borrowed when nothing is unset.
    pub fn effective(&self) -> Cow<'_, Self> {
        let unset = self.page_query_param.is_empty()
            || self.limit_query_param.is_empty()
            || self.default_limit == 0
            || self.max_limit == 0;
        if unset {
            Cow::Owned(self.clone().sanitized())
        } else {
            Cow::Borrowed(self)
        }
    }
}

impl Default for OffsetPaginationConfig {
    fn default() -> Self {
        Self {
            page_query_param: DEFAULT_PAGE_PARAM.to_string(),
            limit_query_param: DEFAULT_LIMIT_PARAM.to_string(),
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// Cursor (cursor/limit) pagination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorPaginationConfig {
    /// Query key holding the opaque cursor
    pub cursor_query_param: String,
    /// Query key holding the page size
    pub limit_query_param: String,
    /// Page size used when the request supplies none
    pub default_limit: u32,
    /// Upper bound for the page size
    pub max_limit: u32,
}

impl CursorPaginationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor_query_param(mut self, name: impl Into<String>) -> Self {
        self.cursor_query_param = name.into();
        self
    }

    pub fn with_limit_query_param(mut self, name: impl Into<String>) -> Self {
        self.limit_query_param = name.into();
        self
    }

    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_max_limit(mut self, limit: u32) -> Self {
        self.max_limit = limit;
        self
    }

    /// Replace unset values (empty names, zero limits) with the defaults.
    pub fn sanitized(self) -> Self {
        Self {
            cursor_query_param: or_default_name(self.cursor_query_param, DEFAULT_CURSOR_PARAM),
            limit_query_param: or_default_name(self.limit_query_param, DEFAULT_LIMIT_PARAM),
            default_limit: or_default_limit(self.default_limit, DEFAULT_LIMIT),
            max_limit: or_default_limit(self.max_limit, DEFAULT_MAX_LIMIT),
        }
    }

    /// This config with unset values filled in, borrowed when nothing is unset.
    pub fn effective(&self) -> Cow<'_, Self> {
        let unset = self.cursor_query_param.is_empty()
            || self.limit_query_param.is_empty()
            || self.default_limit == 0
            || self.max_limit == 0;
        if unset {
            Cow::Owned(self.clone().sanitized())
        } else {
            Cow::Borrowed(self)
        }
    }
}

impl Default for CursorPaginationConfig {
    fn default() -> Self {
        Self {
            cursor_query_param: DEFAULT_CURSOR_PARAM.to_string(),
            limit_query_param: DEFAULT_LIMIT_PARAM.to_string(),
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

fn or_default_name(name: String, default: &str) -> String {
    if name.is_empty() {
        default.to_string()
    } else {
        name
    }
}

fn or_default_limit(limit: u32, default: u32) -> u32 {
    if limit == 0 {
        default
    } else {
        limit
    }
}

/// Demo server bind address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub offset: OffsetPaginationConfig,
    pub cursor: CursorPaginationConfig,
}

impl AppConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// `<config dir>/query-pagination/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("query-pagination"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let offset = OffsetPaginationConfig::default();
        assert_eq!(offset.page_query_param, "page");
        assert_eq!(offset.limit_query_param, "limit");
        assert_eq!(offset.default_limit, 10);
        assert_eq!(offset.max_limit, 50);

        let cursor = CursorPaginationConfig::default();
        assert_eq!(cursor.cursor_query_param, "cursor");
        assert_eq!(cursor.limit_query_param, "limit");
        assert_eq!(cursor.default_limit, 10);
        assert_eq!(cursor.max_limit, 50);
    }

    #[test]
    fn sanitized_restores_unset_values() {
        let offset = OffsetPaginationConfig::new()
            .with_page_query_param("")
            .with_default_limit(0)
            .with_max_limit(0)
            .sanitized();
        assert_eq!(offset, OffsetPaginationConfig::default());

        let cursor = CursorPaginationConfig::new()
            .with_cursor_query_param("after")
            .with_limit_query_param("")
            .with_max_limit(100)
            .sanitized();
        assert_eq!(cursor.cursor_query_param, "after");
        assert_eq!(cursor.limit_query_param, "limit");
        assert_eq!(cursor.max_limit, 100);
    }

    #[test]
    fn effective_borrows_complete_configs() {
        let config = OffsetPaginationConfig::default();
        assert!(matches!(config.effective(), Cow::Borrowed(_)));

        let config = CursorPaginationConfig::new().with_max_limit(0);
        let effective = config.effective();
        assert!(matches!(effective, Cow::Owned(_)));
        assert_eq!(effective.max_limit, DEFAULT_MAX_LIMIT);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [logging]
            format = "json"

            [offset]
            page_query_param = "p"
            max_limit = 100

            [cursor]
            default_limit = 25
            "#,
        )
        .unwrap();

        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.offset.page_query_param, "p");
        assert_eq!(cfg.offset.limit_query_param, "limit");
        assert_eq!(cfg.offset.max_limit, 100);
        assert_eq!(cfg.cursor.default_limit, 25);
        assert_eq!(cfg.cursor.max_limit, 50);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.offset, OffsetPaginationConfig::default());
        assert_eq!(cfg.cursor, CursorPaginationConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/query-pagination.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(AppConfig::from_toml("[offset]\nmax_limit = \"many\"").is_err());
    }
}
