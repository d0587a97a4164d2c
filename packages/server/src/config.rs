//! Server configuration, populated from environment variables.

use std::net::SocketAddr;

/// Runtime configuration for a Quill server.
///
/// Every field has a default, so the server starts with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `QUILL_BIND` | `0.0.0.0:8080` | TCP socket address to listen on |
/// | `QUILL_DB` | (absent = in-memory) | Path to the SQLite database file |
/// | `QUILL_DEFAULT_PAGE_SIZE` | `10` | Page size when a listing omits `page_size` |
/// | `QUILL_MAX_PAGE_SIZE` | `100` | Upper bound applied to `page_size` |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    /// Path to the SQLite database file.
    /// `None` means use an in-memory store (data is lost on restart).
    pub db_path: Option<String>,

    pub paging: PagingConfig,
}

/// Page-size limits for `GET /api/posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: None,
            paging: PagingConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ServerConfig {
    /// Populate config from the process environment, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Populate config from an arbitrary key lookup. Used by [`from_env`] and tests.
    ///
    /// [`from_env`]: ServerConfig::from_env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("QUILL_BIND") {
            Some(v) => v.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
                var: "QUILL_BIND",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.bind_addr,
        };

        let default_page_size = page_size_var(
            &lookup,
            "QUILL_DEFAULT_PAGE_SIZE",
            defaults.paging.default_page_size,
        )?;
        let max_page_size =
            page_size_var(&lookup, "QUILL_MAX_PAGE_SIZE", defaults.paging.max_page_size)?;

        if default_page_size > max_page_size {
            return Err(ConfigError::Invalid {
                var: "QUILL_DEFAULT_PAGE_SIZE",
                value: default_page_size.to_string(),
                reason: format!("must not exceed QUILL_MAX_PAGE_SIZE ({max_page_size})"),
            });
        }

        Ok(Self {
            bind_addr,
            db_path: lookup("QUILL_DB").filter(|p| !p.trim().is_empty()),
            paging: PagingConfig {
                default_page_size,
                max_page_size,
            },
        })
    }
}

fn page_size_var<F>(lookup: &F, var: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            value: raw,
            reason: "must be at least 1".into(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
