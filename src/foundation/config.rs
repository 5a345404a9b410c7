use std::{path::PathBuf, time::Duration};

/// Default per-request timeout for remote image sources.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on the size of a single fetched image body.
pub const DEFAULT_FETCH_MAX_BYTES: u64 = 20 * 1024 * 1024;

/// Settings for the image source fetcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    /// Timeout applied to the whole request (connect + read).
    pub timeout: Duration,
    /// Responses larger than this are rejected.
    pub max_bytes: u64,
    /// `User-Agent` header sent with remote requests.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            max_bytes: DEFAULT_FETCH_MAX_BYTES,
            user_agent: format!("scenekit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchConfig {
    /// Defaults overridden by `SCENEKIT_FETCH_TIMEOUT_MS` and `SCENEKIT_FETCH_MAX_BYTES`.
    ///
    /// Unparseable or zero values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(ms) = env_u64("SCENEKIT_FETCH_TIMEOUT_MS") {
            cfg.timeout = Duration::from_millis(ms);
        }
        if let Some(n) = env_u64("SCENEKIT_FETCH_MAX_BYTES") {
            cfg.max_bytes = n;
        }
        cfg
    }
}

/// Settings shared by every backend of a [`crate::Renderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    /// Remote image fetching.
    pub fetch: FetchConfig,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files used by the rasterizer.
    pub font_dirs: Vec<PathBuf>,
    /// Whether the rasterizer loads the host's system fonts.
    pub load_system_fonts: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

impl RendererConfig {
    /// Defaults overridden by the `SCENEKIT_*` environment knobs.
    ///
    /// - `SCENEKIT_FETCH_TIMEOUT_MS`, `SCENEKIT_FETCH_MAX_BYTES` (see [`FetchConfig::from_env`])
    /// - `SCENEKIT_FONT_DIRS`: platform path list of font directories
    /// - `SCENEKIT_SYSTEM_FONTS=0`: skip system font discovery
    pub fn from_env() -> Self {
        let font_dirs = std::env::var_os("SCENEKIT_FONT_DIRS")
            .map(|v| {
                std::env::split_paths(&v)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let load_system_fonts = std::env::var("SCENEKIT_SYSTEM_FONTS")
            .map(|v| v.trim() != "0")
            .unwrap_or(true);

        Self {
            fetch: FetchConfig::from_env(),
            font_dirs,
            load_system_fonts,
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().as_deref().and_then(parse_positive_u64)
}

fn parse_positive_u64(v: &str) -> Option<u64> {
    v.trim().parse::<u64>().ok().filter(|&n| n > 0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
