use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(1500);

pub const DEFAULT_MAX_BODY_BYTES: u64 = 32 * 1024 * 1024;

/// Settings for the analyzer façade and its URL loader.
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    /// Pause before a successful result is published. Zero disables it.
    pub processing_delay: Duration,
    /// Origin the analysis runs on behalf of. When set, remote images must
    /// grant it read access through `Access-Control-Allow-Origin`.
    pub origin: Option<String>,
    /// Upper bound for a remote fetch. No bound when `None`.
    pub fetch_timeout: Option<Duration>,
    /// Remote images with a larger body are refused.
    pub max_body_bytes: u64,
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            processing_delay: DEFAULT_PROCESSING_DELAY,
            origin: None,
            fetch_timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Reads overrides from the environment. Unset or invalid variables keep
    /// their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ms) = try_load::<u64>("ARTWORK_PROCESSING_DELAY_MS") {
            config.processing_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = try_load::<u64>("ARTWORK_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(bytes) = try_load::<u64>("ARTWORK_MAX_BODY_BYTES") {
            config.max_body_bytes = bytes;
        }
        config.origin = var("ARTWORK_ORIGIN").filter(|o| !o.trim().is_empty());
        config
    }

    pub fn without_delay(mut self) -> Self {
        self.processing_delay = Duration::ZERO;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) => Some(value),
        Err(_) => {
            info!("{key} not set, using default");
            None
        }
    }
}

fn try_load<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: Display,
{
    var(key)?
        .trim()
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}, using default");
        })
        .ok()
}
