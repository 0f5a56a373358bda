use std::env;
use std::time::Duration;

/// Public NASA key. Works without signing up but is heavily rate limited.
pub const DEMO_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_API_BASE: &str = "https://api.nasa.gov/mars-photos/api/v1/rovers";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Settings read once at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("NASA_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::info!("NASA_API_KEY not set, using {}", DEMO_API_KEY);
                DEMO_API_KEY.to_string()
            });

        let api_base = lookup("NASA_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let cache_ttl = parse_number("PHOTO_CACHE_TTL_SECS", lookup("PHOTO_CACHE_TTL_SECS"))
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL);

        let cache_capacity = parse_number("PHOTO_CACHE_CAPACITY", lookup("PHOTO_CACHE_CAPACITY"))
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CACHE_CAPACITY);

        Self {
            api_key,
            api_base,
            cache_ttl,
            cache_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

fn parse_number(name: &str, raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_key_falls_back_to_demo_key() {
        let config = config_from(&[]);
        assert_eq!(config.api_key, DEMO_API_KEY);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        assert_eq!(config_from(&[("NASA_API_KEY", "  ")]).api_key, DEMO_API_KEY);
    }

    #[test]
    fn env_values_override_defaults() {
        let config = config_from(&[
            ("NASA_API_KEY", "secret"),
            ("NASA_API_BASE", "http://localhost:9000/rovers"),
            ("PHOTO_CACHE_TTL_SECS", "60"),
            ("PHOTO_CACHE_CAPACITY", "8"),
        ]);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_base, "http://localhost:9000/rovers");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.cache_capacity, 8);
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let config = config_from(&[("PHOTO_CACHE_TTL_SECS", "hour"), ("PHOTO_CACHE_CAPACITY", "0")]);
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }
}
