use nano_http::codec::DEFAULT_LOOKAHEAD_LIMIT;
use serde::Deserialize;

/// Default number of connections processed at the same time.
pub const DEFAULT_WORKERS: usize = 64;

/// Default listen address.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

/// Server settings, usually deserialized from the application's config file.
///
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    /// Bytes the request parser may look ahead when searching for the end of
    /// the request line and of the header block.
    pub lookahead_limit: usize,
    /// Size of the worker pool.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: DEFAULT_ADDRESS.to_string(), lookahead_limit: DEFAULT_LOOKAHEAD_LIMIT, workers: DEFAULT_WORKERS }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.address, "127.0.0.1:8080");
        assert_eq!(config.lookahead_limit, 4096);
        assert_eq!(config.workers, 64);
    }

    #[test]
    fn deserialize_partial() {
        let config: ServerConfig = serde_json::from_str(r#"{ "address": "0.0.0.0:9000", "workers": 8 }"#).unwrap();

        assert_eq!(config, ServerConfig { address: "0.0.0.0:9000".to_string(), lookahead_limit: 4096, workers: 8 });
    }

    #[test]
    fn deserialize_empty() {
        let config: ServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ServerConfig::default());
    }
}
