use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Runtime configuration: defaults, merged with `spamsieve.toml`, merged
/// with `SIEVE_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SieveConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Directory holding `model.json` and `model_manifest.json`.
    pub model_dir: String,
    /// Request timeout applied at the service boundary.
    pub request_timeout_secs: u64,
    /// Maximum accepted message length in bytes.
    pub max_message_len: usize,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            model_dir: "data/model".to_string(),
            request_timeout_secs: 5,
            max_message_len: 16 * 1024,
        }
    }
}

pub fn load_config(path: Option<&str>) -> Result<SieveConfig, figment::Error> {
    let figment = Figment::from(Serialized::defaults(SieveConfig::default()))
        .merge(Toml::file(path.unwrap_or("spamsieve.toml")))
        .merge(Env::prefixed("SIEVE_"));

    let config: SieveConfig = figment.extract()?;

    if config.bind_addr.parse::<std::net::SocketAddr>().is_err() {
        return Err(figment::Error::from(format!(
            "bind_addr '{}' is not a valid socket address",
            config.bind_addr
        )));
    }
    if config.max_message_len == 0 {
        return Err(figment::Error::from(
            "max_message_len must be nonzero".to_string(),
        ));
    }
    if config.request_timeout_secs == 0 {
        return Err(figment::Error::from(
            "request_timeout_secs must be nonzero".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SieveConfig::default();
        assert!(config.bind_addr.parse::<std::net::SocketAddr>().is_ok());
        assert!(config.max_message_len > 0);
    }
}
