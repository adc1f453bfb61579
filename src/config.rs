// src/config.rs
use std::{fmt, net::SocketAddr, path::PathBuf, time::Duration};

pub const DEFAULT_API_VERSION: &str = "2024-06-01";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Which wire flavour of the chat-completions API the provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    AzureOpenAi,
    OpenAi,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

// The key never shows up in logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(
        kind: ProviderKind,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let kind = parse_kind(lookup("GPT_PROVIDER").as_deref())?;
        let mut provider = ProviderConfig::new(
            kind,
            required("GPT_MODEL")?,
            required("GPT_ENDPOINT")?,
            required("GPT_KEY")?,
        );
        if let Some(version) = lookup("GPT_API_VERSION") {
            provider.api_version = version;
        }
        provider.request_timeout = Duration::from_secs(parse_secs(
            "GPT_REQUEST_TIMEOUT_SECS",
            lookup("GPT_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        provider.connect_timeout = Duration::from_secs(parse_secs(
            "GPT_CONNECT_TIMEOUT_SECS",
            lookup("GPT_CONNECT_TIMEOUT_SECS"),
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?);

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: "BIND_ADDR",
            reason: e.to_string(),
        })?;
        let static_dir = lookup("STATIC_DIR")
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
            .into();

        Ok(Self {
            server: ServerConfig { bind_addr, static_dir },
            provider,
        })
    }
}

fn parse_kind(raw: Option<&str>) -> Result<ProviderKind, ConfigError> {
    match raw.unwrap_or("azure") {
        "azure" => Ok(ProviderKind::AzureOpenAi),
        "openai" => Ok(ProviderKind::OpenAi),
        other => Err(ConfigError::Invalid {
            var: "GPT_PROVIDER",
            reason: format!("unknown provider '{other}' (expected 'azure' or 'openai')"),
        }),
    }
}

fn parse_secs(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => match v.parse::<u64>() {
            Ok(0) => Err(ConfigError::Invalid {
                var,
                reason: "timeout must be at least one second".to_string(),
            }),
            Ok(secs) => Ok(secs),
            Err(_) => Err(ConfigError::Invalid {
                var,
                reason: format!("'{v}' is not a whole number of seconds"),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("GPT_MODEL", "gpt-4o"),
            ("GPT_ENDPOINT", "https://rfa.openai.azure.com/"),
            ("GPT_KEY", "k"),
        ]))
        .unwrap();

        assert_eq!(cfg.provider.kind, ProviderKind::AzureOpenAi);
        assert_eq!(cfg.provider.endpoint, "https://rfa.openai.azure.com");
        assert_eq!(cfg.provider.api_version, DEFAULT_API_VERSION);
        assert_eq!(cfg.provider.request_timeout, Duration::from_secs(120));
        assert_eq!(cfg.server.bind_addr.port(), 3000);
        assert_eq!(cfg.server.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("GPT_MODEL", "gpt-4o"),
            ("GPT_ENDPOINT", "https://example.com"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GPT_KEY")));
    }

    #[test]
    fn rejects_unknown_provider_and_bad_timeout() {
        let base = [
            ("GPT_MODEL", "m"),
            ("GPT_ENDPOINT", "https://example.com"),
            ("GPT_KEY", "k"),
        ];

        let mut pairs = base.to_vec();
        pairs.push(("GPT_PROVIDER", "bedrock"));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::Invalid { var: "GPT_PROVIDER", .. })
        ));

        let mut pairs = base.to_vec();
        pairs.push(("GPT_REQUEST_TIMEOUT_SECS", "soon"));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::Invalid { var: "GPT_REQUEST_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("GPT_MODEL", "m"),
            ("GPT_ENDPOINT", "https://example.com"),
            ("GPT_KEY", "k"),
            ("GPT_CONNECT_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "GPT_CONNECT_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg = ProviderConfig::new(ProviderKind::OpenAi, "m", "https://x", "super-secret");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
