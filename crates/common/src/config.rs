//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Identity provider configuration.
    pub auth: AuthConfig,
    /// Chat assistant configuration.
    pub assistant: AssistantConfig,
    /// Wallet configuration.
    #[serde(default)]
    pub wallet: WalletConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Identity provider configuration.
///
/// Bearer tokens are verified against this provider; the JWKS document is
/// fetched from `https://{domain}/.well-known/jwks.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Identity provider domain (e.g. `example.auth-provider.com`).
    pub domain: String,
    /// Expected token audience.
    pub audience: String,
}

impl AuthConfig {
    /// Expected token issuer URL.
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// JWKS document URL.
    #[must_use]
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Generative-AI API key.
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_assistant_model")]
    pub model: String,
}

/// Wallet configuration.
///
/// The secret is reserved for a future ledger integration; it is never
/// used to sign anything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Opaque wallet secret.
    #[serde(default)]
    pub secret: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    4000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_assistant_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `ATELIER_ENV`)
    /// 3. Environment variables with `ATELIER_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("ATELIER_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ATELIER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("ATELIER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_urls() {
        let auth = AuthConfig {
            domain: "tenant.example-idp.com".to_string(),
            audience: "https://api.example.com".to_string(),
        };
        assert_eq!(auth.issuer(), "https://tenant.example-idp.com/");
        assert_eq!(
            auth.jwks_url(),
            "https://tenant.example-idp.com/.well-known/jwks.json"
        );
    }
}
