use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of access tokens when a login does not ask for one
    pub access_token_ttl_seconds: i64,
}

/// Payment provider webhook settings.
#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, POLKA__API_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must be set".to_string()));
        }
        if self.polka.api_key.is_empty() {
            return Err(ConfigError::Message("polka.api_key must be set".to_string()));
        }
        if !(1..=auth::MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.jwt.access_token_ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_seconds must be between 1 and {}",
                auth::MAX_ACCESS_TOKEN_TTL_SECONDS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_ttl(access_token_ttl_seconds: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/chirpy".to_string(),
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: "secret".to_string(),
                access_token_ttl_seconds,
            },
            polka: PolkaConfig {
                api_key: "key".to_string(),
            },
        }
    }

    #[test]
    fn test_validate_accepts_ttl_within_bounds() {
        assert!(config_with_ttl(1).validate().is_ok());
        assert!(config_with_ttl(3600).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_ttl_out_of_bounds() {
        assert!(config_with_ttl(0).validate().is_err());
        assert!(config_with_ttl(3601).validate().is_err());
        assert!(config_with_ttl(10_000_000_000_000_000).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_secrets() {
        let mut config = config_with_ttl(3600);
        config.jwt.secret.clear();
        assert!(config.validate().is_err());

        let mut config = config_with_ttl(3600);
        config.polka.api_key.clear();
        assert!(config.validate().is_err());
    }
}
