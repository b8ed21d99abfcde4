use persistence::db::DatabaseConfig;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    /// Public-facing URLs for invite links and checkout redirects
    pub app: AppConfig,
    /// Email service configuration
    #[serde(default)]
    pub email: EmailConfig,
    /// Stripe checkout configuration
    #[serde(default)]
    pub stripe: StripeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the web frontend, used to build vendor registration
    /// links and checkout redirect URLs (e.g. https://tipwedding.example)
    pub base_url: String,
}

/// Email service configuration for invitation delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Whether email sending is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Email provider: resend, or console (for development)
    #[serde(default = "default_email_provider")]
    pub provider: String,

    /// Resend API key (for resend provider)
    #[serde(default)]
    pub resend_api_key: String,

    /// Sender email address (From header)
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Sender name (From header)
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_email_provider(),
            resend_api_key: String::new(),
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
        }
    }
}

/// Stripe Connect checkout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    /// Secret API key. Card checkout is unavailable when empty.
    #[serde(default)]
    pub secret_key: String,

    /// Platform fee taken on card tips, in percent
    #[serde(default = "default_application_fee_percent")]
    pub application_fee_percent: u32,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            application_fee_percent: default_application_fee_percent(),
        }
    }
}

impl StripeConfig {
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_email_provider() -> String {
    "console".to_string()
}
fn default_sender_email() -> String {
    "noreply@tipwedding.app".to_string()
}
fn default_sender_name() -> String {
    "TipWedding".to_string()
}
fn default_application_fee_percent() -> u32 {
    5
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with WT__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("WT").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "database.url".to_string(),
            ));
        }
        if self.app.base_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "app.base_url".to_string(),
            ));
        }
        if self.email.enabled
            && self.email.provider == "resend"
            && self.email.resend_api_key.is_empty()
        {
            return Err(ConfigValidationError::MissingRequired(
                "email.resend_api_key".to_string(),
            ));
        }
        if self.email.enabled && !matches!(self.email.provider.as_str(), "resend" | "console") {
            return Err(ConfigValidationError::InvalidValue(format!(
                "email.provider: unknown provider '{}'",
                self.email.provider
            )));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/tipwedding".to_string(),
                max_connections: 20,
                min_connections: 2,
                connect_timeout_secs: 10,
                idle_timeout_secs: 600,
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            security: SecurityConfig::default(),
            app: AppConfig {
                base_url: "https://tipwedding.example".to_string(),
            },
            email: EmailConfig::default(),
            stripe: StripeConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_missing_database_url_fails() {
        let mut config = base_config();
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_resend_requires_api_key() {
        let mut config = base_config();
        config.email.enabled = true;
        config.email.provider = "resend".to_string();
        assert!(config.validate().is_err());

        config.email.resend_api_key = "re_test_key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_email_provider_rejected() {
        let mut config = base_config();
        config.email.enabled = true;
        config.email.provider = "pigeon".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = base_config();
        assert_eq!(config.socket_addr().port(), 8080);
    }

    #[test]
    fn test_stripe_configured() {
        let mut config = base_config();
        assert!(!config.stripe.is_configured());
        config.stripe.secret_key = "sk_test_123".to_string();
        assert!(config.stripe.is_configured());
    }
}
