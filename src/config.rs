use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use earlybird_quote::FormConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of the static site served next to the quote endpoint
    pub public_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Inbox receiving quote requests
    #[serde(default = "default_quote_address")]
    pub quote_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            quote_address: default_quote_address(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@earlybird.localhost".to_string()
}

fn default_quote_address() -> String {
    "quotes@earlybird.localhost".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy SMTP environment variables (SMTP_SERVER, SMTP_PORT, SMTP_USER, SMTP_PASS)
    /// 2. Environment variables (EARLYBIRD__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.public_dir", "public")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional - ignore if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("EARLYBIRD")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(smtp_server) = env::var("SMTP_SERVER") {
            builder = builder.set_override("email.smtp_host", smtp_server)?;
        }
        if let Ok(smtp_port) = env::var("SMTP_PORT") {
            builder = builder.set_override("email.smtp_port", smtp_port)?;
        }
        if let Ok(smtp_user) = env::var("SMTP_USER") {
            builder = builder.set_override("email.smtp_username", smtp_user)?;
        }
        if let Ok(smtp_pass) = env::var("SMTP_PASS") {
            builder = builder.set_override("email.smtp_password", smtp_pass)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.quote_address.parse::<lettre::Address>().is_err() {
            return Err(format!(
                "Quote address '{}' is not a valid email address",
                self.email.quote_address
            ));
        }
        if self.email.from_address.parse::<lettre::Address>().is_err() {
            return Err(format!(
                "From address '{}' is not a valid email address",
                self.email.from_address
            ));
        }
        self.form.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                public_dir: "public".to_string(),
            },
            email: EmailConfig::default(),
            form: FormConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_quote_address() {
        let mut config = config();
        config.email.quote_address = "not an address".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_notification_ttl() {
        let mut config = config();
        config.form.notification_ttl_ms = 0;

        assert!(config.validate().is_err());
    }
}
