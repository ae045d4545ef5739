use {
    crate::adapters::yookassa_client::{DEFAULT_API_URL, YooKassaConfig},
    std::env,
    thiserror::Error,
};

const DEFAULT_RETURN_URL: &str = "https://www.example.com/return_url";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub yookassa: YooKassaConfig,
}

impl Config {
    /// Read from the process environment (call `dotenvy::dotenv()` first).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, with the variable source injected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Blank counts as unset.
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let server_port = parse("SERVER_PORT", required("SERVER_PORT")?)?;
        let database_max_connections = match optional("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse("DATABASE_MAX_CONNECTIONS", v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            server_port,
            database_url: required("DATABASE_URL")?,
            database_max_connections,
            yookassa: YooKassaConfig {
                api_url: optional("YOOKASSA_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                shop_id: required("YOOKASSA_SHOP_ID")?,
                secret_key: required("YOOKASSA_SECRET_KEY")?,
                return_url: optional("YOOKASSA_RETURN_URL")
                    .unwrap_or_else(|| DEFAULT_RETURN_URL.to_string()),
            },
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
