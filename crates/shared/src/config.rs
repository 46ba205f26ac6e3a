//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Token signing configuration.
    pub auth: AuthConfig,
    /// Exchange-rate refresh configuration.
    pub rates: RatesConfig,
    /// Initial administrator account seeded at startup.
    pub seed: SeedConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Token signing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_minutes: i64,
}

fn default_token_lifetime() -> i64 {
    10
}

/// Exchange-rate refresh configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Minutes between refresh cycles.
    #[serde(default = "default_update_interval")]
    pub update_interval_minutes: u64,
    /// Multi-currency quote source (rates keyed by currency code).
    #[serde(default = "default_fiat_url")]
    pub fiat_url: String,
    /// Symbols requested from the multi-currency source.
    #[serde(default = "default_fiat_symbols")]
    pub fiat_symbols: Vec<String>,
    /// Single-ticker source for the BTC rate.
    #[serde(default = "default_crypto_url")]
    pub crypto_url: String,
}

fn default_update_interval() -> u64 {
    10
}

fn default_fiat_url() -> String {
    "https://api.exchangeratesapi.io/latest?base=USD&symbols=EUR,GBP,RUB".to_string()
}

fn default_fiat_symbols() -> Vec<String> {
    vec!["EUR".to_string(), "GBP".to_string(), "RUB".to_string()]
}

fn default_crypto_url() -> String {
    "https://blockchain.info/ticker".to_string()
}

/// Initial administrator account, created at startup if absent.
///
/// The first account is the one that can register all subsequent ones.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Administrator email.
    pub email: String,
    /// Administrator password (hashed before storage).
    pub password: String,
    /// Starting balance.
    pub balance: Decimal,
    /// Account currency code.
    pub currency: String,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PAYLINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_from_minimal_source() {
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                [database]
                url = "postgres://localhost/payline"
                [auth]
                secret = "s3cret"
                [rates]
                [seed]
                email = "admin@example.com"
                password = "admin"
                balance = "1000"
                currency = "USD"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.auth.token_lifetime_minutes, 10);
        assert_eq!(cfg.rates.update_interval_minutes, 10);
        assert_eq!(cfg.rates.fiat_symbols, vec!["EUR", "GBP", "RUB"]);
        assert_eq!(cfg.seed.balance, dec!(1000));
    }
}
