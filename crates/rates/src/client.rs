//! HTTP client for the two external rate sources.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use payline_core::currency::BASE_CURRENCY;
use payline_shared::config::RatesConfig;

/// A stuck upstream must not delay the next cycle indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while fetching external rates.
#[derive(Debug, Error)]
pub enum RateFetchError {
    /// Network or protocol failure.
    #[error("rate source request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response parsed, but a requested symbol was absent.
    #[error("rate source response is missing symbol '{0}'")]
    MissingSymbol(String),
}

/// Multi-currency quote response, rates keyed by currency code.
#[derive(Debug, Deserialize)]
pub struct FiatQuote {
    /// Rates relative to the requested base currency.
    pub rates: HashMap<String, Decimal>,
}

/// One entry of the crypto ticker response.
#[derive(Debug, Deserialize)]
pub struct TickerEntry {
    /// Last traded price.
    pub last: Decimal,
}

/// Crypto ticker response, quotes keyed by fiat currency code.
pub type CryptoTicker = HashMap<String, TickerEntry>;

/// Client for both upstream rate sources.
#[derive(Debug, Clone)]
pub struct RateClient {
    http: reqwest::Client,
    fiat_url: String,
    fiat_symbols: Vec<String>,
    crypto_url: String,
}

impl RateClient {
    /// Creates a client from the rates configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &RatesConfig) -> Result<Self, RateFetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            fiat_url: config.fiat_url.clone(),
            fiat_symbols: config.fiat_symbols.clone(),
            crypto_url: config.crypto_url.clone(),
        })
    }

    /// Fetches the complete rate set for one refresh cycle.
    ///
    /// Both upstream calls finish before this returns, so a failure here
    /// happens strictly before any store write.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or shape failure encountered.
    pub async fn fetch_all(&self) -> Result<Vec<(String, Decimal)>, RateFetchError> {
        let fiat: FiatQuote = self
            .http
            .get(&self.fiat_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ticker: CryptoTicker = self
            .http
            .get(&self.crypto_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        collect_rates(&fiat, &self.fiat_symbols, &ticker)
    }
}

/// Combines both responses into the rate set written in one sweep.
///
/// The base currency is pinned at 1.0 and rewritten every cycle.
pub fn collect_rates(
    fiat: &FiatQuote,
    symbols: &[String],
    ticker: &CryptoTicker,
) -> Result<Vec<(String, Decimal)>, RateFetchError> {
    let mut rates = vec![(BASE_CURRENCY.to_string(), Decimal::ONE)];

    for symbol in symbols {
        let rate = fiat
            .rates
            .get(symbol)
            .ok_or_else(|| RateFetchError::MissingSymbol(symbol.clone()))?;
        rates.push((symbol.clone(), *rate));
    }

    let btc = ticker
        .get(BASE_CURRENCY)
        .ok_or_else(|| RateFetchError::MissingSymbol("BTC".to_string()))?;
    rates.push(("BTC".to_string(), btc.last));

    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn symbols() -> Vec<String> {
        vec!["EUR".to_string(), "GBP".to_string(), "RUB".to_string()]
    }

    #[test]
    fn test_parse_fiat_quote() {
        let fiat: FiatQuote = serde_json::from_str(
            r#"{"base": "USD", "rates": {"EUR": 0.9, "GBP": 0.8, "RUB": 65.33}}"#,
        )
        .unwrap();

        assert_eq!(fiat.rates["GBP"], dec!(0.8));
    }

    #[test]
    fn test_parse_crypto_ticker() {
        let ticker: CryptoTicker = serde_json::from_str(
            r#"{"USD": {"last": 9123.45, "symbol": "$"}, "EUR": {"last": 8200.0}}"#,
        )
        .unwrap();

        assert_eq!(ticker["USD"].last, dec!(9123.45));
    }

    #[test]
    fn test_collect_rates_pins_base_and_appends_btc() {
        let fiat: FiatQuote =
            serde_json::from_str(r#"{"rates": {"EUR": 0.9, "GBP": 0.8, "RUB": 65.0}}"#).unwrap();
        let ticker: CryptoTicker =
            serde_json::from_str(r#"{"USD": {"last": 9000.0}}"#).unwrap();

        let rates = collect_rates(&fiat, &symbols(), &ticker).unwrap();

        assert_eq!(rates[0], ("USD".to_string(), Decimal::ONE));
        assert_eq!(rates.last().unwrap(), &("BTC".to_string(), dec!(9000)));
        assert_eq!(rates.len(), 5);
    }

    #[test]
    fn test_collect_rates_fails_on_missing_symbol() {
        let fiat: FiatQuote = serde_json::from_str(r#"{"rates": {"EUR": 0.9}}"#).unwrap();
        let ticker: CryptoTicker =
            serde_json::from_str(r#"{"USD": {"last": 9000.0}}"#).unwrap();

        let result = collect_rates(&fiat, &symbols(), &ticker);
        assert!(matches!(result, Err(RateFetchError::MissingSymbol(s)) if s == "GBP"));
    }

    #[test]
    fn test_collect_rates_fails_on_missing_ticker_entry() {
        let fiat: FiatQuote =
            serde_json::from_str(r#"{"rates": {"EUR": 0.9, "GBP": 0.8, "RUB": 65.0}}"#).unwrap();
        let ticker: CryptoTicker = serde_json::from_str(r#"{"EUR": {"last": 8200.0}}"#).unwrap();

        let result = collect_rates(&fiat, &symbols(), &ticker);
        assert!(matches!(result, Err(RateFetchError::MissingSymbol(s)) if s == "BTC"));
    }
}
