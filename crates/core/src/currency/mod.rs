//! Cross-currency amount conversion.

pub mod conversion;

#[cfg(test)]
mod props;

pub use conversion::{BASE_CURRENCY, CurrencyRate, convert};
