//! External exchange-rate sources and the background refresher.
//!
//! Two differently-shaped upstreams feed the rate table: a multi-currency
//! quote object keyed by code, and a single nested BTC ticker. The refresher
//! fetches both, then overwrites the table in one transaction; a failed cycle
//! writes nothing and the loop retries on the next tick.

pub mod client;
pub mod refresher;

pub use client::{RateClient, RateFetchError};
pub use refresher::{RateRefresher, RefreshError};
