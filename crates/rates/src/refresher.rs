//! Background task that keeps the rate table current.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use payline_db::CurrencyRepository;

use crate::client::RateClient;

/// Periodically fetches external rates and overwrites the rate table.
///
/// The task runs on the shared runtime, suspending on the fetches and on its
/// interval. A failed cycle is logged and skipped; the table is only written
/// after both fetches succeed, so it is never left partially updated.
#[derive(Debug)]
pub struct RateRefresher {
    client: RateClient,
    currencies: CurrencyRepository,
    interval: Duration,
}

impl RateRefresher {
    /// Creates a refresher with the given cycle interval.
    #[must_use]
    pub const fn new(client: RateClient, currencies: CurrencyRepository, interval: Duration) -> Self {
        Self {
            client,
            currencies,
            interval,
        }
    }

    /// Runs refresh cycles until the shutdown signal flips.
    ///
    /// The first cycle runs immediately; subsequent ones follow the
    /// configured interval.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs(), "rate refresher started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh_once().await {
                        warn!(error = %e, "rate refresh cycle skipped");
                    }
                }
                _ = shutdown.changed() => {
                    info!("rate refresher stopping");
                    break;
                }
            }
        }
    }

    /// Executes one refresh cycle: fetch everything, then write everything.
    ///
    /// # Errors
    ///
    /// Returns an error if either fetch or the table sweep fails; in both
    /// cases the rate table is byte-identical to before the cycle.
    pub async fn refresh_once(&self) -> Result<(), RefreshError> {
        let rates = self.client.fetch_all().await?;
        self.currencies.set_rates(&rates).await?;

        info!(count = rates.len(), "exchange rates updated");
        Ok(())
    }
}

/// Errors that can abort one refresh cycle.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// An upstream fetch failed before any write.
    #[error(transparent)]
    Fetch(#[from] crate::client::RateFetchError),

    /// The table sweep failed and rolled back.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
