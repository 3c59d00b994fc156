//! Holds the active rate table and decides between live and fallback rates

use crate::core::conversion::{self, ConversionResult};
use crate::core::error::Result;
use crate::core::fallback::fallback_table;
use crate::core::metrics;
use crate::core::source::RateSource;
use crate::core::table::RateTable;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where the active table came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RateOrigin {
    Live,
    Fallback { reason: String },
}

impl RateOrigin {
    pub fn is_live(&self) -> bool {
        matches!(self, RateOrigin::Live)
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedRates {
    pub table: Arc<RateTable>,
    pub origin: RateOrigin,
}

impl ResolvedRates {
    pub fn is_live(&self) -> bool {
        self.origin.is_live()
    }
}

/// Fetches rates from `source`, substituting the fallback table on any failure.
pub async fn resolve(source: &dyn RateSource, base: &str) -> ResolvedRates {
    match source.fetch().await {
        Ok(table) => {
            debug!(currencies = table.len(), "Using live rates");
            ResolvedRates {
                table: Arc::new(table),
                origin: RateOrigin::Live,
            }
        }
        Err(e) => {
            warn!(error = %e, "Live rates unavailable, using fallback table");
            ResolvedRates {
                table: Arc::new(fallback_table(base)),
                origin: RateOrigin::Fallback {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Session state for a rate source: the current table plus an explicit refresh.
pub struct RateStore<S: RateSource> {
    source: S,
    base: String,
    current: ResolvedRates,
}

impl<S: RateSource> RateStore<S> {
    /// Resolves rates once and keeps the result as the current snapshot.
    pub async fn open(source: S, base: &str) -> Self {
        let current = resolve(&source, base).await;
        RateStore {
            source,
            base: base.to_string(),
            current,
        }
    }

    /// Replaces the current snapshot with a freshly resolved one.
    pub async fn refresh(&mut self) -> &ResolvedRates {
        self.current = resolve(&self.source, &self.base).await;
        &self.current
    }

    pub fn current(&self) -> &ResolvedRates {
        &self.current
    }

    pub fn snapshot(&self) -> Arc<RateTable> {
        Arc::clone(&self.current.table)
    }

    pub fn origin(&self) -> &RateOrigin {
        &self.current.origin
    }

    pub fn is_live(&self) -> bool {
        self.current.is_live()
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> ConversionResult {
        conversion::convert(amount, from, to, &self.current.table)
    }

    pub fn inverse_rate(&self, code: &str) -> Result<f64> {
        metrics::inverse_rate(&self.current.table, code)
    }

    pub fn cross_rate(&self, from: &str, to: &str) -> Result<f64> {
        metrics::cross_rate(&self.current.table, from, to)
    }
}
