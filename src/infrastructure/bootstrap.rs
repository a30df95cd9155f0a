//! Composition root: builds oracles, routing and the engine from config.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::adapter::{FixedOracle, StaticRouter};
use crate::application::TriggerEngine;
use crate::domain::OrderFamily;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Clock, LogNotifier, Notifier};

/// Configured oracles keyed by family.
#[derive(Debug, Default, Clone)]
pub struct OracleSet {
    oracles: BTreeMap<OrderFamily, Arc<FixedOracle>>,
}

impl OracleSet {
    /// Build one oracle per `[[oracles]]` entry, publishing the initial
    /// smoothed value at `now` when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry's precision pair is unusable.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &Config, now: u64) -> Result<Self> {
        let oracles = config
            .oracles
            .iter()
            .map(|entry| {
                let mut oracle = FixedOracle::new(entry.decimals, entry.raw_decimals)?;
                if let Some(max) = entry.max_sample {
                    oracle = oracle.with_max_raw(max);
                }
                if let Some(smoothed) = entry.smoothed {
                    oracle = oracle.with_price(smoothed, now);
                }
                Ok((entry.family, Arc::new(oracle)))
            })
            .collect::<Result<_>>()?;
        Ok(Self { oracles })
    }

    #[must_use]
    pub fn get(&self, family: OrderFamily) -> Option<&Arc<FixedOracle>> {
        self.oracles.get(&family)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.oracles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.oracles.is_empty()
    }

    /// Routing table over these oracles.
    #[must_use]
    pub fn router(&self) -> StaticRouter {
        self.oracles
            .iter()
            .fold(StaticRouter::new(), |router, (family, oracle)| {
                router.with_route(*family, oracle.clone())
            })
    }
}

/// Log notifier that renders thresholds with each configured oracle's
/// precision.
#[must_use]
pub fn log_notifier(config: &Config) -> LogNotifier {
    config
        .oracles
        .iter()
        .fold(LogNotifier::new(), |notifier, entry| {
            notifier.with_decimals(entry.family, entry.decimals)
        })
}

/// Build the engine and its oracles from configuration.
///
/// # Errors
///
/// Returns an error if an oracle entry or the engine settings are rejected.
#[allow(clippy::result_large_err)]
pub fn build_engine(
    config: &Config,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
) -> Result<(TriggerEngine, OracleSet)> {
    let oracles = OracleSet::from_config(config, clock.now())?;
    let engine = TriggerEngine::new(
        config.engine.settings(),
        Arc::new(oracles.router()),
        notifier,
        clock,
    )?;
    info!(
        admin = %engine.admin(),
        trusted_caller = %engine.trusted_caller(),
        expiration_period = engine.expiration_period(),
        oracles = oracles.len(),
        "Engine ready"
    );
    Ok((engine, oracles))
}
