//! Ready-made engine for lifecycle tests.

use std::sync::Arc;

use alloy_primitives::U256;

use crate::adapter::{FixedOracle, ManualClock, StaticRouter};
use crate::application::{EngineSettings, TriggerEngine};
use crate::domain::OrderFamily;
use crate::port::Clock;

use super::domain::{price, ADMIN, KEEPER};
use super::notifier::RecordingNotifier;

/// Clock value the fixture starts at.
pub const START: u64 = 1_000;

/// An engine with one 6/18-decimal oracle per family, each smoothed at 99.
pub struct Fixture {
    pub engine: TriggerEngine,
    pub perpetual: Arc<FixedOracle>,
    pub long: Arc<FixedOracle>,
    pub short: Arc<FixedOracle>,
    pub clock: Arc<ManualClock>,
    pub events: RecordingNotifier,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::new(ADMIN, KEEPER))
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        let oracle = || {
            Arc::new(
                FixedOracle::new(6, 18)
                    .expect("6/18 precision is valid")
                    .with_price(price(99, 0), START),
            )
        };
        let (perpetual, long, short) = (oracle(), oracle(), oracle());
        let router = StaticRouter::new()
            .with_route(OrderFamily::Perpetual, perpetual.clone())
            .with_route(OrderFamily::LeveragedLong, long.clone())
            .with_route(OrderFamily::LeveragedShort, short.clone());
        let clock = Arc::new(ManualClock::new(START));
        let events = RecordingNotifier::new();
        let engine = TriggerEngine::new(
            settings,
            Arc::new(router),
            Arc::new(events.clone()),
            clock.clone(),
        )
        .expect("fixture settings are valid");

        Self {
            engine,
            perpetual,
            long,
            short,
            clock,
            events,
        }
    }

    /// Oracle serving `family`.
    pub fn oracle(&self, family: OrderFamily) -> &Arc<FixedOracle> {
        match family {
            OrderFamily::Perpetual => &self.perpetual,
            OrderFamily::LeveragedLong => &self.long,
            OrderFamily::LeveragedShort => &self.short,
        }
    }

    /// Publish a new smoothed value for `family` at the current time.
    pub fn set_smoothed(&self, family: OrderFamily, value: U256) {
        self.oracle(family).publish(value, self.clock.now());
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
