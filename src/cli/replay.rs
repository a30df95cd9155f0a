//! `tripwire replay`: drive an in-memory engine from a JSON step script.
//!
//! A script is a JSON array of steps tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "create", "order_type": "perpetual_limit", "id": 1,
//!     "owner": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
//!     "execution_fee": 5, "threshold": "100_000000" },
//!   { "op": "trigger", "id": 1, "sample": "98_500000_000000000000" }
//! ]
//! ```
//!
//! Lifecycle steps run as the configured trusted caller unless they name a
//! `caller`. The clock only moves on `advance`.

use std::fs;
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;

use super::command::ReplayArgs;
use super::output;
use crate::adapter::ManualClock;
use crate::application::TriggerEngine;
use crate::domain::{NewOrder, OrderFamily, OrderId};
use crate::error::{Error, OrderError, Result};
use crate::infrastructure::bootstrap::{build_engine, log_notifier, OracleSet};
use crate::infrastructure::config::settings::Config;
use crate::port::{Clock, Event, Notifier, NotifierRegistry};

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Create {
        #[serde(flatten)]
        order: NewOrder,
        #[serde(default)]
        caller: Option<Address>,
    },
    Edit {
        id: OrderId,
        #[serde(with = "crate::domain::money::amount_serde")]
        threshold: U256,
        #[serde(default)]
        payload: Bytes,
        owner: Address,
        #[serde(default)]
        caller: Option<Address>,
    },
    Cancel {
        id: OrderId,
        owner: Address,
        #[serde(default)]
        caller: Option<Address>,
    },
    Expire {
        id: OrderId,
        #[serde(default)]
        caller: Option<Address>,
    },
    Trigger {
        id: OrderId,
        #[serde(with = "crate::domain::money::amount_serde")]
        sample: U256,
        #[serde(default)]
        caller: Option<Address>,
    },
    Check {
        #[serde(with = "crate::domain::money::amount_serde")]
        sample: U256,
        ids: Vec<OrderId>,
    },
    CheckAll {
        #[serde(with = "crate::domain::money::amount_serde")]
        sample: U256,
    },
    Active,
    Expired,
    SetPrice {
        family: OrderFamily,
        #[serde(with = "crate::domain::money::amount_serde")]
        value: U256,
    },
    Advance {
        secs: u64,
    },
}

impl Step {
    /// Script name of the operation.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Step::Create { .. } => "create",
            Step::Edit { .. } => "edit",
            Step::Cancel { .. } => "cancel",
            Step::Expire { .. } => "expire",
            Step::Trigger { .. } => "trigger",
            Step::Check { .. } => "check",
            Step::CheckAll { .. } => "check_all",
            Step::Active => "active",
            Step::Expired => "expired",
            Step::SetPrice { .. } => "set_price",
            Step::Advance { .. } => "advance",
        }
    }
}

/// Result of an accepted step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// One-line human summary.
    pub summary: String,
    /// Machine-readable result.
    pub result: serde_json::Value,
}

impl StepOutcome {
    fn new(summary: impl Into<String>, result: serde_json::Value) -> Self {
        Self {
            summary: summary.into(),
            result,
        }
    }
}

/// Buffers events so they can be printed after the step that caused them.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<Event>>,
}

impl EventLog {
    /// Take all buffered events.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl Notifier for EventLog {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl Notifier for Arc<EventLog> {
    fn notify(&self, event: Event) {
        self.as_ref().notify(event);
    }
}

/// An engine wired to configured oracles and a manual clock.
pub struct Replay {
    engine: TriggerEngine,
    oracles: OracleSet,
    clock: Arc<ManualClock>,
    caller: Address,
}

impl Replay {
    /// Build a replay session starting at `start_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the configured settings.
    #[allow(clippy::result_large_err)]
    pub fn new(config: &Config, start_time: u64, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let clock = Arc::new(ManualClock::new(start_time));
        let (engine, oracles) = build_engine(config, notifier, clock.clone())?;
        Ok(Self {
            caller: config.engine.trusted_caller,
            engine,
            oracles,
            clock,
        })
    }

    #[must_use]
    pub const fn engine(&self) -> &TriggerEngine {
        &self.engine
    }

    /// Run one step.
    ///
    /// # Errors
    ///
    /// Any engine rejection, `NoOracle` when setting the price of an
    /// unconfigured family, or `ClockOverflow` when an advance would wrap.
    #[allow(clippy::result_large_err)]
    pub fn apply(&self, step: &Step) -> Result<StepOutcome> {
        let outcome = match step {
            Step::Create { order, caller } => {
                self.engine
                    .create_order(caller.unwrap_or(self.caller), order.clone())?;
                StepOutcome::new(
                    format!(
                        "order {} {} threshold {}",
                        order.id, order.order_type, order.threshold
                    ),
                    json!({ "id": order.id }),
                )
            }
            Step::Edit {
                id,
                threshold,
                payload,
                owner,
                caller,
            } => {
                self.engine.edit_order(
                    caller.unwrap_or(self.caller),
                    *id,
                    *threshold,
                    payload.clone(),
                    *owner,
                )?;
                StepOutcome::new(
                    format!("order {id} threshold {threshold}"),
                    json!({ "id": id }),
                )
            }
            Step::Cancel { id, owner, caller } => {
                let refund = self
                    .engine
                    .cancel_order(caller.unwrap_or(self.caller), *id, *owner)?;
                StepOutcome::new(
                    format!(
                        "order {id} refund {} to {}",
                        refund.execution_fee, refund.owner
                    ),
                    serde_json::to_value(refund)?,
                )
            }
            Step::Expire { id, caller } => {
                let refund = self
                    .engine
                    .remove_expired_order(caller.unwrap_or(self.caller), *id)?;
                StepOutcome::new(
                    format!(
                        "order {id} refund {} to {}",
                        refund.execution_fee, refund.owner
                    ),
                    serde_json::to_value(refund)?,
                )
            }
            Step::Trigger { id, sample, caller } => {
                let fill = self
                    .engine
                    .trigger_order(caller.unwrap_or(self.caller), *id, *sample)?;
                StepOutcome::new(
                    format!("order {id} {} for {}", fill.kind, fill.owner),
                    serde_json::to_value(&fill)?,
                )
            }
            Step::Check { sample, ids } => {
                let flags = self.engine.check_orders(*sample, ids)?;
                let fired = flags.iter().filter(|f| **f).count();
                StepOutcome::new(
                    format!("{fired}/{} triggered", flags.len()),
                    json!({ "triggered": flags }),
                )
            }
            Step::CheckAll { sample } => {
                let mut ids = self.engine.check_all_orders(*sample)?;
                ids.sort();
                StepOutcome::new(id_list(&ids), json!({ "ids": ids }))
            }
            Step::Active => {
                let mut ids = self.engine.active_orders();
                ids.sort();
                StepOutcome::new(id_list(&ids), json!({ "ids": ids }))
            }
            Step::Expired => {
                let mut ids = self.engine.expired_orders();
                ids.sort();
                StepOutcome::new(id_list(&ids), json!({ "ids": ids }))
            }
            Step::SetPrice { family, value } => {
                let oracle = self
                    .oracles
                    .get(*family)
                    .ok_or(OrderError::NoOracle { family: *family })?;
                oracle.publish(*value, self.clock.now());
                StepOutcome::new(
                    format!("{family} smoothed {value}"),
                    json!({ "family": family, "value": value.to_string() }),
                )
            }
            Step::Advance { secs } => {
                let now = self.clock.advance(*secs).ok_or(Error::ClockOverflow {
                    now: self.clock.now(),
                    secs: *secs,
                })?;
                StepOutcome::new(format!("now {now}"), json!({ "now": now }))
            }
        };
        Ok(outcome)
    }
}

fn id_list(ids: &[OrderId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe(event: &Event) -> String {
    match event {
        Event::Created(e) | Event::Edited(e) => format!(
            "order {} {} owner {} threshold {} at {}",
            e.id, e.order_type, e.owner, e.threshold, e.time
        ),
        Event::Triggered(e) | Event::Canceled(e) | Event::Expired(e) => format!(
            "order {} {} owner {} at {}",
            e.id, e.order_type, e.owner, e.time
        ),
    }
}

/// Parse a step script.
///
/// # Errors
///
/// Returns a JSON error if the script is malformed.
#[allow(clippy::result_large_err)]
pub fn parse_script(content: &str) -> Result<Vec<Step>> {
    Ok(serde_json::from_str(content)?)
}

/// Run a script file against an engine built from the configuration file.
#[allow(clippy::result_large_err)]
pub fn execute(args: &ReplayArgs) -> Result<()> {
    let config = Config::load(&args.config.config)?;
    let steps = parse_script(&fs::read_to_string(&args.script)?)?;

    let events = Arc::new(EventLog::default());
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(log_notifier(&config)));
    registry.register(Box::new(events.clone()));
    let replay = Replay::new(&config, args.start_time, Arc::new(registry))?;

    output::section("Replay");
    output::field("Script", args.script.display());
    output::field("Steps", steps.len());

    let mut rejected = 0usize;
    for (index, step) in steps.iter().enumerate() {
        let index = index + 1;
        match replay.apply(step) {
            Ok(outcome) => output::step_ok(index, step.op(), &outcome.summary, outcome.result),
            Err(e) => {
                rejected += 1;
                output::step_rejected(index, step.op(), &e.to_string());
                if args.strict {
                    return Err(e);
                }
            }
        }
        for event in events.drain() {
            output::event(
                event.name(),
                &describe(&event),
                serde_json::to_value(&event).unwrap_or_default(),
            );
        }
    }

    output::section("Summary");
    output::field("Accepted", steps.len() - rejected);
    output::field("Rejected", rejected);
    output::field("Active orders", replay.engine().order_count());
    Ok(())
}
