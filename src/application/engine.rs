//! Conditional order lifecycle.
//!
//! [`TriggerEngine`] owns the live order set and drives every order through
//! `NonExistent → Active → NonExistent`. Creation, edits and the three
//! terminal transitions (cancel, expire, trigger) are only accepted from the
//! trusted caller; settings changes are only accepted from the admin.
//!
//! Each operation runs under a single lock, so the read of an order and its
//! mutation are never interleaved with another operation. Events are built
//! under the lock and delivered after it is released.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::settings::EngineSettings;
use crate::domain::{
    order_triggered, NewOrder, Order, OrderFamily, OrderId, OrderStore, PriceReading, RequestKind,
};
use crate::error::{OracleError, OrderError, Result};
use crate::port::{ClosedEvent, Clock, Event, Notifier, OracleRouter, OrderEvent};

/// Fee refund returned when an order is canceled or expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Refund {
    pub owner: Address,
    #[serde(with = "crate::domain::money::amount_serde")]
    pub execution_fee: U256,
}

/// Downstream request produced when an order fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fill {
    pub kind: RequestKind,
    pub owner: Address,
    #[serde(with = "crate::domain::money::amount_serde")]
    pub execution_fee: U256,
    pub payload: Bytes,
}

struct EngineState {
    orders: OrderStore,
    trusted_caller: Address,
    expiration_period: u64,
    router: Arc<dyn OracleRouter>,
}

impl EngineState {
    fn ensure_trusted(&self, caller: Address) -> std::result::Result<(), OrderError> {
        if caller != self.trusted_caller {
            warn!(caller = %caller, "Rejected lifecycle call from untrusted caller");
            return Err(OrderError::Unauthorized { caller });
        }
        Ok(())
    }

    /// Look up a live order, failing with `NotFound`.
    fn live(&self, id: OrderId) -> std::result::Result<&Order, OrderError> {
        self.orders.get(&id).ok_or(OrderError::NotFound { id })
    }

    /// Look up a live order owned by `acting_owner`.
    ///
    /// Existence is checked first so a zero acting owner can never match a
    /// missing order.
    fn owned(
        &self,
        id: OrderId,
        acting_owner: Address,
    ) -> std::result::Result<&Order, OrderError> {
        let order = self.live(id)?;
        if !order.is_owned_by(acting_owner) {
            return Err(OrderError::NotOwner { id, acting_owner });
        }
        Ok(order)
    }

    fn readings(&self, raw_sample: U256) -> Readings<'_> {
        Readings {
            router: self.router.as_ref(),
            raw_sample,
            cache: HashMap::new(),
        }
    }
}

/// Per-call cache of price readings, one oracle read per family.
struct Readings<'a> {
    router: &'a dyn OracleRouter,
    raw_sample: U256,
    cache: HashMap<OrderFamily, PriceReading>,
}

impl Readings<'_> {
    fn get(&mut self, family: OrderFamily) -> Result<PriceReading> {
        if let Some(reading) = self.cache.get(&family) {
            return Ok(*reading);
        }
        let reading = read_price(self.router, family, self.raw_sample)?;
        self.cache.insert(family, reading);
        Ok(reading)
    }

    fn triggered(&mut self, order: &Order) -> Result<bool> {
        let reading = self.get(order.family())?;
        let fired = order_triggered(&reading, order);
        debug!(
            id = %order.id(),
            order_type = %order.order_type(),
            smoothed = %reading.smoothed,
            instantaneous = %reading.instantaneous,
            threshold = %order.threshold(),
            fired,
            "Evaluated trigger"
        );
        Ok(fired)
    }
}

/// Resolve the oracle for `family` and take both readings.
fn read_price(router: &dyn OracleRouter, family: OrderFamily, raw: U256) -> Result<PriceReading> {
    let oracle = router
        .oracle(family)
        .ok_or(OrderError::NoOracle { family })?;

    let instantaneous = oracle.truncate(raw);
    let max = oracle.truncated_max_value();
    if instantaneous > max {
        return Err(OracleError::OutOfRange {
            value: instantaneous,
            max,
        }
        .into());
    }

    let smoothed = oracle.latest_sample()?.value;
    Ok(PriceReading::new(smoothed, instantaneous))
}

/// Stores conditional orders and fires them when their price condition holds.
pub struct TriggerEngine {
    admin: Address,
    state: Mutex<EngineState>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl TriggerEngine {
    /// Create an engine with no live orders.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExpirationPeriod` if the configured period is zero.
    pub fn new(
        settings: EngineSettings,
        router: Arc<dyn OracleRouter>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if settings.expiration_period == 0 {
            return Err(OrderError::InvalidExpirationPeriod.into());
        }
        if settings.trusted_caller == Address::ZERO {
            return Err(OrderError::ZeroTrustedCaller.into());
        }
        Ok(Self {
            admin: settings.admin,
            state: Mutex::new(EngineState {
                orders: OrderStore::new(),
                trusted_caller: settings.trusted_caller,
                expiration_period: settings.expiration_period,
                router,
            }),
            notifier,
            clock,
        })
    }

    // ---------------------------------------------------------------------
    // Lifecycle (trusted caller only)
    // ---------------------------------------------------------------------

    /// Create a new active order.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `ZeroOwner`, or `AlreadyExists` if `request.id` is live.
    pub fn create_order(&self, caller: Address, request: NewOrder) -> Result<()> {
        let event = {
            let mut state = self.state.lock();
            state.ensure_trusted(caller)?;
            if request.owner == Address::ZERO {
                return Err(OrderError::ZeroOwner.into());
            }
            if state.orders.contains(&request.id) {
                return Err(OrderError::AlreadyExists { id: request.id }.into());
            }

            let now = self.clock.now();
            let order = Order::new(request, now);
            debug!(
                id = %order.id(),
                order_type = %order.order_type(),
                owner = %order.owner(),
                threshold = %order.threshold(),
                "Order created"
            );
            let event = Event::Created(OrderEvent::new(&order, now));
            state.orders.insert(order);
            event
        };
        self.notifier.notify(event);
        Ok(())
    }

    /// Replace an order's threshold and payload on behalf of its owner.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, or `NotOwner`.
    pub fn edit_order(
        &self,
        caller: Address,
        id: OrderId,
        threshold: U256,
        payload: Bytes,
        acting_owner: Address,
    ) -> Result<()> {
        let event = {
            let mut state = self.state.lock();
            state.ensure_trusted(caller)?;
            state.owned(id, acting_owner)?;

            let now = self.clock.now();
            let order = state
                .orders
                .get_mut(&id)
                .ok_or(OrderError::NotFound { id })?;
            order.amend(threshold, payload);
            debug!(id = %id, threshold = %threshold, "Order edited");
            Event::Edited(OrderEvent::new(order, now))
        };
        self.notifier.notify(event);
        Ok(())
    }

    /// Cancel an order on behalf of its owner.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, or `NotOwner`.
    pub fn cancel_order(&self, caller: Address, id: OrderId, acting_owner: Address) -> Result<Refund> {
        let (refund, event) = {
            let mut state = self.state.lock();
            state.ensure_trusted(caller)?;
            state.owned(id, acting_owner)?;

            let order = state.orders.remove(&id).ok_or(OrderError::NotFound { id })?;
            debug!(id = %id, owner = %order.owner(), "Order canceled");
            let event = Event::Canceled(ClosedEvent::new(&order, self.clock.now()));
            (refund_of(&order), event)
        };
        self.notifier.notify(event);
        Ok(refund)
    }

    /// Remove an order whose expiration period has elapsed.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, or `NotExpired`.
    pub fn remove_expired_order(&self, caller: Address, id: OrderId) -> Result<Refund> {
        let (refund, event) = {
            let mut state = self.state.lock();
            state.ensure_trusted(caller)?;

            let now = self.clock.now();
            let period = state.expiration_period;
            let order = state.live(id)?;
            if !order.is_expired(now, period) {
                return Err(OrderError::NotExpired {
                    id,
                    expires_at: order.expires_at(period),
                }
                .into());
            }

            let order = state.orders.remove(&id).ok_or(OrderError::NotFound { id })?;
            debug!(id = %id, owner = %order.owner(), created_at = order.created_at(), "Order expired");
            let event = Event::Expired(ClosedEvent::new(&order, now));
            (refund_of(&order), event)
        };
        self.notifier.notify(event);
        Ok(refund)
    }

    /// Fire an order whose condition holds at `raw_sample`.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, `ConditionNotMet`, or a routing/oracle
    /// failure for the order's family.
    pub fn trigger_order(&self, caller: Address, id: OrderId, raw_sample: U256) -> Result<Fill> {
        let (fill, event) = {
            let mut state = self.state.lock();
            state.ensure_trusted(caller)?;

            let order = state.live(id)?;
            let fired = state.readings(raw_sample).triggered(order)?;
            if !fired {
                return Err(OrderError::ConditionNotMet { id }.into());
            }

            let order = state.orders.remove(&id).ok_or(OrderError::NotFound { id })?;
            let kind = order.order_type().request_kind();
            debug!(id = %id, owner = %order.owner(), kind = %kind, "Order triggered");
            let event = Event::Triggered(ClosedEvent::new(&order, self.clock.now()));
            let fill = Fill {
                kind,
                owner: order.owner(),
                execution_fee: order.execution_fee(),
                payload: order.payload().clone(),
            };
            (fill, event)
        };
        self.notifier.notify(event);
        Ok(fill)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Ids of all live orders, in unspecified order.
    #[must_use]
    pub fn active_orders(&self) -> Vec<OrderId> {
        self.state.lock().orders.ids().to_vec()
    }

    /// Triggered flag for each id; ids without a live order are `false`.
    ///
    /// # Errors
    ///
    /// Routing/oracle failures for any family the live ids need.
    pub fn check_orders(&self, raw_sample: U256, ids: &[OrderId]) -> Result<Vec<bool>> {
        let state = self.state.lock();
        let mut readings = state.readings(raw_sample);
        ids.iter()
            .map(|id| match state.orders.get(id) {
                Some(order) => readings.triggered(order),
                None => Ok(false),
            })
            .collect()
    }

    /// All live ids whose condition holds at `raw_sample`.
    ///
    /// # Errors
    ///
    /// Routing/oracle failures for any family with live orders.
    pub fn check_all_orders(&self, raw_sample: U256) -> Result<Vec<OrderId>> {
        let state = self.state.lock();
        let mut readings = state.readings(raw_sample);
        let mut fired = Vec::new();
        for order in state.orders.iter() {
            if readings.triggered(order)? {
                fired.push(order.id());
            }
        }
        Ok(fired)
    }

    /// Live ids whose expiration period has elapsed.
    #[must_use]
    pub fn expired_orders(&self) -> Vec<OrderId> {
        let state = self.state.lock();
        let now = self.clock.now();
        state
            .orders
            .iter()
            .filter(|o| o.is_expired(now, state.expiration_period))
            .map(Order::id)
            .collect()
    }

    /// Snapshot of a live order.
    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.state.lock().orders.get(&id).cloned()
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        self.state.lock().orders.len()
    }

    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    #[must_use]
    pub fn trusted_caller(&self) -> Address {
        self.state.lock().trusted_caller
    }

    #[must_use]
    pub fn expiration_period(&self) -> u64 {
        self.state.lock().expiration_period
    }

    // ---------------------------------------------------------------------
    // Settings (admin only)
    // ---------------------------------------------------------------------

    /// Replace the trusted caller.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `caller` is not the admin, `ZeroTrustedCaller` if
    /// `trusted_caller` is the zero address.
    pub fn set_trusted_caller(&self, caller: Address, trusted_caller: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        if trusted_caller == Address::ZERO {
            return Err(OrderError::ZeroTrustedCaller.into());
        }
        let mut state = self.state.lock();
        info!(previous = %state.trusted_caller, trusted_caller = %trusted_caller, "Trusted caller updated");
        state.trusted_caller = trusted_caller;
        Ok(())
    }

    /// Replace the family → oracle router.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `caller` is not the admin.
    pub fn set_router(&self, caller: Address, router: Arc<dyn OracleRouter>) -> Result<()> {
        self.ensure_admin(caller)?;
        self.state.lock().router = router;
        info!("Oracle router updated");
        Ok(())
    }

    /// Replace the expiration period.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `caller` is not the admin, `InvalidExpirationPeriod`
    /// if `secs` is zero.
    pub fn set_expiration_period(&self, caller: Address, secs: u64) -> Result<()> {
        self.ensure_admin(caller)?;
        if secs == 0 {
            return Err(OrderError::InvalidExpirationPeriod.into());
        }
        self.state.lock().expiration_period = secs;
        info!(expiration_period = secs, "Expiration period updated");
        Ok(())
    }

    fn ensure_admin(&self, caller: Address) -> std::result::Result<(), OrderError> {
        if caller != self.admin {
            warn!(caller = %caller, "Rejected settings change from non-admin");
            return Err(OrderError::Unauthorized { caller });
        }
        Ok(())
    }
}

fn refund_of(order: &Order) -> Refund {
    Refund {
        owner: order.owner(),
        execution_fee: order.execution_fee(),
    }
}
