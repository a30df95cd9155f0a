//! Static family → oracle routing table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::OrderFamily;
use crate::port::{OracleRouter, PriceOracle};

/// Routing table fixed at construction.
#[derive(Default, Clone)]
pub struct StaticRouter {
    routes: HashMap<OrderFamily, Arc<dyn PriceOracle>>,
}

impl StaticRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `family` to `oracle`, replacing any existing route.
    #[must_use]
    pub fn with_route(mut self, family: OrderFamily, oracle: Arc<dyn PriceOracle>) -> Self {
        self.routes.insert(family, oracle);
        self
    }

    /// Families with a route.
    pub fn families(&self) -> impl Iterator<Item = OrderFamily> + '_ {
        self.routes.keys().copied()
    }
}

impl OracleRouter for StaticRouter {
    fn oracle(&self, family: OrderFamily) -> Option<Arc<dyn PriceOracle>> {
        self.routes.get(&family).cloned()
    }
}

impl std::fmt::Debug for StaticRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut families: Vec<_> = self.families().collect();
        families.sort();
        f.debug_struct("StaticRouter")
            .field("families", &families)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::oracle::FixedOracle;
    use alloy_primitives::U256;

    #[test]
    fn unrouted_family_resolves_to_none() {
        let router = StaticRouter::new().with_route(
            OrderFamily::Perpetual,
            Arc::new(FixedOracle::new(6, 18).unwrap().with_price(U256::from(1u64), 0)),
        );

        assert!(router.oracle(OrderFamily::Perpetual).is_some());
        assert!(router.oracle(OrderFamily::LeveragedShort).is_none());
        assert_eq!(router.families().count(), 1);
    }
}
