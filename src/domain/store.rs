//! Live order storage.
//!
//! Pairs the order map with an [`IdIndex`] so that presence in the map and
//! membership in the enumerable index always agree.

use std::collections::HashMap;

use super::index::IdIndex;
use super::{Order, OrderId};

/// The set of live orders keyed by id.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: HashMap<OrderId, Order>,
    index: IdIndex<OrderId>,
}

impl OrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order, replacing any order with the same id.
    ///
    /// Returns the replaced order, if any.
    pub fn insert(&mut self, order: Order) -> Option<Order> {
        let id = order.id();
        self.index.insert(id);
        self.orders.insert(id, order)
    }

    /// Remove an order, dropping it from the index in the same step.
    pub fn remove(&mut self, id: &OrderId) -> Option<Order> {
        let order = self.orders.remove(id)?;
        self.index.remove(id);
        Some(order)
    }

    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn get_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &OrderId) -> bool {
        self.index.contains(id)
    }

    /// Ids of all live orders, in unspecified order.
    #[must_use]
    pub fn ids(&self) -> &[OrderId] {
        self.index.values()
    }

    /// Iterate live orders in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.index.values().iter().filter_map(|id| self.orders.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewOrder, OrderType};
    use alloy_primitives::{address, Bytes, U256};

    fn make_order(id: u64, threshold: u64) -> Order {
        Order::new(
            NewOrder {
                order_type: OrderType::PerpetualLimit,
                id: OrderId::from(id),
                owner: address!("00000000000000000000000000000000000000aa"),
                execution_fee: U256::from(1),
                threshold: U256::from(threshold),
                payload: Bytes::new(),
            },
            0,
        )
    }

    #[test]
    fn insert_and_remove_keep_index_in_sync() {
        let mut store = OrderStore::new();
        store.insert(make_order(1, 10));
        store.insert(make_order(2, 20));
        store.insert(make_order(3, 30));

        let removed = store.remove(&OrderId::from(1u64)).unwrap();
        assert_eq!(removed.threshold(), U256::from(10));

        assert_eq!(store.len(), 2);
        assert!(!store.contains(&OrderId::from(1u64)));
        assert!(store.get(&OrderId::from(1u64)).is_none());
        let mut ids: Vec<_> = store.ids().to_vec();
        ids.sort();
        assert_eq!(ids, vec![OrderId::from(2u64), OrderId::from(3u64)]);
        assert_eq!(store.iter().count(), 2);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut store = OrderStore::new();
        assert!(store.remove(&OrderId::from(9u64)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn replacing_insert_keeps_single_index_entry() {
        let mut store = OrderStore::new();
        store.insert(make_order(1, 10));
        let replaced = store.insert(make_order(1, 99));

        assert_eq!(replaced.map(|o| o.threshold()), Some(U256::from(10)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&OrderId::from(1u64)).unwrap().threshold(), U256::from(99));
    }
}
