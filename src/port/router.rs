//! Routing port resolving order families to their oracles.

use std::sync::Arc;

use crate::domain::OrderFamily;

use super::oracle::PriceOracle;

/// Resolves the oracle that prices each order family.
///
/// Owned by an external configuration collaborator; the engine only reads it.
pub trait OracleRouter: Send + Sync {
    /// Oracle for `family`, or `None` if the family is not routed.
    fn oracle(&self, family: OrderFamily) -> Option<Arc<dyn PriceOracle>>;
}
