//! Engine identities and expiry policy.

use alloy_primitives::Address;
use serde::Deserialize;

use crate::application::{EngineSettings, DEFAULT_EXPIRATION_PERIOD_SECS};

/// `[engine]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Identity allowed to change settings.
    pub admin: Address,
    /// Identity allowed to drive order lifecycles.
    pub trusted_caller: Address,
    /// Seconds after creation at which an order becomes removable.
    #[serde(default = "default_expiration_period_secs")]
    pub expiration_period_secs: u64,
}

fn default_expiration_period_secs() -> u64 {
    DEFAULT_EXPIRATION_PERIOD_SECS
}

impl EngineConfig {
    #[must_use]
    pub const fn settings(&self) -> EngineSettings {
        EngineSettings::new(self.admin, self.trusted_caller)
            .with_expiration_period(self.expiration_period_secs)
    }
}
