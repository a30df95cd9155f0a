//! Engine access and expiry settings.

use alloy_primitives::Address;

/// Default time after which an order may be removed as expired (60 days).
pub const DEFAULT_EXPIRATION_PERIOD_SECS: u64 = 60 * 24 * 60 * 60;

/// Identities and expiry policy the engine enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Identity allowed to change settings and routing.
    pub admin: Address,
    /// Single identity allowed to invoke lifecycle operations.
    pub trusted_caller: Address,
    /// Seconds after creation at which an order becomes removable.
    pub expiration_period: u64,
}

impl EngineSettings {
    #[must_use]
    pub const fn new(admin: Address, trusted_caller: Address) -> Self {
        Self {
            admin,
            trusted_caller,
            expiration_period: DEFAULT_EXPIRATION_PERIOD_SECS,
        }
    }

    #[must_use]
    pub const fn with_expiration_period(mut self, secs: u64) -> Self {
        self.expiration_period = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_period_is_sixty_days() {
        let settings = EngineSettings::new(Address::ZERO, Address::ZERO);
        assert_eq!(settings.expiration_period, 5_184_000);
    }
}
