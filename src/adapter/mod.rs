//! Implementations of ports (hexagonal adapters).

pub mod clock;
pub mod oracle;
pub mod router;

pub use clock::{ManualClock, SystemClock};
pub use oracle::{FixedOracle, MAX_DECIMAL_GAP};
pub use router::StaticRouter;
