//! `tripwire check`: configuration validation.

use std::path::Path;
use std::sync::Arc;

use crate::adapter::SystemClock;
use crate::cli::output;
use crate::domain::money::format_fixed;
use crate::domain::OrderFamily;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_engine;
use crate::infrastructure::config::settings::Config;
use crate::port::{NullNotifier, PriceOracle};

/// Validate configuration and summarize the engine it produces.
#[allow(clippy::result_large_err)]
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;
    let (engine, oracles) = build_engine(&config, Arc::new(NullNotifier), Arc::new(SystemClock))?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Engine");
    output::field("Admin", engine.admin());
    output::field("Trusted caller", engine.trusted_caller());
    output::field(
        "Expiration",
        format!("{}s", engine.expiration_period()),
    );

    output::section("Oracles");
    for family in OrderFamily::ALL {
        let Some(oracle) = oracles.get(family) else {
            output::warning(&format!(
                "No oracle for {family}: its orders cannot be checked or triggered"
            ));
            continue;
        };
        let smoothed = match oracle.latest_sample() {
            Ok(sample) => format_fixed(sample.value, oracle.decimals()),
            Err(_) => "unpublished".to_string(),
        };
        output::field(
            family.as_str(),
            format!(
                "decimals={} raw_decimals={} smoothed={smoothed}",
                oracle.decimals(),
                oracle.raw_decimals()
            ),
        );
    }

    output::success("Configuration check complete");
    Ok(())
}
