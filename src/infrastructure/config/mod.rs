//! Infrastructure configuration modules.

pub mod engine;
pub mod logging;
pub mod oracle;
pub mod settings;
