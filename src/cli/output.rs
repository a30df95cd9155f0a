//! CLI output formatting.
//!
//! Human-readable lines with colored symbols, or one JSON object per line
//! (`{"type": ..., "payload": ...}`) when `--json` is set. Quiet mode
//! suppresses everything except warnings, errors and JSON.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
///
/// Set once from the global flags; replay step and event lines consult it
/// on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

/// Process-wide output settings.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

/// Lazily initialized cell holding the settings.
fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

/// Snapshot of the current settings. A poisoned lock still yields its value.
fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Replace the current settings.
fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Quiet mode hides human-readable lines but never JSON.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Print one `{"type", "payload"}` object on its own line.
fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
///
/// Call before any handler prints, so the first section already honors
/// `--json` and `--quiet`.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {:<16} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    if read_config().json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", "×".red(), message);
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", title.bold());
}

/// Print an accepted replay step and its result.
pub fn step_ok(index: usize, op: &str, summary: &str, result: serde_json::Value) {
    let config = read_config();

    if config.json {
        emit_json_line(
            "step",
            json!({ "index": index, "op": op, "ok": true, "result": result }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {} {:>3} {:<10} {}",
        "✓".green(),
        index.dimmed(),
        op.cyan(),
        summary
    );
}

/// Print a rejected replay step. Always shown.
pub fn step_rejected(index: usize, op: &str, reason: &str) {
    if read_config().json {
        emit_json_line(
            "step",
            json!({ "index": index, "op": op, "ok": false, "error": reason }),
        );
        return;
    }

    println!(
        "  {} {:>3} {:<10} {}",
        "×".red(),
        index.dimmed(),
        op.cyan(),
        reason.red()
    );
}

/// Print a lifecycle event. Shown from `-v` upwards in text mode.
pub fn event(name: &str, summary: &str, payload: serde_json::Value) {
    let config = read_config();

    if config.json {
        emit_json_line("event", payload);
        return;
    }
    if regular_output_suppressed(config) || config.verbose == 0 {
        return;
    }

    println!("        {} {}", name.magenta(), summary.dimmed());
}
