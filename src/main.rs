//! Headless driver (default binary).
//!
//! Reads JSON commands from stdin, one per line, and writes acks and observations
//! to stdout. Diagnostics go to stderr. See `blockfall_adapter` for the protocol.

use std::io;

use anyhow::Result;

use blockfall::adapter::{run, DriverConfig};

fn main() -> Result<()> {
    let config = DriverConfig::from_env();

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&config, stdin.lock(), stdout.lock())
}
