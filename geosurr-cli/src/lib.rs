//! Support library for the `geosurr` binary.
//!
//! Re-exports the command pipeline and logging setup so integration tests
//! can drive commands without spawning a subprocess.

pub mod cli;
pub mod logging;
