//! Shared test utilities used across geosurr crates.
//!
//! [`recording`] captures `tracing` spans and events so tests can assert on
//! instrumentation; [`ci`] reads the environment knobs that tune property
//! suites in CI.

pub mod ci;
pub mod recording;
