//! Benchmark support crate for geosurr.
//!
//! Provides seeded synthetic connectomes and parameter types used by the
//! Criterion benchmarks of the swap loop and the topology-preserving models.

pub mod error;
pub mod params;
pub mod source;
