//! Environment-driven knobs for CI test runs.

pub mod property_test_profile;
