//! Test utilities
//!
//! Deterministic synthetic employee data for unit tests, integration tests
//! and local experiments.


pub use fixtures::{
    DEPARTMENTS, ENGAGEMENT_LEVELS, SyntheticEmployees, split_batch, timed_execution,
};
