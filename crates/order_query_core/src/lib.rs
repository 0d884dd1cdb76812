//! Shared order query primitives.
//!
//! This crate owns request contracts, parameter validation and read planning
//! for the order lookup handlers. It intentionally excludes AWS SDK and Lambda
//! runtime concerns so plans can be built and checked without a table.

pub mod contract;
pub mod read_plan;
