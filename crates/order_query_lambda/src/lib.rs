//! AWS-oriented adapters and handlers for the order lookup endpoints.
//!
//! This crate owns runtime integration details (Lambda handlers, the DynamoDB
//! store adapter, configuration and logging) and exposes a single runtime
//! module boundary for the contract and read planning primitives.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod runtime;
pub mod telemetry;
