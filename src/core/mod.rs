//! Configuration and the data model shared by the handler and telemetry.

pub mod config;
pub mod models;
