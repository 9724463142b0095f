pub mod config;
pub mod consent;
pub mod error;
pub mod telemetry;
