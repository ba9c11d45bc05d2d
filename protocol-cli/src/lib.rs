//! Command line front end for the trust protocol evaluators.

pub mod commands;
pub mod config;

pub use commands::{execute_command, run_interview, Commands};
pub use config::{LoggingConfig, ProtocolConfig};
