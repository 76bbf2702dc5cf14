pub mod bitbucket;
pub mod cli;
pub mod config;
pub mod error;
pub mod json;
pub mod render;
pub mod tasks;

/// Printed by `-v`.
pub const VERSION: &str = concat!("bb2todotxt ", env!("CARGO_PKG_VERSION"));
