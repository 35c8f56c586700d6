pub mod config;
pub mod listener;
pub mod tracer;
pub mod types;
