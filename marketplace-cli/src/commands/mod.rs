//! CLI command implementations.

pub mod demo;
pub mod health;
pub mod notify;
