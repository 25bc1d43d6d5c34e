//! CLI command handlers
//!
//! Each handler takes the resolved [`Layout`](crate::config::Layout) and
//! returns `anyhow::Result`; `main` turns an error into exit code 1.

pub mod exec;
pub mod export;
pub mod install;
