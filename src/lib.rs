//! # corm - vendoring through an isolated package root
//!
//! corm fetches the packages listed in a `Cormfile` with an external tool
//! (`go get` by default) whose package root is redirected to a project-local
//! staging directory, then exports a clean copy of the fetched sources into
//! `vendor/`.
//!
//! ## Quick Start
//!
//! ```bash
//! echo "github.com/pkg/errors" > Cormfile
//! corm install   # fetch into _corm/
//! corm export    # hardlink _corm/src/* into vendor/, minus .git/.hg/.svn
//! corm build     # go build with GOPATH=_corm
//! ```
//!
//! ## Module Organization
//!
//! - [`manifest`] - `Cormfile` parsing
//! - [`isolate`] - package-root override for subprocesses
//! - [`fetch`] - per-package fetch driver
//! - [`export`] - the vendor export engine
//! - [`run`] - pass-through execution for `exec`, `build`, `test`
//! - [`commands`] - CLI command handlers

/// CLI command handlers.
pub mod commands;

/// Project layout and `corm.toml`.
pub mod config;

/// Error taxonomy.
pub mod error;

/// Vendor export engine.
pub mod export;

/// Fetch driver.
pub mod fetch;

/// Isolated fetch environment.
pub mod isolate;

/// `Cormfile` parsing.
pub mod manifest;

/// Pass-through command execution.
pub mod run;

/// Terminal UI utilities (tables, colors).
pub mod ui;

pub use error::CormError;
