//! Integration test suite for tplpass
//!
//! End-to-end passes through the filesystem host and the CLI binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **build_command**: `tplpass build` against real project directories
//! - **incremental**: staleness gating across repeated passes
//! - **routing**: in-memory assets versus direct writes
//! - **hooks**: lifecycle hooks observed through a full pass
//! - **partials**: partial reload and naming across passes

#[path = "../common/mod.rs"]
mod common;

mod build_command;
mod hooks;
mod incremental;
mod partials;
mod routing;
