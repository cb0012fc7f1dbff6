//! Core types for tplpass
//!
//! Error handling lives here:
//! - [`TplError`] - enumerated failure modes tplpass owns (config, patterns)
//! - [`ErrorContext`] - user-facing wrapper with details and a suggestion
//! - [`user_friendly_error`] - convert any [`anyhow::Error`] for CLI display
//!
//! Errors raised while a pass is running (file reads, template compilation,
//! rendering) are not wrapped in [`TplError`]; they keep their original type
//! so the host's error channel reports the real cause.

pub mod error;

pub use error::{ErrorContext, TplError, user_friendly_error};
