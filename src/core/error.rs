//! Error handling for tplpass
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** for the failure modes tplpass itself owns
//!    (configuration and pattern problems), via [`TplError`].
//! 2. **Untouched engine errors** for everything that fails inside a pass.
//!    File reads, template compilation and rendering propagate the original
//!    [`std::io::Error`] or [`tera::Error`] so the host sees the real cause.
//!
//! [`user_friendly_error`] converts any [`anyhow::Error`] into an
//! [`ErrorContext`] with details and a suggestion for CLI display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tplpass::core::{TplError, user_friendly_error};
//!
//! let error = TplError::InvalidConfig {
//!     reason: "`entry` must name at least one pattern".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failure modes owned by tplpass.
///
/// Pass-time failures (I/O, template syntax, rendering) are deliberately not
/// represented here; they surface as the engine's own error types.
#[derive(Error, Debug, Clone)]
pub enum TplError {
    /// No `tplpass.toml` at the given location
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// The configuration file is not valid TOML or has the wrong shape
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Configuration file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// The configuration parsed but is semantically unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong
        reason: String,
    },

    /// A glob pattern could not be compiled
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// Catch-all used by [`user_friendly_error`] for foreign errors
    #[error("{message}")]
    Other {
        /// Rendered error chain
        message: String,
    },
}

/// An error plus optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TplError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TplError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details about the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes, in order:
/// - [`TplError`] variants with tailored suggestions
/// - [`tera::Error`] anywhere in the chain (template syntax or render failure)
/// - [`std::io::Error`] with filesystem guidance
/// - anything else, with the full cause chain in the message
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(tpl_error) = error.downcast_ref::<TplError>() {
        return create_error_context(tpl_error.clone());
    }

    if let Some(tera_error) = error.chain().find_map(|e| e.downcast_ref::<tera::Error>()) {
        return ErrorContext::new(TplError::Other {
            message: render_chain(std::iter::successors(
                Some(tera_error as &(dyn std::error::Error + 'static)),
                |e| e.source(),
            )),
        })
        .with_suggestion(
            "Check template syntax: variables use {{ var }}, comments use {# #}, control flow uses {% %}. \
             Included partials must be registered under the name used in {% include %}",
        )
        .with_details(
            "Template errors abort the whole pass. Common causes:\n\
             - Undefined variables (use {% if var is defined %} to check)\n\
             - Unclosed {{ or {% delimiters\n\
             - A partial or helper that was never registered",
        );
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                Some("Check that the file or directory exists and the path is correct")
            }
            std::io::ErrorKind::PermissionDenied => {
                Some("Check file ownership and permissions of the source and output directories")
            }
            _ => None,
        };
        let ctx = ErrorContext::new(TplError::Other {
            message: render_chain(error.chain()),
        });
        return match suggestion {
            Some(s) => ctx.with_suggestion(s),
            None => ctx,
        };
    }

    ErrorContext::new(TplError::Other {
        message: render_chain(error.chain()),
    })
}

/// Render an error chain (outermost first) as a multi-line message.
fn render_chain<'a>(
    mut causes: impl Iterator<Item = &'a (dyn std::error::Error + 'static)>,
) -> String {
    let mut message = causes.next().map(ToString::to_string).unwrap_or_default();
    let rest: Vec<String> = causes.map(ToString::to_string).collect();

    if !rest.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in rest.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: TplError) -> ErrorContext {
    let (suggestion, details) = match &error {
        TplError::ConfigNotFound {
            ..
        } => (
            Some("Create a tplpass.toml next to your templates or pass --config <path>"),
            Some("tplpass reads its entry patterns, data and partials from tplpass.toml".to_string()),
        ),
        TplError::ConfigParseError {
            reason,
            ..
        } => (Some("Check the TOML syntax: quotes, brackets and key names"), Some(reason.clone())),
        TplError::InvalidConfig {
            ..
        } => (Some("`entry` is required and takes a glob or a list of globs"), None),
        TplError::InvalidPattern {
            ..
        } => (
            Some("Glob syntax: * matches within a path component, ** across components, [ab] a set"),
            None,
        ),
        TplError::Other {
            ..
        } => (None, None),
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(suggestion) = suggestion {
        ctx = ctx.with_suggestion(suggestion);
    }
    if let Some(details) = details {
        ctx = ctx.with_details(details);
    }
    ctx
}
