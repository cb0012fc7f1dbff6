//! Tera-backed templating: the engine, its partials, helpers and data.
//!
//! # Overview
//!
//! - [`engine`]: the per-pipeline [`TemplateEngine`] wrapping a Tera instance
//! - [`partials`]: discovery, naming and registration of reusable fragments
//! - [`helpers`]: code-defined functions callable from templates
//! - [`data`]: loading the render context from JSON files or an inline value
//!
//! Entry templates and partials share one Tera namespace. An entry includes
//! a partial by name:
//!
//! ```text
//! {% include "partials/header" %}
//! <main>{{ site.title }}</main>
//! ```

pub mod data;
pub mod engine;
pub mod helpers;
pub mod partials;

pub use data::{DataSource, resolve_data};
pub use engine::{CompiledTemplate, TemplateEngine};
pub use helpers::{Helper, register_helpers};
pub use partials::{PartialMap, PartialRegistrar, PartialSource, partial_name};
