//! Template helpers: named functions callable from template expressions.
//!
//! Helpers are code, not files, so they are resolved once when the pipeline is
//! built and never reloaded between passes.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::engine::TemplateEngine;

/// A helper receives the named arguments of the call site
/// (`{{ format_date(value=published, fmt="%Y") }}`) and returns a value.
pub type Helper = Arc<dyn Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync>;

/// Register every helper with the engine, in name order.
pub fn register_helpers(engine: &mut TemplateEngine, helpers: &BTreeMap<String, Helper>) {
    for (name, helper) in helpers {
        engine.register_helper(name, Arc::clone(helper));
    }
    if !helpers.is_empty() {
        tracing::debug!("Registered {} helper(s)", helpers.len());
    }
}
