//! The templating capability object.
//!
//! Each pipeline owns one [`TemplateEngine`], so two pipelines never share a
//! partial or helper namespace. The engine wraps a [`Tera`] instance: partials
//! and entry templates are both registered as named Tera templates, which lets
//! entries pull partials in with `{% include "<name>" %}`.

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use tera::{Context as TeraContext, Tera};

use super::helpers::Helper;

/// Handle to a compiled, render-ready template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    name: String,
}

/// Tera-backed template registry and renderer.
pub struct TemplateEngine {
    tera: Tera,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.tera.get_template_names().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Create an engine with an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        let mut tera = Tera::default();
        // Output must not depend on the entry's file extension; setup hooks
        // can re-enable escaping through `tera_mut`.
        tera.autoescape_on(vec![]);
        Self {
            tera,
        }
    }

    /// Compile `source` and register it as partial `name`.
    ///
    /// Registering an existing name replaces the previous template
    /// (last write wins).
    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        tracing::trace!("Registering template '{}' ({} bytes)", name, source.len());
        self.tera.add_raw_template(name, source)?;
        Ok(())
    }

    /// Whether a template or partial is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Expose `helper` to templates as function `name(...)`.
    pub fn register_helper(&mut self, name: &str, helper: Helper) {
        tracing::debug!("Registering helper '{}'", name);
        self.tera.register_function(name, move |args: &HashMap<String, Value>| helper(args));
    }

    /// Compile an entry template. `name` should be unique per source file.
    pub fn compile(&mut self, name: &str, source: &str) -> Result<CompiledTemplate> {
        self.register(name, source)?;
        Ok(CompiledTemplate {
            name: name.to_string(),
        })
    }

    /// Render a compiled template against a data context.
    ///
    /// The context must be a JSON object; its keys become top-level template
    /// variables.
    pub fn render(&self, template: &CompiledTemplate, data: &Value) -> Result<String> {
        let context = TeraContext::from_value(data.clone())?;
        Ok(self.tera.render(&template.name, &context)?)
    }

    /// Direct access to the underlying Tera instance, for setup hooks that need
    /// filters, testers or autoescape settings.
    pub fn tera_mut(&mut self) -> &mut Tera {
        &mut self.tera
    }
}
