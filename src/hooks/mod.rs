//! Lifecycle hooks for observing and rewriting a pass.
//!
//! Six extension points fire in a fixed order:
//!
//! | Hook | When | Receives | May replace |
//! |------|------|----------|-------------|
//! | `setup` | once, when the pipeline is built | the engine | nothing |
//! | `before_add_partials` | each pass, before partials register | engine, resolved partial map | the map |
//! | `before_compile` | per file | raw template text | the text |
//! | `before_render` | per file | data context | the context |
//! | `before_save` | per file | rendered text, target path | the text |
//! | `on_done` | per file, after routing | final target path | nothing |
//!
//! A hook that returns `None` leaves the value unchanged. For the text hooks
//! an empty string also counts as "no replacement", and for the data hook so
//! does JSON `null`. The partial-map hook replaces the map whenever it returns
//! `Some`, so returning an empty map rejects every partial.
//!
//! Hooks are the only extension mechanism; configure them on [`Hooks`] and
//! the pipeline resolves the missing ones to no-ops when it is built.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tplpass::hooks::Hooks;
//!
//! let hooks = Hooks {
//!     before_save: Some(Arc::new(|html: &str, _target: &Path| Some(html.replace("\r\n", "\n")))),
//!     ..Hooks::default()
//! };
//! ```

use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::templating::engine::TemplateEngine;
use crate::templating::partials::PartialMap;

pub type SetupHook = Arc<dyn Fn(&mut TemplateEngine) + Send + Sync>;
pub type PartialsHook = Arc<dyn Fn(&mut TemplateEngine, &PartialMap) -> Option<PartialMap> + Send + Sync>;
pub type CompileHook = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;
pub type RenderHook = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;
pub type SaveHook = Arc<dyn Fn(&str, &Path) -> Option<String> + Send + Sync>;
pub type DoneHook = Arc<dyn Fn(&Path) + Send + Sync>;

/// User-facing hook configuration; every hook is optional.
#[derive(Clone, Default)]
pub struct Hooks {
    pub setup: Option<SetupHook>,
    pub before_add_partials: Option<PartialsHook>,
    pub before_compile: Option<CompileHook>,
    pub before_render: Option<RenderHook>,
    pub before_save: Option<SaveHook>,
    pub on_done: Option<DoneHook>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("setup", &self.setup.is_some())
            .field("before_add_partials", &self.before_add_partials.is_some())
            .field("before_compile", &self.before_compile.is_some())
            .field("before_render", &self.before_render.is_some())
            .field("before_save", &self.before_save.is_some())
            .field("on_done", &self.on_done.is_some())
            .finish()
    }
}

impl Hooks {
    /// Fill every missing hook with a no-op.
    #[must_use]
    pub fn resolve(self) -> ResolvedHooks {
        ResolvedHooks {
            setup: self.setup.unwrap_or_else(noop_setup),
            before_add_partials: self.before_add_partials.unwrap_or_else(noop_partials),
            before_compile: self.before_compile.unwrap_or_else(noop_compile),
            before_render: self.before_render.unwrap_or_else(noop_render),
            before_save: self.before_save.unwrap_or_else(noop_save),
            on_done: self.on_done.unwrap_or_else(noop_done),
        }
    }
}

fn noop_setup() -> SetupHook {
    Arc::new(|_: &mut TemplateEngine| {})
}

fn noop_partials() -> PartialsHook {
    Arc::new(|_: &mut TemplateEngine, _: &PartialMap| None)
}

fn noop_compile() -> CompileHook {
    Arc::new(|_: &str| None)
}

fn noop_render() -> RenderHook {
    Arc::new(|_: &Value| None)
}

fn noop_save() -> SaveHook {
    Arc::new(|_: &str, _: &Path| None)
}

fn noop_done() -> DoneHook {
    Arc::new(|_: &Path| {})
}

/// Hooks with every extension point present.
#[derive(Clone)]
pub struct ResolvedHooks {
    setup: SetupHook,
    before_add_partials: PartialsHook,
    before_compile: CompileHook,
    before_render: RenderHook,
    before_save: SaveHook,
    on_done: DoneHook,
}

impl ResolvedHooks {
    pub fn setup(&self, engine: &mut TemplateEngine) {
        (self.setup)(engine);
    }

    pub fn before_add_partials(&self, engine: &mut TemplateEngine, partials: PartialMap) -> PartialMap {
        (self.before_add_partials)(engine, &partials).unwrap_or(partials)
    }

    pub fn before_compile(&self, source: String) -> String {
        non_empty((self.before_compile)(&source)).unwrap_or(source)
    }

    pub fn before_render(&self, data: Value) -> Value {
        match (self.before_render)(&data) {
            Some(replacement) if !replacement.is_null() => replacement,
            _ => data,
        }
    }

    pub fn before_save(&self, rendered: String, target: &Path) -> String {
        non_empty((self.before_save)(&rendered, target)).unwrap_or(rendered)
    }

    pub fn on_done(&self, target: &Path) {
        (self.on_done)(target);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
