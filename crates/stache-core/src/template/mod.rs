//! Template module - logic-less `{{tag}}` templates
//!
//! Templates are parsed into a token tree once (and cached), then rendered
//! against a [`Value`] view.
//!
//! ## Syntax
//!
//! - Interpolation: `{{name}}` (HTML-escaped), `{{&name}}` or `{{{name}}}` (raw)
//! - Dotted names: `{{person.name}}`, `{{.}}` for the current item
//! - Sections: `{{#items}} ... {{/items}}`, inverted `{{^items}} ... {{/items}}`
//! - Partials: `{{> name}}`
//! - Comments: `{{! ignored }}`
//! - Delimiter change: `{{=<% %>=}}`
//!
//! The free functions here forward to a process-wide default engine.

pub mod cache;
pub mod engine;
pub mod partials;

pub use cache::{CacheKey, DefaultTemplateCache, NoCache, TemplateCache, Tokens};
pub use engine::{escape_html, Context, Scanner, TemplateEngine, Token, TokenKind};
pub use partials::{DirPartials, PartialFn, PartialSource};

use crate::config::{RenderConfig, Tags};
use crate::error::{Result, TemplateError};
use crate::view::Value;
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

static DEFAULT_ENGINE: Lazy<RwLock<TemplateEngine>> =
    Lazy::new(|| RwLock::new(TemplateEngine::new()));

fn default_engine() -> RwLockReadGuard<'static, TemplateEngine> {
    match DEFAULT_ENGINE.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn default_engine_mut() -> RwLockWriteGuard<'static, TemplateEngine> {
    match DEFAULT_ENGINE.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Snapshot of the default engine, so renders (and lambdas inside them) never hold the lock
fn engine_snapshot() -> TemplateEngine {
    default_engine().clone()
}

/// Render `template` with the default engine
///
/// # Examples
///
/// ```rust
/// use stache_core::{render, RenderConfig, Value};
///
/// let view = Value::object([("name", "World")]);
/// let output = render("Hello {{name}}!", &view, &(), &RenderConfig::default()).unwrap();
/// assert_eq!(output, "Hello World!");
/// ```
pub fn render(
    template: &str,
    view: &Value,
    partials: &dyn PartialSource,
    config: &RenderConfig,
) -> Result<String> {
    engine_snapshot().render(template, view, partials, config)
}

/// Render a template held in a [`Value`], which must be a string
pub fn render_value(
    template: &Value,
    view: &Value,
    partials: &dyn PartialSource,
    config: &RenderConfig,
) -> Result<String> {
    match template.as_str() {
        Some(template) => render(template, view, partials, config),
        None => Err(TemplateError::InvalidTemplate {
            type_name: template.type_name().to_string(),
        }),
    }
}

/// Parse `template` with the default engine, filling its cache
pub fn parse(template: &str, tags: Option<&Tags>) -> Result<Tokens> {
    engine_snapshot().parse(template, tags)
}

/// Empty the default engine's cache
pub fn clear_cache() {
    default_engine().clear_cache();
}

/// The default engine's cache, if caching is enabled
pub fn template_cache() -> Option<Arc<dyn TemplateCache>> {
    default_engine().cache()
}

/// Replace the default engine's cache; `None` disables caching
pub fn set_template_cache(cache: Option<Arc<dyn TemplateCache>>) {
    default_engine_mut().set_cache(cache);
}

/// The default engine's tags
pub fn tags() -> Tags {
    default_engine().tags().clone()
}

/// Change the default engine's tags for later calls
pub fn set_tags(tags: Tags) {
    default_engine_mut().set_tags(tags);
}

/// The HTML escaper applied to `{{name}}` by default
pub fn escape(text: &str) -> String {
    escape_html(text)
}
