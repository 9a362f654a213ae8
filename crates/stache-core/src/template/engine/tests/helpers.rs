//! Shared test helpers for template engine tests

use super::tokenize::parse_template;
use crate::config::{RenderConfig, Tags};
use crate::error::Result;
use crate::template::engine::TemplateEngine;
use crate::template::partials::PartialSource;
use crate::view::Value;

/// Render with a fresh engine, no partials and the default configuration
pub(super) fn render(template: &str, view: &Value) -> Result<String> {
    TemplateEngine::new().render(template, view, &(), &RenderConfig::default())
}

/// Render with a fresh engine and the given partials
pub(super) fn render_with_partials(
    template: &str,
    view: &Value,
    partials: &dyn PartialSource,
) -> Result<String> {
    TemplateEngine::new().render(template, view, partials, &RenderConfig::default())
}

/// Render with a fresh engine and a per-call configuration
pub(super) fn render_with_config(
    template: &str,
    view: &Value,
    partials: &dyn PartialSource,
    config: &RenderConfig,
) -> Result<String> {
    TemplateEngine::new().render(template, view, partials, config)
}

/// Token tree of `template` (default tags) in its serialized tuple form
pub(super) fn tokens_json(template: &str) -> serde_json::Value {
    let tokens = parse_template(template, &Tags::default()).unwrap();
    serde_json::to_value(&tokens).unwrap()
}

/// A flat view with one value of each scalar kind
pub(super) fn simple_view() -> Value {
    Value::object([
        ("title", Value::from("My Title")),
        ("count", Value::from(42)),
        ("price", Value::from(9.99)),
        ("enabled", Value::from(true)),
        ("nothing", Value::Null),
    ])
}

/// A nested view with objects and an array of objects
pub(super) fn nested_view() -> Value {
    let authors = Value::array([
        Value::object([("name", "John Doe"), ("email", "john@example.com")]),
        Value::object([("name", "Jane Smith"), ("email", "jane@example.com")]),
    ]);
    let paper = Value::object([
        ("title", Value::from("Research Paper")),
        ("language", Value::from("en")),
        ("authors", authors),
    ]);
    Value::object([("paper", paper)])
}
