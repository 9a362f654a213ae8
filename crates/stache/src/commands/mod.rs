//! CLI command implementations

pub mod check;
pub mod parse;
pub mod render;

use anyhow::{Context, Result};
use stache_core::Tags;
use std::path::Path;

/// Read a template file
pub(crate) fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))
}

/// Parse a `--tags` value such as `"<% %>"`
pub(crate) fn parse_tags(tags: Option<&str>) -> Result<Option<Tags>> {
    tags.map(|text| Tags::parse(text).map_err(anyhow::Error::from))
        .transpose()
}
