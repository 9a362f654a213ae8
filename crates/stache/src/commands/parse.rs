//! Parse command - print a template's token tree as JSON

use super::{parse_tags, read_template};
use crate::output::print_json;
use anyhow::{Context, Result};
use stache_core::TemplateEngine;
use std::path::PathBuf;

pub fn run(template: PathBuf, tags: Option<String>, pretty: bool) -> Result<()> {
    let source = read_template(&template)?;
    let tags = parse_tags(tags.as_deref())?;

    let tokens = TemplateEngine::without_cache()
        .parse(&source, tags.as_ref())
        .with_context(|| format!("Failed to parse {}", template.display()))?;

    let json = if pretty {
        serde_json::to_string_pretty(&*tokens)?
    } else {
        serde_json::to_string(&*tokens)?
    };
    print_json(&json)?;
    Ok(())
}
