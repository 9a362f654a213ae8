//! Render command - render a template file with JSON view data

use super::{parse_tags, read_template};
use crate::output::print_raw;
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use stache_core::template::DirPartials;
use stache_core::{RenderConfig, TemplateEngine, Value};
use std::path::{Path, PathBuf};

/// Arguments of `stache render`
pub struct RenderArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub partials: Option<PathBuf>,
    pub tags: Option<String>,
    pub no_escape: bool,
    pub output: Option<PathBuf>,
}

/// Render a template and write the result to stdout or `--output`
///
/// Partials default to the template's own directory when `--partials` is
/// not given.
pub fn run(args: RenderArgs) -> Result<()> {
    let template = read_template(&args.template)?;
    let view = load_view(args.data.as_deref())?;

    let partials_dir = match args.partials {
        Some(dir) => dir,
        None => template_dir(&args.template),
    };
    debug!("Resolving partials from {}", partials_dir.display());
    let partials = DirPartials::new(partials_dir);

    let mut config = RenderConfig::new();
    if let Some(tags) = parse_tags(args.tags.as_deref())? {
        config = config.with_tags(tags);
    }
    if args.no_escape {
        config = config.with_escape(|text| text.to_string());
    }

    let rendered = TemplateEngine::new()
        .render(&template, &view, &partials, &config)
        .with_context(|| format!("Failed to render {}", args.template.display()))?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Rendered {}", "✓".green().bold(), path.display());
        }
        None => print_raw(&rendered)?,
    }

    Ok(())
}

/// Load the view from a JSON file, or an empty object without one
fn load_view(path: Option<&Path>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::object(Vec::<(String, Value)>::new()));
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(Value::from(json))
}

fn template_dir(template: &Path) -> PathBuf {
    match template.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
