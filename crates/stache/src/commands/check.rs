//! Check command - report syntax errors in templates

use super::{parse_tags, read_template};
use anyhow::{Result, bail};
use colored::Colorize;
use stache_core::TemplateEngine;
use std::path::PathBuf;

/// Parse every template and print one status line per file
///
/// # Errors
///
/// Fails after all files were checked if any of them could not be read or parsed.
pub fn run(templates: Vec<PathBuf>, tags: Option<String>, verbose: bool) -> Result<()> {
    let tags = parse_tags(tags.as_deref())?;
    let engine = TemplateEngine::without_cache();
    let mut failed = 0;

    for path in &templates {
        let result = read_template(path)
            .and_then(|source| Ok(engine.parse(&source, tags.as_ref())?));

        match result {
            Ok(tokens) => {
                println!("{} {}", "✓".green().bold(), path.display());
                if verbose {
                    println!("  {} top-level token(s)", tokens.len());
                }
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red().bold(), path.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} template(s) failed", failed, templates.len());
    }

    println!(
        "\n{} {} template(s) ok",
        "✓".green().bold(),
        templates.len()
    );
    Ok(())
}
