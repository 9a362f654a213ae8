//! Render fixtures
//!
//! A render case is a set of sibling files sharing one base name inside a
//! fixtures directory:
//!
//! - `<name>.mustache` - the template
//! - `<name>.json` - the view
//! - `<name>.txt` - the expected output
//! - `<name>.partial` - optional, registered as the partial named `partial`

use std::path::{Path, PathBuf};

/// One template, view and expected output loaded from disk
#[derive(Debug, Clone)]
pub struct RenderCase {
    pub name: String,
    pub template: String,
    pub view: serde_json::Value,
    pub partial: Option<String>,
    pub expected: String,
}

/// `tests/fixtures` under a crate's manifest directory
///
/// # Examples
///
/// ```rust
/// use stache_testkit::fixtures_dir;
///
/// let dir = fixtures_dir(env!("CARGO_MANIFEST_DIR"));
/// assert!(dir.ends_with("tests/fixtures"));
/// ```
pub fn fixtures_dir(manifest_dir: impl AsRef<Path>) -> PathBuf {
    manifest_dir.as_ref().join("tests").join("fixtures")
}

/// Load the case `name` from `dir`
///
/// # Errors
///
/// Returns Err if the template, view or expected output cannot be read, or
/// if the view is not valid JSON. A missing partial file is not an error.
pub fn load_render_case(dir: &Path, name: &str) -> Result<RenderCase, String> {
    let read = |ext: &str| {
        let path = dir.join(format!("{}.{}", name, ext));
        std::fs::read_to_string(&path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
    };

    let view_text = read("json")?;
    let view = serde_json::from_str(&view_text)
        .map_err(|e| format!("Invalid view JSON for {}: {}", name, e))?;

    Ok(RenderCase {
        name: name.to_string(),
        template: read("mustache")?,
        view,
        partial: read("partial").ok(),
        expected: read("txt")?,
    })
}

/// Load every case in `dir`, sorted by name
///
/// Cases are discovered through their `.json` view files.
///
/// # Panics
///
/// Panics if the directory cannot be listed or any case fails to load.
pub fn render_cases(dir: &Path) -> Vec<RenderCase> {
    let entries = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to list fixtures in {}: {}", dir.display(), e));

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();
    names.sort();

    names
        .iter()
        .map(|name| load_render_case(dir, name).unwrap_or_else(|e| panic!("{}", e)))
        .collect()
}
