//! Partial template sources
//!
//! A `{{> name}}` tag asks a [`PartialSource`] for the template text of
//! `name`. A `None` answer renders as nothing.

use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::path::{Component, Path, PathBuf};

/// Resolves partial names to template text
pub trait PartialSource {
    fn get_partial(&self, name: &str) -> Option<String>;
}

/// No partials at all
impl PartialSource for () {
    fn get_partial(&self, _name: &str) -> Option<String> {
        None
    }
}

impl<T: PartialSource + ?Sized> PartialSource for &T {
    fn get_partial(&self, name: &str) -> Option<String> {
        (**self).get_partial(name)
    }
}

impl<S: BuildHasher> PartialSource for HashMap<String, String, S> {
    fn get_partial(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<S: BuildHasher> PartialSource for HashMap<&str, &str, S> {
    fn get_partial(&self, name: &str) -> Option<String> {
        self.get(name).map(|partial| partial.to_string())
    }
}

impl PartialSource for BTreeMap<String, String> {
    fn get_partial(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl PartialSource for BTreeMap<&str, &str> {
    fn get_partial(&self, name: &str) -> Option<String> {
        self.get(name).map(|partial| partial.to_string())
    }
}

/// Partials produced by a closure
#[derive(Debug, Clone, Copy)]
pub struct PartialFn<F>(F);

impl<F> PartialSource for PartialFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get_partial(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}

/// Wrap a closure as a [`PartialSource`]
///
/// ```rust
/// use stache_core::template::partials::{from_fn, PartialSource};
///
/// let partials = from_fn(|name| (name == "user").then(|| "<b>{{name}}</b>".to_string()));
/// assert_eq!(partials.get_partial("user").as_deref(), Some("<b>{{name}}</b>"));
/// assert_eq!(partials.get_partial("other"), None);
/// ```
pub fn from_fn<F>(f: F) -> PartialFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    PartialFn(f)
}

/// Partials loaded from `<root>/<name>.<extension>` on demand
#[derive(Debug, Clone)]
pub struct DirPartials {
    root: PathBuf,
    extension: String,
}

impl DirPartials {
    /// Default file extension for partials
    pub const DEFAULT_EXTENSION: &'static str = "mustache";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a partial name maps to, or `None` if the name would leave the root
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let contained = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !contained {
            warn!("Rejected partial name escaping {}: {}", self.root.display(), name);
            return None;
        }

        Some(self.root.join(format!("{}.{}", name, self.extension)))
    }
}

impl PartialSource for DirPartials {
    fn get_partial(&self, name: &str) -> Option<String> {
        let path = self.path_for(name)?;
        match std::fs::read_to_string(&path) {
            Ok(partial) => Some(partial),
            Err(err) => {
                debug!("Partial {} not loaded from {}: {}", name, path.display(), err);
                None
            }
        }
    }
}
