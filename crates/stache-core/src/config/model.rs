use crate::config::consts::tags::{DEFAULT_CLOSE_TAG, DEFAULT_OPEN_TAG};
use crate::error::{Result, TemplateError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Opening and closing tag delimiters, e.g. `{{` / `}}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tags {
    pub open: String,
    pub close: String,
}

impl Tags {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Parse the body of a delimiter-change tag (`<% %>`) or a CLI `--tags` value.
    ///
    /// The text must split on whitespace into exactly two delimiters.
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        match parts.as_slice() {
            [open, close] => Ok(Self::new(*open, *close)),
            _ => Err(TemplateError::InvalidTags {
                tags: text.to_string(),
            }),
        }
    }
}

impl Default for Tags {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_TAG, DEFAULT_CLOSE_TAG)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.open, self.close)
    }
}

impl From<(&str, &str)> for Tags {
    fn from((open, close): (&str, &str)) -> Self {
        Self::new(open, close)
    }
}

impl From<[&str; 2]> for Tags {
    fn from([open, close]: [&str; 2]) -> Self {
        Self::new(open, close)
    }
}

impl TryFrom<&[&str]> for Tags {
    type Error = TemplateError;

    fn try_from(tags: &[&str]) -> Result<Self> {
        match tags {
            [open, close] => Ok(Self::new(*open, *close)),
            _ => Err(TemplateError::InvalidTags {
                tags: tags.join(","),
            }),
        }
    }
}

/// Escape function applied to `{{name}}` interpolations
pub type EscapeFn = Rc<dyn Fn(&str) -> String>;

/// Per-render configuration
///
/// Either field may be left unset: `tags` then falls back to the engine's
/// default delimiters and `escape` to HTML escaping.
#[derive(Clone, Default)]
pub struct RenderConfig {
    pub tags: Option<Tags>,
    pub escape: Option<EscapeFn>,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_escape<F>(mut self, escape: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.escape = Some(Rc::new(escape));
        self
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("tags", &self.tags)
            .field("escape", &self.escape.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl From<Tags> for RenderConfig {
    fn from(tags: Tags) -> Self {
        Self::new().with_tags(tags)
    }
}

impl From<(&str, &str)> for RenderConfig {
    fn from(tags: (&str, &str)) -> Self {
        Self::new().with_tags(tags)
    }
}

impl From<[&str; 2]> for RenderConfig {
    fn from(tags: [&str; 2]) -> Self {
        Self::new().with_tags(tags)
    }
}
