use thiserror::Error;

/// Errors raised while parsing or rendering a template.
///
/// Lookups never fail: missing names, missing partials and falsy sections
/// all degrade to empty output. Only malformed templates and unusable
/// configurations end up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    // Parse errors
    #[error("Unclosed tag at {pos}")]
    UnclosedTag { pos: usize },

    #[error("Unclosed section \"{name}\" at {pos}")]
    UnclosedSection { name: String, pos: usize },

    #[error("Unopened section \"{name}\" at {pos}")]
    UnopenedSection { name: String, pos: usize },

    #[error("Invalid tags: {tags}")]
    InvalidTags { tags: String },

    // Render errors
    #[error("Cannot use higher-order sections without the original template")]
    MissingOriginalTemplate,

    #[error(
        "Invalid template! Template should be a \"string\" but \"{type_name}\" was given as the first argument for mustache#render(template, view, partials)"
    )]
    InvalidTemplate { type_name: String },
}

impl TemplateError {
    /// True for errors produced by the parser (as opposed to render-time failures)
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            TemplateError::UnclosedTag { .. }
                | TemplateError::UnclosedSection { .. }
                | TemplateError::UnopenedSection { .. }
                | TemplateError::InvalidTags { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
