//! Template engine implementation

mod blocks;
mod context;
mod helpers;
mod scanner;
mod tokenize;

pub use context::Context;
pub use helpers::escape_html;
pub use scanner::Scanner;
pub use tokenize::{Token, TokenKind};

use crate::config::{RenderConfig, Tags};
use crate::error::{Result, TemplateError};
use crate::template::cache::{CacheKey, DefaultTemplateCache, TemplateCache, Tokens};
use crate::template::partials::PartialSource;
use crate::view::Value;
use log::{debug, trace};
use std::sync::Arc;

use helpers::{escaped_value, indent_partial, raw_value};
use tokenize::parse_template;

/// Collaborators shared by every token of one render pass
struct RenderState<'a> {
    partials: &'a dyn PartialSource,
    /// Source the tokens were parsed from, sliced for lambda sections
    original: Option<&'a str>,
    config: &'a RenderConfig,
}

/// Parses templates (through a cache) and renders token trees
#[derive(Clone)]
pub struct TemplateEngine {
    cache: Option<Arc<dyn TemplateCache>>,
    tags: Tags,
}

impl TemplateEngine {
    /// Create an engine with an in-memory cache and `{{ }}` tags
    pub fn new() -> Self {
        Self::with_cache(Arc::new(DefaultTemplateCache::new()))
    }

    /// Create an engine that parses every template from scratch
    pub fn without_cache() -> Self {
        Self {
            cache: None,
            tags: Tags::default(),
        }
    }

    pub fn with_cache(cache: Arc<dyn TemplateCache>) -> Self {
        Self {
            cache: Some(cache),
            tags: Tags::default(),
        }
    }

    pub fn cache(&self) -> Option<Arc<dyn TemplateCache>> {
        self.cache.clone()
    }

    /// Replace the cache; `None` disables caching
    pub fn set_cache(&mut self, cache: Option<Arc<dyn TemplateCache>>) {
        self.cache = cache;
    }

    /// Tags used when a call does not supply its own
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn set_tags(&mut self, tags: Tags) {
        self.tags = tags;
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Parse `template` into a token tree, consulting the cache first.
    ///
    /// `tags` overrides the engine's default delimiters for this call.
    pub fn parse(&self, template: &str, tags: Option<&Tags>) -> Result<Tokens> {
        let tags = tags.unwrap_or(&self.tags);

        let Some(cache) = &self.cache else {
            return Ok(parse_template(template, tags)?.into());
        };

        let key = CacheKey::new(template, tags);
        if let Some(tokens) = cache.get(&key) {
            debug!("Template cache hit ({} bytes, tags {})", template.len(), tags);
            return Ok(tokens);
        }

        debug!("Template cache miss ({} bytes, tags {})", template.len(), tags);
        let tokens: Tokens = parse_template(template, tags)?.into();
        cache.set(key, Arc::clone(&tokens));
        Ok(tokens)
    }

    /// Render `template` against `view`
    ///
    /// # Arguments
    ///
    /// * `template` - Template source
    /// * `view` - Root view of the context chain
    /// * `partials` - Source for `{{> name}}` tags
    /// * `config` - Tag and escaping overrides for this call
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed templates (in the template itself,
    /// a partial, or text rendered by a lambda).
    pub fn render(
        &self,
        template: &str,
        view: &Value,
        partials: &dyn PartialSource,
        config: &RenderConfig,
    ) -> Result<String> {
        let context = Context::new(view.clone());
        self.render_in_context(template, &context, partials, config)
    }

    /// Parse and render `template` against an existing context chain
    pub fn render_in_context(
        &self,
        template: &str,
        context: &Context<'_>,
        partials: &dyn PartialSource,
        config: &RenderConfig,
    ) -> Result<String> {
        let tokens = self.parse(template, config.tags.as_ref())?;
        self.render_tokens(&tokens, context, partials, Some(template), config)
    }

    /// Render an already parsed token tree.
    ///
    /// `original` must be the text `tokens` were parsed from; lambda sections
    /// fail with [`TemplateError::MissingOriginalTemplate`] without it.
    pub fn render_tokens(
        &self,
        tokens: &[Token],
        context: &Context<'_>,
        partials: &dyn PartialSource,
        original: Option<&str>,
        config: &RenderConfig,
    ) -> Result<String> {
        let state = RenderState {
            partials,
            original,
            config,
        };
        self.render_with(tokens, context, &state)
    }

    fn render_with(
        &self,
        tokens: &[Token],
        context: &Context<'_>,
        state: &RenderState<'_>,
    ) -> Result<String> {
        let mut output = String::new();

        for token in tokens {
            match &token.kind {
                TokenKind::Text => output.push_str(&token.value),
                TokenKind::Name => {
                    output.push_str(&escaped_value(context.lookup(&token.value), state.config))
                }
                TokenKind::Unescaped => output.push_str(&raw_value(context.lookup(&token.value))),
                TokenKind::Section {
                    children,
                    close_start,
                } => {
                    let rendered =
                        self.render_section(token, children, *close_start, context, state)?;
                    output.push_str(&rendered);
                }
                TokenKind::InvertedSection { children, .. } => {
                    let rendered = self.render_inverted(token, children, context, state)?;
                    output.push_str(&rendered);
                }
                TokenKind::Partial {
                    indentation,
                    tag_index,
                    line_has_non_space,
                } => {
                    let body = state.partials.get_partial(&token.value);
                    let Some(partial) = body else {
                        debug!("Partial not found: {}", token.value);
                        continue;
                    };
                    let partial = if *tag_index == 0 && !indentation.is_empty() {
                        indent_partial(&partial, indentation, *line_has_non_space)
                    } else {
                        partial
                    };
                    output.push_str(&self.render_partial(&token.value, &partial, context, state)?);
                }
                TokenKind::Comment | TokenKind::ChangeDelimiters | TokenKind::CloseSection => {}
            }
        }

        Ok(output)
    }

    fn render_section(
        &self,
        token: &Token,
        children: &[Token],
        close_start: usize,
        context: &Context<'_>,
        state: &RenderState<'_>,
    ) -> Result<String> {
        let value = match context.lookup(&token.value) {
            Some(value) if value.is_truthy() => value,
            _ => return Ok(String::new()),
        };

        match &value {
            Value::Array(items) => {
                trace!("Section {} iterates {} items", token.value, items.len());
                let mut output = String::new();
                for item in items.iter() {
                    output.push_str(&self.render_with(children, &context.push(item.clone()), state)?);
                }
                Ok(output)
            }
            Value::Object(_) | Value::String(_) | Value::Number(_) => {
                self.render_with(children, &context.push(value.clone()), state)
            }
            Value::Lambda(lambda) => {
                trace!("Section {} is a lambda", token.value);
                let text = state
                    .original
                    .and_then(|original| original.get(token.end..close_start))
                    .ok_or(TemplateError::MissingOriginalTemplate)?;

                let mut sub_render = |template: &str| {
                    self.render_in_context(template, context, state.partials, state.config)
                };
                let rendered = lambda.call(context.view(), text, &mut sub_render)?;
                Ok(rendered.unwrap_or_default())
            }
            Value::Bool(_) | Value::Func(_) | Value::Null => {
                self.render_with(children, context, state)
            }
        }
    }

    fn render_inverted(
        &self,
        token: &Token,
        children: &[Token],
        context: &Context<'_>,
        state: &RenderState<'_>,
    ) -> Result<String> {
        let render = match context.lookup(&token.value) {
            None => true,
            Some(value) => !value.is_truthy() || value.is_empty_array(),
        };

        if render {
            self.render_with(children, context, state)
        } else {
            Ok(String::new())
        }
    }

    /// Render an included partial with the current context.
    ///
    /// Partials are parsed with the call's configured tags, never with tags
    /// changed inside the including template.
    fn render_partial(
        &self,
        name: &str,
        partial: &str,
        context: &Context<'_>,
        state: &RenderState<'_>,
    ) -> Result<String> {
        trace!("Rendering partial {}", name);
        let tokens = self.parse(partial, state.config.tags.as_ref())?;
        self.render_tokens(&tokens, context, state.partials, Some(partial), state.config)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
