//! Block post-processing: merging text runs and nesting sections

use super::tokenize::{Token, TokenKind};
use crate::error::{Result, TemplateError};

/// Merge consecutive text tokens into one, skipping stripped slots.
pub(crate) fn squash_tokens(tokens: Vec<Option<Token>>) -> Vec<Token> {
    let mut squashed: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens.into_iter().flatten() {
        if token.kind == TokenKind::Text {
            if let Some(last) = squashed
                .last_mut()
                .filter(|last| last.kind == TokenKind::Text)
            {
                last.value.push_str(&token.value);
                last.end = token.end;
                continue;
            }
        }
        squashed.push(token);
    }

    squashed
}

/// Fold a flat token list into a tree.
///
/// Tokens between a section and its close tag become the section's
/// children; the close tag itself is consumed and its start offset recorded
/// on the section.
///
/// # Nesting
///
/// Uses an explicit stack of open sections, each paired with the children
/// collected so far.
pub(crate) fn nest_tokens(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut root: Vec<Token> = Vec::new();
    let mut open: Vec<(Token, Vec<Token>)> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Section { .. } | TokenKind::InvertedSection { .. } => {
                open.push((token, Vec::new()));
            }
            TokenKind::CloseSection => {
                let (mut section, children) =
                    open.pop().ok_or_else(|| TemplateError::UnopenedSection {
                        name: token.value.clone(),
                        pos: token.start,
                    })?;
                section.close_section(children, token.start);
                match open.last_mut() {
                    Some((_, collector)) => collector.push(section),
                    None => root.push(section),
                }
            }
            _ => match open.last_mut() {
                Some((_, collector)) => collector.push(token),
                None => root.push(token),
            },
        }
    }

    if let Some((section, _)) = open.pop() {
        return Err(TemplateError::UnclosedSection {
            name: section.value,
            pos: section.start,
        });
    }

    Ok(root)
}
