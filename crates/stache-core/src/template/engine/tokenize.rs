//! Tokenization for template engine
//!
//! Turns template text into a flat token list with a regex-driven scanner,
//! strips whitespace around standalone tags, then hands the list to
//! [`blocks`](super::blocks) for squashing and nesting.

use super::blocks::{nest_tokens, squash_tokens};
use super::scanner::Scanner;
use crate::config::consts::sigils;
use crate::config::Tags;
use crate::error::{Result, TemplateError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeSeq, Serializer};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#|\^|/|>|\{|&|=|!").unwrap());
static WHITE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*").unwrap());
static EQUALS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*=").unwrap());
static CURLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\}").unwrap());

/// Token classification
///
/// Sections carry their nested children once the flat list has been nested;
/// partials carry what they need to re-indent the included template.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Raw text between tags
    Text,

    /// {{name}}
    Name,

    /// {{&name}} or {{{name}}}
    Unescaped,

    /// {{#name}} ... {{/name}}
    Section {
        children: Vec<Token>,
        /// Byte position where the matching close tag starts
        close_start: usize,
    },

    /// {{^name}} ... {{/name}}
    InvertedSection {
        children: Vec<Token>,
        /// Byte position where the matching close tag starts
        close_start: usize,
    },

    /// {{/name}}, only present before nesting
    CloseSection,

    /// {{! comment }}
    Comment,

    /// {{> name}}
    Partial {
        /// Whitespace preceding the tag on its line
        indentation: String,
        /// 0-based index of the tag among the tags on its line
        tag_index: usize,
        /// Whether non-whitespace text preceded the tag on its line
        line_has_non_space: bool,
    },

    /// {{=<% %>=}}
    ChangeDelimiters,
}

/// A single token with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Tag value (name, comment text, delimiter pair) or raw text
    pub value: String,
    /// Byte position where the token starts in the source
    pub start: usize,
    /// Byte position just past the token
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
        }
    }

    /// Sigil-style kind name: `text`, `name`, `&`, `#`, `^`, `/`, `!`, `>` or `=`
    pub fn symbol(&self) -> &'static str {
        match self.kind {
            TokenKind::Text => "text",
            TokenKind::Name => "name",
            TokenKind::Unescaped => "&",
            TokenKind::Section { .. } => "#",
            TokenKind::InvertedSection { .. } => "^",
            TokenKind::CloseSection => "/",
            TokenKind::Comment => "!",
            TokenKind::Partial { .. } => ">",
            TokenKind::ChangeDelimiters => "=",
        }
    }

    /// Nested tokens of a section (empty for every other kind)
    pub fn children(&self) -> &[Token] {
        match &self.kind {
            TokenKind::Section { children, .. } | TokenKind::InvertedSection { children, .. } => {
                children
            }
            _ => &[],
        }
    }

    /// Attach nested children and the close-tag offset to a section token
    pub(crate) fn close_section(&mut self, nested: Vec<Token>, close_at: usize) {
        if let TokenKind::Section {
            children,
            close_start,
        }
        | TokenKind::InvertedSection {
            children,
            close_start,
        } = &mut self.kind
        {
            *children = nested;
            *close_start = close_at;
        }
    }
}

/// Serializes as the tuple `[kind, value, start, end, ...]`.
///
/// Sections append `[children, close_start]`; partials append
/// `[indentation, tag_index, line_has_non_space]`.
impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = match self.kind {
            TokenKind::Section { .. } | TokenKind::InvertedSection { .. } => 6,
            TokenKind::Partial { .. } => 7,
            _ => 4,
        };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(self.symbol())?;
        seq.serialize_element(&self.value)?;
        seq.serialize_element(&self.start)?;
        seq.serialize_element(&self.end)?;
        match &self.kind {
            TokenKind::Section {
                children,
                close_start,
            }
            | TokenKind::InvertedSection {
                children,
                close_start,
            } => {
                seq.serialize_element(children)?;
                seq.serialize_element(close_start)?;
            }
            TokenKind::Partial {
                indentation,
                tag_index,
                line_has_non_space,
            } => {
                seq.serialize_element(indentation)?;
                seq.serialize_element(tag_index)?;
                seq.serialize_element(line_has_non_space)?;
            }
            _ => {}
        }
        seq.end()
    }
}

/// Tag type read from the sigil after the opening delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagType {
    Name,
    Partial,
    ChangeDelimiters,
    Unescaped,
    UnescapedAlias,
    Section,
    InvertedSection,
    CloseSection,
    Comment,
}

impl TagType {
    fn from_sigil(sigil: &str) -> Self {
        match sigil.chars().next() {
            Some(sigils::PARTIAL) => TagType::Partial,
            Some(sigils::CHANGE_DELIMITERS) => TagType::ChangeDelimiters,
            Some(sigils::UNESCAPED) => TagType::Unescaped,
            Some(sigils::UNESCAPED_ALIAS) => TagType::UnescapedAlias,
            Some(sigils::SECTION) => TagType::Section,
            Some(sigils::INVERTED_SECTION) => TagType::InvertedSection,
            Some(sigils::CLOSE_SECTION) => TagType::CloseSection,
            Some(sigils::COMMENT) => TagType::Comment,
            _ => TagType::Name,
        }
    }
}

/// Delimiter patterns active for the rest of a parse
pub(crate) struct TagPatterns {
    opening: Regex,
    closing: Regex,
    closing_curly: Regex,
}

impl TagPatterns {
    pub(crate) fn compile(tags: &Tags) -> Result<Self> {
        if tags.open.is_empty() || tags.close.is_empty() {
            return Err(TemplateError::InvalidTags {
                tags: tags.to_string(),
            });
        }

        let build = |pattern: String| {
            Regex::new(&pattern).map_err(|_| TemplateError::InvalidTags {
                tags: tags.to_string(),
            })
        };

        Ok(Self {
            opening: build(format!(r"{}\s*", regex::escape(&tags.open)))?,
            closing: build(format!(r"\s*{}", regex::escape(&tags.close)))?,
            closing_curly: build(format!(r"\s*{}", regex::escape(&format!("}}{}", tags.close))))?,
        })
    }
}

/// Per-line bookkeeping for standalone-tag detection and partial indentation
#[derive(Debug, Default)]
struct LineState {
    /// Indices of whitespace text tokens on the current line
    spaces: Vec<usize>,
    /// Is there a tag on the current line?
    has_tag: bool,
    /// Is there non-space content (text or interpolation) on the current line?
    non_space: bool,
    /// Has non-space text been seen before the current position on this line?
    line_has_non_space: bool,
    /// Indentation for partials: whitespace kept, other characters as spaces
    indentation: String,
    /// Number of tags seen on the current line
    tag_index: usize,
}

impl LineState {
    /// Drop the line's whitespace tokens if it held a tag and nothing else.
    fn strip_space(&mut self, tokens: &mut [Option<Token>]) {
        if self.has_tag && !self.non_space {
            for index in self.spaces.drain(..) {
                tokens[index] = None;
            }
        } else {
            self.spaces.clear();
        }

        self.has_tag = false;
        self.non_space = false;
    }

    fn start_new_line(&mut self) {
        self.indentation.clear();
        self.tag_index = 0;
        self.line_has_non_space = false;
    }
}

/// Break `template` into a nested token tree using `tags` as the initial delimiters.
///
/// Delimiter-change tags rebind the patterns for the rest of this call only.
pub(crate) fn parse_template(template: &str, tags: &Tags) -> Result<Vec<Token>> {
    if template.is_empty() {
        return Ok(Vec::new());
    }

    let mut patterns = TagPatterns::compile(tags)?;
    let mut scanner = Scanner::new(template);
    let mut tokens: Vec<Option<Token>> = Vec::new();
    let mut sections: Vec<String> = Vec::new();
    let mut line = LineState::default();

    while !scanner.eos() {
        let mut start = scanner.pos();

        // Text between tags, one provisional token per character
        let text = scanner.scan_until(&patterns.opening);
        for chr in text.chars() {
            if chr.is_whitespace() {
                line.spaces.push(tokens.len());
                line.indentation.push(chr);
            } else {
                line.non_space = true;
                line.line_has_non_space = true;
                line.indentation.push(' ');
            }

            let end = start + chr.len_utf8();
            tokens.push(Some(Token::new(TokenKind::Text, chr, start, end)));
            start = end;

            if chr == '\n' {
                line.strip_space(&mut tokens);
                line.start_new_line();
            }
        }

        if scanner.scan(&patterns.opening).is_empty() {
            break;
        }

        line.has_tag = true;

        let mut tag = TagType::from_sigil(scanner.scan(&TAG_RE));
        scanner.scan(&WHITE_RE);

        let value = match tag {
            TagType::ChangeDelimiters => {
                let value = scanner.scan_until(&EQUALS_RE);
                scanner.scan(&EQUALS_RE);
                scanner.scan_until(&patterns.closing);
                value
            }
            TagType::UnescapedAlias => {
                let value = scanner.scan_until(&patterns.closing_curly);
                scanner.scan(&CURLY_RE);
                scanner.scan_until(&patterns.closing);
                tag = TagType::Unescaped;
                value
            }
            _ => scanner.scan_until(&patterns.closing),
        };

        if scanner.scan(&patterns.closing).is_empty() {
            return Err(TemplateError::UnclosedTag { pos: scanner.pos() });
        }

        let end = scanner.pos();
        let kind = match tag {
            TagType::Name => TokenKind::Name,
            TagType::Unescaped | TagType::UnescapedAlias => TokenKind::Unescaped,
            TagType::Section => TokenKind::Section {
                children: Vec::new(),
                close_start: end,
            },
            TagType::InvertedSection => TokenKind::InvertedSection {
                children: Vec::new(),
                close_start: end,
            },
            TagType::CloseSection => TokenKind::CloseSection,
            TagType::Comment => TokenKind::Comment,
            TagType::Partial => TokenKind::Partial {
                indentation: line.indentation.clone(),
                tag_index: line.tag_index,
                line_has_non_space: line.line_has_non_space,
            },
            TagType::ChangeDelimiters => TokenKind::ChangeDelimiters,
        };
        line.tag_index += 1;

        match tag {
            TagType::Section | TagType::InvertedSection => sections.push(value.to_string()),
            TagType::CloseSection => {
                let open = sections
                    .pop()
                    .ok_or_else(|| TemplateError::UnopenedSection {
                        name: value.to_string(),
                        pos: start,
                    })?;
                if open != value {
                    return Err(TemplateError::UnclosedSection { name: open, pos: start });
                }
            }
            TagType::Name | TagType::Unescaped | TagType::UnescapedAlias => line.non_space = true,
            TagType::ChangeDelimiters => patterns = TagPatterns::compile(&Tags::parse(value)?)?,
            TagType::Comment | TagType::Partial => {}
        }

        tokens.push(Some(Token::new(kind, value, start, end)));
    }

    line.strip_space(&mut tokens);

    if let Some(open) = sections.pop() {
        return Err(TemplateError::UnclosedSection {
            name: open,
            pos: scanner.pos(),
        });
    }

    nest_tokens(squash_tokens(tokens))
}
