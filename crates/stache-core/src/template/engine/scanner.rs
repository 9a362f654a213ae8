//! Forward-only cursor over template text

use regex::Regex;

/// A string scanner that the parser uses to find tags in template text.
///
/// Matching is anchored at the current position: the cursor only ever moves
/// forward, by exactly the amount of text a call returns.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// True when no text remains
    pub fn eos(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Byte offset of the cursor in the full text
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The full text being scanned
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The unconsumed remainder
    pub fn tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Match `re` at the current position.
    ///
    /// Returns the matched text and consumes it, or returns `""` without
    /// moving when the first match does not start at the cursor.
    pub fn scan(&mut self, re: &Regex) -> &'a str {
        let tail = self.tail();
        match re.find(tail) {
            Some(m) if m.start() == 0 => {
                self.pos += m.end();
                &tail[..m.end()]
            }
            _ => "",
        }
    }

    /// Consume everything before the first match of `re`.
    ///
    /// Returns the skipped text, which is the entire remainder when `re`
    /// does not match at all.
    pub fn scan_until(&mut self, re: &Regex) -> &'a str {
        let tail = self.tail();
        let skipped = match re.find(tail) {
            None => tail,
            Some(m) => &tail[..m.start()],
        };
        self.pos += skipped.len();
        skipped
    }
}
