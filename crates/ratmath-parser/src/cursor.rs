//! Character cursor over whitespace-free input.

/// Position-tracking cursor.
///
/// Whitespace is removed up front, so every lookahead is a plain index.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    chars: Vec<char>,
    position: usize,
}

impl Cursor {
    /// Creates a cursor at the start of `text` with all whitespace removed.
    pub(crate) fn new(text: &str) -> Self {
        Self {
            chars: text.chars().filter(|c| !c.is_whitespace()).collect(),
            position: 0,
        }
    }

    /// Returns the current character offset.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` once every character has been consumed.
    pub(crate) fn is_eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Returns the current character.
    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Returns the character `offset` places ahead.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Consumes and returns the current character.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Consumes `expected` if it is next.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if the remaining input starts with `prefix`.
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(i, ch)| self.peek_at(i) == Some(ch))
    }

    /// Consumes `prefix` if the remaining input starts with it.
    pub(crate) fn eat_str(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.position += prefix.chars().count();
            true
        } else {
            false
        }
    }

    /// Returns the unconsumed input.
    pub(crate) fn rest(&self) -> String {
        self.chars[self.position.min(self.chars.len())..]
            .iter()
            .collect()
    }

    /// Consumes characters while `predicate` holds and returns them.
    pub(crate) fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek().filter(|&c| predicate(c)) {
            out.push(ch);
            self.position += 1;
        }
        out
    }
}
