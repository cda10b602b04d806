use litebike_core::scores::{PlayerTag, TAG_LEN};

/// Keystroke buffer behind the end-of-match name prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    chars: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a letter, upper-cased. Anything that is not an ASCII letter,
    /// or any key once the buffer is full, is ignored. Returns whether the
    /// key was taken.
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii_alphabetic() || self.is_full() {
            return false;
        }
        self.chars.push(c.to_ascii_uppercase());
        true
    }

    pub fn backspace(&mut self) {
        self.chars.pop();
    }

    /// Feed every character of `keys` in order.
    pub fn type_str(&mut self, keys: &str) {
        for c in keys.chars() {
            self.push(c);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }

    pub fn is_full(&self) -> bool {
        self.chars.len() >= TAG_LEN
    }

    /// The entered tag, available only once exactly three letters are in.
    pub fn submit(&self) -> Option<PlayerTag> {
        if !self.is_full() {
            return None;
        }
        self.chars.parse().ok()
    }
}
