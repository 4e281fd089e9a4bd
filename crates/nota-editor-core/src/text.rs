//! Text buffer abstraction for the host document.
//!
//! The `TextBuffer` trait is the seam between the math engine's host
//! plumbing and the storage backend; `RopeBuffer` is the ropey-backed
//! implementation used for local editing.
//!
//! All offsets are char offsets (Unicode scalar values), not bytes.

use std::ops::Range;

use smol_str::{SmolStr, ToSmolStr};

/// A text buffer that supports efficient editing and offset conversion.
///
/// Mutating offsets must be in bounds; `slice`/`char_at` report invalid
/// ranges as `None` instead.
pub trait TextBuffer {
    /// Total length in bytes (UTF-8).
    fn len_bytes(&self) -> usize;

    /// Total length in chars.
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Append text at end.
    fn push(&mut self, text: &str) {
        self.insert(self.len_chars(), text);
    }

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Get character at offset. Returns None if out of bounds.
    fn char_at(&self, char_offset: usize) -> Option<char>;

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;

    /// Convert char offset to byte offset.
    fn char_to_byte(&self, char_offset: usize) -> usize;

    /// Convert byte offset to char offset.
    fn byte_to_char(&self, byte_offset: usize) -> usize;
}

/// Ropey-backed text buffer. O(log n) edits and offset conversions.
#[derive(Clone, Default)]
pub struct RopeBuffer {
    rope: ropey::Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }

    /// Underlying rope, for host code that needs chunk iteration.
    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }
}

impl TextBuffer for RopeBuffer {
    fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.rope.remove(char_range);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.end > self.len_chars() || char_range.start > char_range.end {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        if char_offset >= self.len_chars() {
            return None;
        }
        Some(self.rope.char(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.rope.char_to_byte(char_offset)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope.byte_to_char(byte_offset)
    }
}

impl From<&str> for RopeBuffer {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for RopeBuffer {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut buf = RopeBuffer::from_str("hello world");
        assert_eq!(buf.len_chars(), 11);

        buf.insert(5, " big");
        assert_eq!(buf.to_string(), "hello big world");

        buf.delete(5..9);
        assert_eq!(buf.to_string(), "hello world");

        buf.replace(6..11, "rust");
        assert_eq!(buf.to_string(), "hello rust");
    }

    #[test]
    fn test_push_appends() {
        let mut buf = RopeBuffer::new();
        buf.push("a");
        buf.push("b");
        assert_eq!(buf.to_string(), "ab");
    }

    #[test]
    fn test_slice_and_char_at() {
        let buf = RopeBuffer::from_str("hello");
        assert_eq!(buf.slice(1..4).as_deref(), Some("ell"));
        assert_eq!(buf.slice(0..9), None);
        assert_eq!(buf.char_at(4), Some('o'));
        assert_eq!(buf.char_at(5), None);
    }

    #[test]
    fn test_offset_conversion() {
        // 'é' is 2 bytes, 1 char.
        let buf = RopeBuffer::from_str("héllo");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.len_bytes(), 6);
        assert_eq!(buf.char_to_byte(2), 3);
        assert_eq!(buf.byte_to_char(3), 2);
    }
}
