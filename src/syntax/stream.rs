//! Case-folding character adapter.
//!
//! Wraps the raw character sequence of a query so that look-ahead (the
//! accessor keyword recognition goes through) is uppercased, while textual
//! extraction returns the original casing. Literal string and field values
//! are therefore never mangled even though keywords match case-insensitively.

/// Sentinel returned by [`CaseInsensitiveStream::la`] at end of stream.
pub const EOF: i32 = -1;

pub struct CaseInsensitiveStream {
    chars: Vec<char>,
    position: usize,
}

impl CaseInsensitiveStream {
    pub fn new(input: &str) -> Self {
        CaseInsensitiveStream {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Look ahead `offset` characters (1-based: `la(1)` is the current
    /// character), uppercased. Non-character signals pass through unmodified,
    /// so end of stream is [`EOF`] with no case transform applied.
    pub fn la(&self, offset: isize) -> i32 {
        if offset == 0 {
            return EOF;
        }
        let index = self.position as isize + offset - 1;
        if index < 0 {
            return EOF;
        }
        match self.chars.get(index as usize) {
            Some(ch) => ch.to_ascii_uppercase() as i32,
            None => EOF,
        }
    }

    /// Advance past the current character.
    pub fn consume(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
    }

    /// Zero-based offset of the current character.
    pub fn index(&self) -> usize {
        self.position
    }

    pub fn seek(&mut self, index: usize) {
        self.position = index.min(self.chars.len());
    }

    /// Marks are not needed by this stream; kept for interface parity.
    pub fn mark(&self) -> i32 {
        -1
    }

    pub fn release(&self, _marker: i32) {}

    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Extract the inclusive `[start, end]` range with original casing.
    pub fn text(&self, start: usize, end: usize) -> String {
        if start >= self.chars.len() || end < start {
            return String::new();
        }
        let end = end.min(self.chars.len() - 1);
        self.chars[start..=end].iter().collect()
    }
}

#[test]
fn lookahead_folds_case_but_text_does_not() {
    let stream = CaseInsensitiveStream::new("WheRe");
    assert_eq!(stream.la(1), 'W' as i32);
    assert_eq!(stream.la(2), 'H' as i32);
    assert_eq!(stream.la(3), 'E' as i32);
    assert_eq!(stream.text(0, 4), "WheRe");
}

#[test]
fn end_of_stream_is_sentinel() {
    let stream = CaseInsensitiveStream::new("a");
    assert_eq!(stream.la(2), EOF);
    assert_eq!(stream.la(0), EOF);
}
