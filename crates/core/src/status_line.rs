//! Bounded status line buffer

use thiserror::Error;

/// Returned when a fragment did not fit in the status line
#[derive(Debug, Error, PartialEq, Eq)]
#[error("status line exceeds {max_len} bytes")]
pub struct Overflow {
    pub max_len: usize,
}

/// The aggregate status string, rebuilt every cycle
#[derive(Debug, Clone)]
pub struct StatusLine {
    buf: String,
    max_len: usize,
}

impl StatusLine {
    pub fn new(max_len: usize) -> Self {
        Self {
            buf: String::with_capacity(max_len),
            max_len,
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Append a fragment
    ///
    /// On overflow the prefix that fits (cut on a char boundary) is kept and
    /// [`Overflow`] is returned; callers stop appending for this cycle.
    pub fn push(&mut self, fragment: &str) -> Result<(), Overflow> {
        let room = self.max_len.saturating_sub(self.buf.len());
        if fragment.len() <= room {
            self.buf.push_str(fragment);
            return Ok(());
        }
        self.buf.push_str(truncate_to(fragment, room));
        Err(Overflow {
            max_len: self.max_len,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

/// Longest prefix of `s` no longer than `max` bytes, ending on a char boundary
pub fn truncate_to(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
