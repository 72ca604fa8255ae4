//! Fixed-capacity text record

use std::fmt;

/// Text buffer that never grows past its capacity
///
/// Writes that do not fit are cut at the last UTF-8 boundary inside the
/// capacity, the record is marked truncated and the write reports
/// `fmt::Error` so formatting stops early. Every later write is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedRecord {
    buf: String,
    capacity: usize,
    truncated: bool,
}

impl BoundedRecord {
    /// Create an empty record holding at most `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Record text
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Record bytes, as sent on the wire
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum length in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether some write did not fit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Write for BoundedRecord {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Err(fmt::Error);
        }

        let remaining = self.capacity - self.buf.len();
        if s.len() <= remaining {
            self.buf.push_str(s);
            return Ok(());
        }

        let mut cut = remaining;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&s[..cut]);
        self.truncated = true;
        Err(fmt::Error)
    }
}

impl fmt::Display for BoundedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}
