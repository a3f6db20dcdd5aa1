//! Fixed-capacity request line buffer.
//!
//! Only the first bytes of a request are needed to route it, so the buffer
//! keeps at most `N` bytes and silently drops the rest. It also tracks line
//! boundaries so the caller knows when the request headers are complete.

use heapless::Vec;

/// Default number of request bytes kept.
pub const REQUEST_LINE_CAPACITY: usize = 30;

/// The start of an HTTP request plus end-of-headers detection.
#[derive(Debug, Clone)]
pub struct RequestLine<const N: usize = REQUEST_LINE_CAPACITY> {
    buffer: Vec<u8, N>,
    /// No byte other than `\r` has been seen since the last `\n`.
    line_is_blank: bool,
    /// At least one byte did not fit.
    overflowed: bool,
}

impl<const N: usize> RequestLine<N> {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            line_is_blank: true,
            overflowed: false,
        }
    }

    /// Append one byte of the request.
    ///
    /// Returns `true` once the blank line ending the headers has been seen.
    /// Bytes past capacity are dropped but still count for line tracking.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }

        match byte {
            b'\n' if self.line_is_blank => return true,
            b'\n' => self.line_is_blank = true,
            b'\r' => {}
            _ => self.line_is_blank = false,
        }
        false
    }

    /// Append a chunk of the request.
    ///
    /// Returns the number of bytes consumed up to and including the end of
    /// the headers, or `None` if more input is needed.
    pub fn feed(&mut self, bytes: &[u8]) -> Option<usize> {
        bytes
            .iter()
            .position(|&byte| self.push(byte))
            .map(|position| position + 1)
    }

    /// The buffered bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// The buffered bytes as text, cut at the first invalid UTF-8 sequence.
    pub fn as_str(&self) -> &str {
        match core::str::from_utf8(&self.buffer) {
            Ok(text) => text,
            Err(error) => {
                let valid = &self.buffer[..error.valid_up_to()];
                core::str::from_utf8(valid).unwrap_or_default()
            }
        }
    }

    /// Whether part of the request did not fit in the buffer.
    pub fn is_truncated(&self) -> bool {
        self.overflowed
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Forget everything buffered so the next connection starts clean.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.line_is_blank = true;
        self.overflowed = false;
    }
}

impl<const N: usize> Default for RequestLine<N> {
    fn default() -> Self {
        Self::new()
    }
}
