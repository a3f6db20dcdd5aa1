//! URL path tokenizing.
//!
//! The path of a request line like `GET /sensor2/temp/c HTTP/1.1` is split
//! into its `/`-delimited segments (`["sensor2", "temp", "c"]`). Segments are
//! borrowed from the request line, so they live only as long as the buffer
//! they came from is not reused.

use heapless::Vec;
use tracing::debug;

/// Default maximum number of path segments kept.
pub const MAX_SEGMENTS: usize = 5;

/// The segments of a request path, at most `M` of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegments<'a, const M: usize = MAX_SEGMENTS> {
    segments: Vec<&'a str, M>,
    /// True if the path had more than `M` segments and the rest was dropped.
    truncated: bool,
}

impl<'a, const M: usize> PathSegments<'a, M> {
    /// Tokenize the path of a request line.
    ///
    /// The path is the second space-delimited field of the line; runs of
    /// spaces count as one delimiter. Empty segments (leading, trailing or
    /// doubled slashes) are skipped. Tokenizing stops after `M` segments.
    pub fn tokenize(line: &'a str) -> Self {
        let path = line
            .split(' ')
            .filter(|field| !field.is_empty())
            .nth(1)
            .unwrap_or("");

        let mut segments = Vec::new();
        let mut truncated = false;

        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            if segments.push(segment).is_err() {
                debug!(max = M, path, "too many path segments, ignoring the rest");
                truncated = true;
                break;
            }
        }

        Self {
            segments,
            truncated,
        }
    }

    /// Number of segments produced.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.segments.get(index).copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.segments
    }

    /// Whether segments past the maximum were dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
