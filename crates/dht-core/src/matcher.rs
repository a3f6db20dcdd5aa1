//! Request line classification.
//!
//! The endpoint does not route on a parsed URL. It looks for a handful of
//! byte patterns anywhere in the buffered request line and takes the first
//! one that matches.

/// Check whether `needle` occurs as a contiguous run of bytes in `haystack`.
///
/// An empty needle is always found. The search is naive (O(n·m)), which is
/// fine for the few dozen bytes a request line holds.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// The three pages the endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /` - compact comma separated table of every sensor.
    Root,
    /// `GET /s...` - a single value addressed by path segments.
    Sensor,
    /// `GET /report` - human readable report of every sensor.
    Report,
}

/// Patterns in priority order. The trailing space in the root and report
/// patterns pins the end of the path so `/` does not swallow `/sensor0`.
const ROUTES: [(&[u8], Route); 3] = [
    (b"GET / ", Route::Root),
    (b"GET /s", Route::Sensor),
    (b"GET /report ", Route::Report),
];

impl Route {
    /// Classify a buffered request line. The first matching pattern wins.
    pub fn classify(line: &[u8]) -> Option<Route> {
        ROUTES
            .iter()
            .find(|(pattern, _)| contains(line, pattern))
            .map(|&(_, route)| route)
    }
}
