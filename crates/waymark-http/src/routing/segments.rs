//! Path tokenizing

use std::ops::Deref;

/// Non-empty `/`-separated components of a request path, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSegments(Vec<String>);

/// Segments left over after handler and action matching, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList(Vec<String>);

/// Split a path into its non-empty segments
///
/// Segments are kept exactly as they appear, percent-encoding included.
/// Empty and root paths produce no segments.
pub fn tokenize(path: &str) -> PathSegments {
    PathSegments(
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Whether a segment can take part in a handler or action name
///
/// Hyphens are ignored; what is left must be non-empty and purely ASCII
/// alphabetic.
pub fn is_identifier_segment(segment: &str) -> bool {
    let mut letters = segment.chars().filter(|c| *c != '-').peekable();
    letters.peek().is_some() && letters.all(|c| c.is_ascii_alphabetic())
}

/// Length of the leading run of identifier segments
pub fn identifier_window(segments: &[String]) -> usize {
    segments
        .iter()
        .position(|segment| !is_identifier_segment(segment))
        .unwrap_or(segments.len())
}

impl PathSegments {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for PathSegments {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl ParameterList {
    pub fn new(parameters: Vec<String>) -> Self {
        Self(parameters)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for ParameterList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<&[String]> for ParameterList {
    fn from(parameters: &[String]) -> Self {
        Self(parameters.to_vec())
    }
}

impl From<Vec<&str>> for ParameterList {
    fn from(parameters: Vec<&str>) -> Self {
        Self(parameters.into_iter().map(str::to_string).collect())
    }
}
