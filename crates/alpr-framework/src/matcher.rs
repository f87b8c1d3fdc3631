//! Route predicates.
//!
//! A rule matches an event when its method matcher accepts the event's
//! `httpMethod` **and** its path matcher accepts the event's `resource`.
//!
//! # Matching Rules
//!
//! - [`RouteMatcher::Exact`]: the value must equal the matcher string
//! - [`RouteMatcher::AnyOf`]: the value must equal one of the listed strings
//!
//! Comparison is byte-for-byte. There is no case folding, trimming, prefix
//! or pattern matching, and an empty `AnyOf` matches nothing.
//!
//! # Example
//!
//! ```rust
//! use alpr_framework::{RouteMatcher, method_matches};
//!
//! assert!(method_matches(&"GET".into(), "GET"));
//! assert!(method_matches(&RouteMatcher::from(["GET", "POST"]), "POST"));
//! assert!(!method_matches(&"GET".into(), "get"));
//! assert!(!method_matches(&RouteMatcher::default(), ""));
//! ```

use alpr_core::ProxyEvent;

/// Accepts a single string or any member of a set of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatcher {
    /// Matches exactly one value.
    Exact(String),
    /// Matches any listed value.
    AnyOf(Vec<String>),
}

/// The default matcher is an empty set, which matches nothing.
impl Default for RouteMatcher {
    fn default() -> Self {
        Self::AnyOf(Vec::new())
    }
}

impl RouteMatcher {
    /// Creates a matcher for exactly `value`.
    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact(value.into())
    }

    /// Creates a matcher for any of `values`.
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Returns whether `actual` is accepted by this matcher.
    pub fn accepts(&self, actual: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == actual,
            Self::AnyOf(candidates) => candidates.iter().any(|c| c == actual),
        }
    }
}

impl From<&str> for RouteMatcher {
    fn from(value: &str) -> Self {
        Self::Exact(value.to_owned())
    }
}

impl From<String> for RouteMatcher {
    fn from(value: String) -> Self {
        Self::Exact(value)
    }
}

impl From<Vec<String>> for RouteMatcher {
    fn from(values: Vec<String>) -> Self {
        Self::AnyOf(values)
    }
}

impl From<Vec<&str>> for RouteMatcher {
    fn from(values: Vec<&str>) -> Self {
        Self::any_of(values)
    }
}

impl From<&[&str]> for RouteMatcher {
    fn from(values: &[&str]) -> Self {
        Self::any_of(values.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for RouteMatcher {
    fn from(values: [&str; N]) -> Self {
        Self::any_of(values)
    }
}

/// Returns whether `matcher` accepts `actual`.
///
/// Used for both the method and the path half of a rule.
pub fn method_matches(matcher: &RouteMatcher, actual: &str) -> bool {
    matcher.accepts(actual)
}

/// Returns whether a method/path matcher pair accepts `event`.
pub fn route_matches(method: &RouteMatcher, path: &RouteMatcher, event: &ProxyEvent) -> bool {
    method_matches(method, event.method()) && method_matches(path, event.resource_path())
}
