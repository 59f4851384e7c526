//! Route path normalization.
//!
//! Every path that reaches reconciliation is a [`RoutePath`]: it starts with
//! `/`, has no trailing `/` (unless it is exactly `/`), and every path
//! variable is replaced by [`PLACEHOLDER`], whatever its original name or
//! syntax.

use regex::Regex;
use serde::Serialize;
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::OnceLock;

/// Canonical stand-in for any path variable.
pub const PLACEHOLDER: &str = "{var}";

/// `{id}`, `{id:[0-9]+}`, `{var}`.
fn brace_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[^}]+\}").expect("Hardcoded regex pattern is valid"))
}

/// `${user.id}` in templates and script template literals.
fn interpolation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{[^}]+\}").expect("Hardcoded regex pattern is valid"))
}

/// Link-rewriting preprocessor syntax: `__${expr}__`.
fn preprocessor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"__\$\{([^}]+)\}_?_").expect("Hardcoded regex pattern is valid"))
}

/// Removes one trailing `/` unless the value is exactly `/`.
pub fn strip_trailing_slash(value: &str) -> &str {
    if value.len() > 1 {
        value.strip_suffix('/').unwrap_or(value)
    } else {
        value
    }
}

/// Collapses `{name}` segments only. Used for backend declarations.
pub fn collapse_path_vars(value: &str) -> Cow<'_, str> {
    brace_var_regex().replace_all(value, PLACEHOLDER)
}

/// Collapses `${...}`, then `__${...}__`, then bare `{...}`.
pub fn collapse_template_vars(value: &str) -> String {
    let step = interpolation_regex().replace_all(value, PLACEHOLDER);
    let step = preprocessor_regex().replace_all(&step, PLACEHOLDER);
    brace_var_regex().replace_all(&step, PLACEHOLDER).into_owned()
}

/// A normalized URL path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoutePath(String);

impl RoutePath {
    /// Normalizes a backend declaration (class prefix already joined with
    /// the method path). A missing leading `/` is added.
    pub fn from_declaration(joined: &str) -> Self {
        let rooted: Cow<'_, str> = if joined.starts_with('/') {
            Cow::Borrowed(joined)
        } else {
            Cow::Owned(format!("/{}", joined))
        };
        let trimmed = strip_trailing_slash(&rooted);
        Self(collapse_path_vars(trimmed).into_owned())
    }

    /// Normalizes a frontend reference. Returns `None` for values that are
    /// not root-relative paths (`https://...`, `#top`, `mailto:` ...).
    pub fn from_reference(candidate: &str) -> Option<Self> {
        if !candidate.starts_with('/') {
            return None;
        }
        Some(Self(collapse_template_vars(strip_trailing_slash(candidate))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the path contains at least one variable segment.
    pub fn has_placeholder(&self) -> bool {
        self.0.contains(PLACEHOLDER)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoutePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}
