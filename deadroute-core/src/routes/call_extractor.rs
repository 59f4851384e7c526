//! Frontend call extraction.
//!
//! Collects every root-relative path the frontend can reach:
//! - markup attributes: `href`, `action`, `src` (optionally `th:`-prefixed)
//!   and the htmx verbs `hx-get` .. `hx-patch`
//! - quoted and backtick string literals in scripts and inline `<script>`
//! - `redirect:` targets returned by backend handlers
//!
//! All candidates are normalized with [`RoutePath::from_reference`] and land
//! in one deduplicated set.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use crate::error::{DeadrouteResult, IoResultExt};
use crate::normalize::RoutePath;
use crate::scan::SourceKind;

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"\b(?:th:)?(?:href|action|src|hx-get|hx-post|hx-put|hx-delete|hx-patch)\s*=\s*"([^"]+)""#,
        )
        .expect("Hardcoded regex pattern is valid")
    })
}

fn redirect_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"redirect:([^\s"]+)"#).expect("Hardcoded regex pattern is valid")
    })
}

fn quoted_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"["'](/[a-zA-Z0-9_/-]+(?:\{[^}]+\})?)["']"#)
            .expect("Hardcoded regex pattern is valid")
    })
}

fn template_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"`(/[^{}`]+(?:\$\{[^}]+\}[^{}`]*)*)`")
            .expect("Hardcoded regex pattern is valid")
    })
}

/// Strips Thymeleaf link-expression syntax from an attribute value.
///
/// `@{/users/{id}(id=${u.id})}` becomes `/users/{id}`.
fn unwrap_link_expression(value: &str) -> &str {
    let value = value.trim();
    let value = match value.strip_prefix("@{") {
        Some(inner) if value.ends_with('}') => &inner[..inner.len() - 1],
        _ => value,
    };
    match value.find('(') {
        Some(idx) => &value[..idx],
        None => value,
    }
}

/// Paths referenced by markup attributes.
pub fn extract_attribute_calls(content: &str) -> Vec<RoutePath> {
    attribute_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| RoutePath::from_reference(unwrap_link_expression(m.as_str())))
        .collect()
}

/// Paths in quoted and backtick string literals.
pub fn extract_script_calls(content: &str) -> Vec<RoutePath> {
    let quoted = quoted_literal_regex().captures_iter(content);
    let templated = template_literal_regex().captures_iter(content);

    quoted
        .chain(templated)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| RoutePath::from_reference(m.as_str()))
        .collect()
}

/// Targets of `redirect:` view names.
pub fn extract_redirect_calls(content: &str) -> Vec<RoutePath> {
    redirect_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| RoutePath::from_reference(m.as_str()))
        .collect()
}

/// Frontend references found in one file.
#[derive(Debug, Clone, Default)]
pub struct CallExtractionResult {
    pub calls: HashSet<RoutePath>,
}

/// Extract calls from file content, choosing the passes by file kind.
///
/// Markup gets the attribute pass plus the script passes for inline
/// scripts; backend sources are only scanned for redirects.
pub fn extract_calls(path: &Path, content: &str) -> CallExtractionResult {
    let calls: HashSet<RoutePath> = match SourceKind::from_path(path) {
        Some(SourceKind::Markup) => extract_attribute_calls(content)
            .into_iter()
            .chain(extract_script_calls(content))
            .collect(),
        Some(SourceKind::Script) => extract_script_calls(content).into_iter().collect(),
        Some(SourceKind::Backend) => extract_redirect_calls(content).into_iter().collect(),
        None => HashSet::new(),
    };

    debug!(file = %path.display(), calls = calls.len(), "extracted frontend calls");

    CallExtractionResult { calls }
}

/// Read a file and extract its frontend calls.
pub fn extract_calls_from_file(path: &Path) -> DeadrouteResult<CallExtractionResult> {
    let content = fs::read_to_string(path).with_path(path)?;
    Ok(extract_calls(path, &content))
}

/// Deduplicated set of every frontend reference.
#[derive(Debug, Clone, Default)]
pub struct FrontendCalls {
    calls: HashSet<RoutePath>,
}

impl FrontendCalls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, result: CallExtractionResult) {
        self.calls.extend(result.calls);
    }

    pub fn insert(&mut self, call: RoutePath) -> bool {
        self.calls.insert(call)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.calls.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutePath> {
        self.calls.iter()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl FromIterator<RoutePath> for FrontendCalls {
    fn from_iter<I: IntoIterator<Item = RoutePath>>(iter: I) -> Self {
        Self {
            calls: iter.into_iter().collect(),
        }
    }
}

/// Extract frontend calls from markup, script, and backend files.
pub fn extract_frontend_calls(files: &[PathBuf], parallel: bool) -> DeadrouteResult<FrontendCalls> {
    let results: Vec<CallExtractionResult> = if parallel {
        files
            .par_iter()
            .map(|f| extract_calls_from_file(f))
            .collect::<DeadrouteResult<_>>()?
    } else {
        files
            .iter()
            .map(|f| extract_calls_from_file(f))
            .collect::<DeadrouteResult<_>>()?
    };

    let mut calls = FrontendCalls::new();
    for result in results {
        calls.merge(result);
    }
    Ok(calls)
}
