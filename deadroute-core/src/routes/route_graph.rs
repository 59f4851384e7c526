//! Reconciliation of backend routes against frontend calls.
//!
//! A route is used when a frontend call equals it exactly, or when the
//! call fits the route with each `{var}` standing for one or more non-`/`
//! characters. Everything else is reported, sorted by path.
//!
//! Performance characteristics:
//! - Exact check: O(1) per route
//! - Pattern fallback: O(|C|) per unmatched route, stops at the first hit

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use super::call_extractor::{extract_calls, FrontendCalls};
use super::route_extractor::{extract_routes, BackendRoutes};
use crate::normalize::{RoutePath, PLACEHOLDER};
use crate::scan::SourceKind;

/// Anchored matcher built from a route template.
///
/// Literal segments match exactly (`.` in `/report.csv` is a dot, not a
/// wildcard); each `{var}` matches one or more non-`/` characters.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    route: String,
    regex: Option<Regex>,
}

impl RouteMatcher {
    pub fn new(route: &RoutePath) -> Self {
        let body = route
            .as_str()
            .split(PLACEHOLDER)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("[^/]+");
        // only the compiled-size limit can reject an escaped pattern
        let regex = match Regex::new(&format!("^{}$", body)) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(
                    route = %route,
                    error = %e,
                    "route too large for pattern match, using exact match"
                );
                None
            }
        };
        Self {
            route: route.as_str().to_string(),
            regex,
        }
    }

    pub fn matches(&self, call: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(call),
            None => self.route == call,
        }
    }
}

/// How a route was found to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteUsage {
    Exact,
    Pattern,
    Unused,
}

/// A backend route with no frontend caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct UnusedRoute {
    /// Normalized route path
    pub path: RoutePath,
    /// Declaring file
    pub file: PathBuf,
    /// Line of the declaring annotation (1-indexed)
    pub line: usize,
}

impl UnusedRoute {
    /// Base name of the declaring file.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// Counts gathered during reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteStats {
    pub backend_routes: usize,
    pub frontend_calls: usize,
    pub exact_matches: usize,
    pub pattern_matches: usize,
    pub unused: usize,
}

/// Result of route reconciliation.
#[derive(Debug, Clone)]
pub struct RouteAnalysisResult {
    /// Unused routes, sorted by path
    pub unused: Vec<UnusedRoute>,
    pub stats: RouteStats,
}

/// Backend routes and frontend calls of one run.
#[derive(Debug, Default)]
pub struct RouteGraph {
    routes: BackendRoutes,
    calls: FrontendCalls,
}

impl RouteGraph {
    pub fn new(routes: BackendRoutes, calls: FrontendCalls) -> Self {
        Self { routes, calls }
    }

    /// Build a graph from in-memory `(path, content)` pairs.
    ///
    /// Files are classified by name exactly as on disk: backend sources
    /// declare routes and contribute redirects, markup and scripts
    /// contribute calls. Order matters for duplicate declarations.
    pub fn from_sources<P: AsRef<Path>>(sources: &[(P, &str)]) -> Self {
        let mut routes = BackendRoutes::new();
        let mut calls = FrontendCalls::new();

        for (path, content) in sources {
            let path: &Path = path.as_ref();
            if SourceKind::from_path(path) == Some(SourceKind::Backend) {
                routes.merge(extract_routes(path, content));
            }
            calls.merge(extract_calls(path, content));
        }

        Self { routes, calls }
    }

    pub fn routes(&self) -> &BackendRoutes {
        &self.routes
    }

    pub fn calls(&self) -> &FrontendCalls {
        &self.calls
    }

    /// Decide whether `route` has a frontend caller.
    pub fn usage_of(&self, route: &RoutePath) -> RouteUsage {
        if self.calls.contains(route.as_str()) {
            return RouteUsage::Exact;
        }

        let matcher = RouteMatcher::new(route);
        if self.calls.iter().any(|call| matcher.matches(call.as_str())) {
            RouteUsage::Pattern
        } else {
            RouteUsage::Unused
        }
    }

    /// Perform complete analysis and return the sorted unused list.
    pub fn analyze(&self) -> RouteAnalysisResult {
        let mut stats = RouteStats {
            backend_routes: self.routes.len(),
            frontend_calls: self.calls.len(),
            ..Default::default()
        };
        let mut unused = Vec::new();

        for (path, def) in self.routes.iter() {
            match self.usage_of(path) {
                RouteUsage::Exact => stats.exact_matches += 1,
                RouteUsage::Pattern => stats.pattern_matches += 1,
                RouteUsage::Unused => unused.push(UnusedRoute {
                    path: path.clone(),
                    file: def.file.clone(),
                    line: def.line,
                }),
            }
        }

        unused.sort();
        stats.unused = unused.len();

        RouteAnalysisResult { unused, stats }
    }
}
