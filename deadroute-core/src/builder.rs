//! Builder pattern API for route usage analysis.
//!
//! ```rust,ignore
//! use deadroute_core::prelude::*;
//!
//! let result = Deadroute::new("/path/to/project")
//!     .ignore_patterns(["/actuator*"])
//!     .analyze()?;
//!
//! for route in &result.unused {
//!     println!("{}  [{}]", route.path, route.file_name());
//! }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{AnalyzerConfig, DeadrouteConfig};
use crate::logging::log_info;
use crate::report::RouteReport;
use crate::routes::{
    extract_backend_routes, extract_frontend_calls, RouteGraph, RouteStats, UnusedRoute,
};
use crate::scan::discover_sources;

/// Builder for configuring one analysis run.
#[derive(Debug, Clone)]
pub struct Deadroute {
    /// Base directory and the three roots below it
    config: AnalyzerConfig,

    /// Route patterns left out of the unused list
    ignored_patterns: Vec<String>,

    /// Read and parse files on the rayon pool
    parallel: bool,
}

impl Deadroute {
    /// Create a new analysis builder using the default layout under `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(AnalyzerConfig::new(base_dir))
    }

    /// Create a builder from an explicit directory configuration.
    pub fn from_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            ignored_patterns: Vec::new(),
            parallel: false,
        }
    }

    /// Apply a loaded `deadroute.toml`: directory overrides and ignore list.
    pub fn with_file_config(mut self, cfg: &DeadrouteConfig) -> Self {
        self.config = self.config.with_file_config(cfg);
        if let Some(ignore) = &cfg.ignore {
            self.ignored_patterns.extend(ignore.iter().cloned());
        }
        self
    }

    /// Backend source root, relative to the base directory.
    pub fn backend_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.backend_dir = dir.into();
        self
    }

    /// Markup template root, relative to the base directory.
    pub fn templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.templates_dir = dir.into();
        self
    }

    /// Script root, relative to the base directory.
    pub fn scripts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.scripts_dir = dir.into();
        self
    }

    /// Add patterns for routes to ignore.
    pub fn ignore_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.ignored_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Enable parallel extraction. Output is identical either way.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run the analysis and return results.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Discover files
        let sources = discover_sources(
            &self.config.backend_root(),
            &self.config.templates_root(),
            &self.config.scripts_root(),
        );
        info!(
            backend = sources.backend.len(),
            markup = sources.markup.len(),
            script = sources.script.len(),
            "discovered source files"
        );

        // 2. Backend routes
        let routes = extract_backend_routes(&sources.backend, self.parallel)
            .context("Failed to extract backend routes")?;

        // 3. Frontend calls (markup, backend redirects, scripts)
        let calls = extract_frontend_calls(&sources.frontend_inputs(), self.parallel)
            .context("Failed to extract frontend calls")?;

        // 4. Reconcile
        let graph = RouteGraph::new(routes, calls);
        let analysis = graph.analyze();

        // 5. Apply ignore patterns
        let unused: Vec<UnusedRoute> = analysis
            .unused
            .into_iter()
            .filter(|r| !self.is_ignored(r.path.as_str()))
            .collect();

        log_info(&format!(
            "{} backend routes, {} frontend calls, {} unused",
            analysis.stats.backend_routes,
            analysis.stats.frontend_calls,
            unused.len()
        ));

        Ok(AnalysisResult {
            base_dir: self.config.base_dir.clone(),
            files_scanned: sources.total(),
            stats: analysis.stats,
            unused,
        })
    }

    /// Check if a route matches any ignored pattern.
    fn is_ignored(&self, route: &str) -> bool {
        self.ignored_patterns.iter().any(|pattern| {
            if let Some(prefix) = pattern.strip_suffix('*') {
                route.starts_with(prefix)
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                route.ends_with(suffix)
            } else {
                route == pattern || route.contains(pattern.as_str())
            }
        })
    }
}

/// Result of running route usage analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Base directory that was analyzed
    pub base_dir: PathBuf,

    /// Files read across all three roots
    pub files_scanned: usize,

    /// Reconciliation counts (before ignore patterns)
    pub stats: RouteStats,

    /// Unused routes after ignore patterns, sorted by path
    pub unused: Vec<UnusedRoute>,
}

impl AnalysisResult {
    /// Check if any unused route was found.
    pub fn has_unused(&self) -> bool {
        !self.unused.is_empty()
    }

    /// Report view for printing.
    pub fn report(&self) -> RouteReport<'_> {
        RouteReport {
            backend_routes: self.stats.backend_routes,
            frontend_calls: self.stats.frontend_calls,
            unused: &self.unused,
        }
    }

    /// Percentage of backend routes without a caller.
    pub fn unused_percentage(&self) -> f64 {
        if self.stats.backend_routes == 0 {
            0.0
        } else {
            (self.unused.len() as f64 / self.stats.backend_routes as f64) * 100.0
        }
    }
}
