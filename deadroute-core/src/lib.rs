//! deadroute-core: unused backend route detection for server-rendered web projects
//!
//! Scans controller sources for route declarations, scans templates, scripts
//! and redirects for the paths the frontend actually requests, and reports
//! routes nobody calls.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use deadroute_core::prelude::*;
//!
//! let result = Deadroute::new("/path/to/project").analyze()?;
//! print_plain(&result.report());
//! ```
//!
//! # Module Organization
//!
//! - [`scan`]: File discovery under the backend, template and script roots
//! - [`normalize`]: Canonical route paths (`{var}` placeholders, slashes)
//! - [`routes`]: Route and call extraction, reconciliation
//! - [`report`]: Plain and JSON output
//! - [`builder`]: Fluent builder API for configuration
//! - [`config`]: Directory layout and `deadroute.toml`
//! - [`error`]: Typed error handling

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod prelude;
pub mod report;
pub mod routes;
pub mod scan;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{DeadrouteError, DeadrouteResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Deadroute};

// Configuration
pub use config::{
    load_config, AnalyzerConfig, DeadrouteConfig, OutputConfig, OutputFormat, PathsConfig,
};

// Logging
pub use logging::{init_structured_logging, log_info, log_warn};

// Normalization
pub use normalize::{RoutePath, PLACEHOLDER};

// Reporting
pub use report::{print_json, print_plain, render_json, render_plain, RouteReport};

// Route analysis
pub use routes::{
    extract_backend_routes, extract_calls, extract_frontend_calls, extract_routes,
    BackendRoutes, FrontendCalls, RouteAnalysisResult, RouteDef, RouteGraph, RouteStats,
    RouteUsage, UnusedRoute,
};

// File scanning
pub use scan::{discover_sources, gather_files, DiscoveredSources, SourceKind};
