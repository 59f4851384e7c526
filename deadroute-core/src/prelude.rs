//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use deadroute_core::prelude::*;
//! ```

pub use crate::error::{DeadrouteError, DeadrouteResult};
pub use crate::normalize::RoutePath;

// Extraction and reconciliation
pub use crate::routes::{BackendRoutes, FrontendCalls, RouteGraph, UnusedRoute};

// File scanning
pub use crate::scan::{gather_files, SourceKind};

// Configuration
pub use crate::config::{load_config, AnalyzerConfig, DeadrouteConfig};

// Builder API
pub use crate::builder::{AnalysisResult, Deadroute};

// Output
pub use crate::report::{print_json, print_plain};
