//! Route usage analysis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │ route_extractor.rs  │     │  call_extractor.rs  │
//! │  ─────────────────  │     │  ─────────────────  │
//! │  Mapping annotations│     │  hrefs, literals,   │
//! │  in controllers     │     │  redirects          │
//! └──────────┬──────────┘     └──────────┬──────────┘
//!            │                           │
//!            └───────────┬───────────────┘
//!                        ▼
//!            ┌─────────────────────┐
//!            │   route_graph.rs    │
//!            │  ─────────────────  │
//!            │  Exact + pattern    │
//!            │  match, find unused │
//!            └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use deadroute_core::routes::RouteGraph;
//!
//! let graph = RouteGraph::from_sources(&[
//!     ("UserController.kt", controller_src),
//!     ("users.html", template_src),
//! ]);
//! for unused in graph.analyze().unused {
//!     println!("{}  [{}]", unused.path, unused.file_name());
//! }
//! ```

pub mod call_extractor;
pub mod route_extractor;
pub mod route_graph;

pub use call_extractor::{
    extract_attribute_calls, extract_calls, extract_calls_from_file, extract_frontend_calls,
    extract_redirect_calls, extract_script_calls, CallExtractionResult, FrontendCalls,
};
pub use route_extractor::{
    extract_backend_routes, extract_routes, extract_routes_from_file, strip_comment_lines,
    BackendRoutes, RouteDef, RouteExtractionResult, StrippedSource,
};
pub use route_graph::{
    RouteAnalysisResult, RouteGraph, RouteMatcher, RouteStats, RouteUsage, UnusedRoute,
};
