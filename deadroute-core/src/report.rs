//! Output formatting - plaintext and JSON.

use serde::Serialize;
use std::fmt::Write as _;

use crate::routes::UnusedRoute;

/// Counts and unused routes of one run, as printed.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport<'a> {
    pub backend_routes: usize,
    pub frontend_calls: usize,
    pub unused: &'a [UnusedRoute],
}

/// Renders the plain-text report.
///
/// ```text
/// Found 3 backend routes.
/// Found 2 frontend/redirect calls.
/// Potential unused routes (1):
/// /api/v1/admin/stats  [AdminController.kt]
/// ```
pub fn render_plain(report: &RouteReport<'_>) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "Found {} backend routes.", report.backend_routes);
    let _ = writeln!(out, "Found {} frontend/redirect calls.", report.frontend_calls);
    let _ = writeln!(out, "Potential unused routes ({}):", report.unused.len());
    for route in report.unused {
        let _ = writeln!(out, "{}  [{}]", route.path, route.file_name());
    }
    out
}

/// Prints the plain-text report to stdout.
pub fn print_plain(report: &RouteReport<'_>) {
    print!("{}", render_plain(report));
}

/// Renders the report as pretty JSON with a generation timestamp.
pub fn render_json(report: &RouteReport<'_>) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Envelope<'r, 'a> {
        generated_at: String,
        #[serde(flatten)]
        report: &'r RouteReport<'a>,
    }

    serde_json::to_string_pretty(&Envelope {
        generated_at: chrono::Utc::now().to_rfc3339(),
        report,
    })
}

/// Prints the report in JSON format.
///
/// Falls back to the plain report on stderr if serialization fails
/// (non UTF-8 file paths).
pub fn print_json(report: &RouteReport<'_>) {
    match render_json(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            eprint!("{}", render_plain(report));
        }
    }
}
