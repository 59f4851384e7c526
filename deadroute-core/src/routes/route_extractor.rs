//! Backend route extraction from controller sources.
//!
//! Recognizes Spring-style mapping annotations:
//! - one class-level `@RequestMapping("/prefix")` per file
//! - method-level `@GetMapping`, `@PostMapping`, `@PutMapping`,
//!   `@DeleteMapping`, `@PatchMapping` and `@RequestMapping`, with an
//!   optional `"path"` or `value = "path"` argument
//!
//! Lines whose first non-blank characters are `//` are removed before any
//! matching, so commented-out handlers never produce routes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use crate::error::{DeadrouteResult, IoResultExt};
use crate::normalize::RoutePath;

fn class_mapping_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"@RequestMapping\s*\(\s*(?:value\s*=\s*)?"([^"]+)""#)
            .expect("Hardcoded regex pattern is valid")
    })
}

fn method_mapping_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"@(Get|Post|Put|Delete|Patch|Request)Mapping\s*(?:\(\s*(?:value\s*=\s*)?"([^"]+)"|\(\s*"([^"]+)")?"#,
        )
        .expect("Hardcoded regex pattern is valid")
    })
}

/// Source text with comment lines removed, remembering where each kept
/// line came from.
#[derive(Debug, Clone, Default)]
pub struct StrippedSource {
    pub text: String,
    /// `(offset in text, 1-based original line)` for each kept line.
    line_starts: Vec<(usize, usize)>,
}

impl StrippedSource {
    /// Original 1-based line number of a byte offset in `text`.
    pub fn line_at(&self, offset: usize) -> usize {
        let idx = self.line_starts.partition_point(|(start, _)| *start <= offset);
        idx.checked_sub(1)
            .and_then(|i| self.line_starts.get(i))
            .map_or(1, |(_, line)| *line)
    }
}

/// Drops every line whose trimmed content starts with `//`.
pub fn strip_comment_lines(content: &str) -> StrippedSource {
    let mut out = StrippedSource {
        text: String::with_capacity(content.len()),
        line_starts: Vec::new(),
    };

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        if line.trim().starts_with("//") {
            continue;
        }
        out.line_starts.push((out.text.len(), idx + 1));
        out.text.push_str(line);
    }

    out
}

/// A route declared by a backend handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    /// Normalized route path
    pub path: RoutePath,
    /// Declaring file
    pub file: PathBuf,
    /// Line of the method-level annotation (1-indexed)
    pub line: usize,
}

/// Routes found in one file, in source order.
#[derive(Debug, Clone, Default)]
pub struct RouteExtractionResult {
    /// Class-level prefix with any trailing `/` removed
    pub class_prefix: Option<String>,
    pub routes: Vec<RouteDef>,
}

/// Extract route declarations from file content.
///
/// Never fails: a file without annotations contributes no routes.
pub fn extract_routes(path: &Path, content: &str) -> RouteExtractionResult {
    let source = strip_comment_lines(content);
    let text = source.text.as_str();

    let (class_prefix, class_span) = match class_mapping_regex().captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| (m.start(), m.end()));
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let prefix = prefix.strip_suffix('/').unwrap_or(prefix).to_string();
            (Some(prefix), whole)
        }
        None => (None, None),
    };
    let base = class_prefix.as_deref().unwrap_or("");

    let mut routes = Vec::new();
    for caps in method_mapping_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if Some((whole.start(), whole.end())) == class_span {
            continue;
        }

        let method_path = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        let joined = format!("{}{}", base, method_path);

        routes.push(RouteDef {
            path: RoutePath::from_declaration(&joined),
            file: path.to_path_buf(),
            line: source.line_at(whole.start()),
        });
    }

    debug!(file = %path.display(), routes = routes.len(), "extracted backend routes");

    RouteExtractionResult {
        class_prefix,
        routes,
    }
}

/// Read a file and extract its route declarations.
pub fn extract_routes_from_file(path: &Path) -> DeadrouteResult<RouteExtractionResult> {
    let content = fs::read_to_string(path).with_path(path)?;
    Ok(extract_routes(path, &content))
}

/// Normalized route path to its declaration.
///
/// When two declarations normalize to the same path, the one merged last
/// wins.
#[derive(Debug, Clone, Default)]
pub struct BackendRoutes {
    routes: HashMap<RoutePath, RouteDef>,
}

impl BackendRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's routes, overwriting earlier declarations of the same path.
    pub fn merge(&mut self, result: RouteExtractionResult) {
        for route in result.routes {
            self.routes.insert(route.path.clone(), route);
        }
    }

    pub fn get(&self, path: &str) -> Option<&RouteDef> {
        self.routes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoutePath, &RouteDef)> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Extract backend routes from every file, merging in the given order.
///
/// With `parallel`, files are read and parsed on the rayon pool; merging
/// still follows `files` order so the result is identical.
pub fn extract_backend_routes(files: &[PathBuf], parallel: bool) -> DeadrouteResult<BackendRoutes> {
    let results: Vec<RouteExtractionResult> = if parallel {
        files
            .par_iter()
            .map(|f| extract_routes_from_file(f))
            .collect::<DeadrouteResult<_>>()?
    } else {
        files
            .iter()
            .map(|f| extract_routes_from_file(f))
            .collect::<DeadrouteResult<_>>()?
    };

    let mut routes = BackendRoutes::new();
    for result in results {
        routes.merge(result);
    }
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(content: &str) -> Vec<String> {
        extract_routes(Path::new("UserController.kt"), content)
            .routes
            .into_iter()
            .map(|r| r.path.into_string())
            .collect()
    }

    #[test]
    fn test_class_prefix_and_method_paths() {
        let content = r#"
@Controller
@RequestMapping("/api/v1/")
class UserController {
    @GetMapping("/users")
    fun list() = ""

    @PostMapping(value = "/users/{id}")
    fun update() = ""
}
"#;
        let result = extract_routes(Path::new("UserController.kt"), content);
        assert_eq!(result.class_prefix.as_deref(), Some("/api/v1"));
        let found: Vec<&str> = result.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(found, vec!["/api/v1/users", "/api/v1/users/{var}"]);
    }

    #[test]
    fn test_class_declaration_not_counted_as_method_route() {
        let content = r#"
@RequestMapping("/admin")
class AdminController {
    @GetMapping
    fun index() = ""
}
"#;
        // one route from the bare @GetMapping, none from the class annotation
        assert_eq!(paths(content), vec!["/admin"]);
    }

    #[test]
    fn test_method_request_mapping_after_class() {
        let content = r#"
@RequestMapping("/reports")
class ReportController {
    @RequestMapping("/export")
    fun export() = ""
}
"#;
        assert_eq!(paths(content), vec!["/reports/export"]);
    }

    #[test]
    fn test_first_method_request_mapping_becomes_prefix() {
        // without a class annotation, the first @RequestMapping with a path
        // is taken as the prefix and not counted as a route of its own
        let content = r#"
class ExportController {
    @RequestMapping("/export")
    fun export() = ""

    @GetMapping("/csv")
    fun csv() = ""
}
"#;
        let result = extract_routes(Path::new("B.kt"), content);
        assert_eq!(result.class_prefix.as_deref(), Some("/export"));
        let found: Vec<&str> = result.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(found, vec!["/export/csv"]);
    }

    #[test]
    fn test_no_class_prefix() {
        let content = r#"
class Home {
    @GetMapping("dashboard/")
    fun dash() = ""
    @DeleteMapping
    fun root() = ""
}
"#;
        assert_eq!(paths(content), vec!["/dashboard", "/"]);
    }

    #[test]
    fn test_commented_annotations_are_ignored() {
        let content = r#"
@RequestMapping("/api")
class C {
    // @GetMapping("/legacy")
    @GetMapping("/live")
    fun live() = ""
      //@PatchMapping("/old/{id}")
}
"#;
        assert_eq!(paths(content), vec!["/api/live"]);
    }

    #[test]
    fn test_commented_class_mapping_is_ignored() {
        let content = "// @RequestMapping(\"/old\")\nclass C {\n    @GetMapping(\"/x\")\n    fun x() = \"\"\n}\n";
        let result = extract_routes(Path::new("C.kt"), content);
        assert!(result.class_prefix.is_none());
        assert_eq!(result.routes[0].path.as_str(), "/x");
    }

    #[test]
    fn test_line_numbers_survive_comment_stripping() {
        let content = "// header\n// more\n@RequestMapping(\"/a\")\nclass C {\n    @GetMapping(\"/b\")\n    fun b() = \"\"\n}\n";
        let result = extract_routes(Path::new("C.kt"), content);
        assert_eq!(result.routes.len(), 1);
        assert_eq!(result.routes[0].line, 5);
    }

    #[test]
    fn test_empty_string_argument_means_no_path() {
        let content = r#"
@RequestMapping("/")
class PublicController {
    @GetMapping("")
    fun home() = ""
    @GetMapping("/{slug}")
    fun school() = ""
}
"#;
        assert_eq!(paths(content), vec!["/", "/{var}"]);
    }

    #[test]
    fn test_file_without_annotations() {
        let result = extract_routes(Path::new("Service.kt"), "class Service { fun run() {} }");
        assert!(result.routes.is_empty());
        assert!(result.class_prefix.is_none());
    }

    #[test]
    fn test_merge_last_write_wins() {
        let first = extract_routes(Path::new("A.kt"), "@GetMapping(\"/dup\")");
        let second = extract_routes(Path::new("B.kt"), "@PostMapping(\"/dup/\")");

        let mut routes = BackendRoutes::new();
        routes.merge(first);
        routes.merge(second);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes.get("/dup").unwrap().file, PathBuf::from("B.kt"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let content =
            "@RequestMapping(\"/x\")\nclass X {\n @GetMapping(\"/{a}\")\n fun a() = \"\"\n}";
        let first = extract_routes(Path::new("X.kt"), content);
        let second = extract_routes(Path::new("X.kt"), content);
        assert_eq!(first.routes, second.routes);
    }

    #[test]
    fn test_strip_comment_lines_line_map() {
        let stripped = strip_comment_lines("a\n  // b\nc\n");
        assert_eq!(stripped.text, "a\nc\n");
        assert_eq!(stripped.line_at(0), 1);
        assert_eq!(stripped.line_at(2), 3);
    }
}
