//! Sequential file discovery for the three source roots.
//!
//! Files are returned in directory-walk order. That order decides which
//! declaration wins when two backend routes normalize to the same path, so
//! the walk is never sorted or parallelized here.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// The kinds of source file the analyzer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Server-side controllers declaring routes (and issuing redirects).
    Backend,
    /// Server-rendered HTML templates.
    Markup,
    /// Browser scripts.
    Script,
}

impl SourceKind {
    /// File-name suffix, including the dot.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Backend => ".kt",
            Self::Markup => ".html",
            Self::Script => ".js",
        }
    }

    /// Classify a path by its file-name suffix.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        [Self::Backend, Self::Markup, Self::Script]
            .into_iter()
            .find(|kind| name.ends_with(kind.suffix()))
    }
}

/// Gathers every file below `root` whose name ends with `kind`'s suffix.
///
/// Hidden and nested directories are included. A root that is missing or
/// is not a directory yields an empty list. Subtrees that cannot be read
/// are skipped with a warning and the walk continues.
pub fn gather_files(root: &Path, kind: SourceKind) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let suffix = kind.suffix();
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let at = e.path().unwrap_or(root);
                warn!(path = %at.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches && path.is_file() {
            files.push(path.to_path_buf());
        }
    }

    files
}

/// Files discovered under the three configured roots.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredSources {
    pub backend: Vec<PathBuf>,
    pub markup: Vec<PathBuf>,
    pub script: Vec<PathBuf>,
}

impl DiscoveredSources {
    /// Frontend extraction input: markup, then backend (redirect scan), then scripts.
    pub fn frontend_inputs(&self) -> Vec<PathBuf> {
        self.markup
            .iter()
            .chain(&self.backend)
            .chain(&self.script)
            .cloned()
            .collect()
    }

    pub fn total(&self) -> usize {
        self.backend.len() + self.markup.len() + self.script.len()
    }
}

/// Gathers all three roots.
pub fn discover_sources(
    backend_root: &Path,
    templates_root: &Path,
    scripts_root: &Path,
) -> DiscoveredSources {
    DiscoveredSources {
        backend: gather_files(backend_root, SourceKind::Backend),
        markup: gather_files(templates_root, SourceKind::Markup),
        script: gather_files(scripts_root, SourceKind::Script),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_tree(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("deadroute_scan_{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }

        // root/
        //   UserController.kt
        //   notes.txt
        //   .hidden/Secret.kt
        //   admin/deep/AdminController.kt
        //   admin/index.html
        let hidden = dir.join(".hidden");
        let deep = dir.join("admin").join("deep");
        fs::create_dir_all(&hidden).unwrap();
        fs::create_dir_all(&deep).unwrap();

        fs::write(dir.join("UserController.kt"), "class A").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();
        fs::write(hidden.join("Secret.kt"), "class B").unwrap();
        fs::write(deep.join("AdminController.kt"), "class C").unwrap();
        fs::write(dir.join("admin").join("index.html"), "<a></a>").unwrap();

        dir
    }

    #[test]
    fn test_gather_recursive_including_hidden() {
        let dir = create_test_tree("recursive");
        let mut names: Vec<String> = gather_files(&dir, SourceKind::Backend)
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["AdminController.kt", "Secret.kt", "UserController.kt"]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_returns_full_paths() {
        let dir = create_test_tree("fullpath");
        let html = gather_files(&dir, SourceKind::Markup);
        assert_eq!(html, vec![dir.join("admin").join("index.html")]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_root_is_empty() {
        let missing = std::env::temp_dir().join("deadroute_scan_does_not_exist_at_all");
        assert!(gather_files(&missing, SourceKind::Script).is_empty());
    }

    #[test]
    fn test_file_root_is_empty() {
        let dir = create_test_tree("fileroot");
        let file_root = dir.join("UserController.kt");
        assert!(gather_files(&file_root, SourceKind::Backend).is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_test_tree("locked");
        let locked = dir.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("B.kt"), "class B").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let files = gather_files(&dir, SourceKind::Backend);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        // readable siblings are still found; B.kt only shows up when running as root
        assert!(files.contains(&dir.join("UserController.kt")));
        assert!(files.contains(&dir.join("admin").join("deep").join("AdminController.kt")));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_source_kind_from_path() {
        assert_eq!(SourceKind::from_path(Path::new("a/B.kt")), Some(SourceKind::Backend));
        assert_eq!(SourceKind::from_path(Path::new("index.html")), Some(SourceKind::Markup));
        assert_eq!(SourceKind::from_path(Path::new("app.js")), Some(SourceKind::Script));
        assert_eq!(SourceKind::from_path(Path::new("style.css")), None);
    }
}
