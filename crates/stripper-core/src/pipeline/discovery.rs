//! File discovery for finding eligible images under an input root.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;
use crate::error::{PipelineError, PipelineResult};

/// Walks an input tree and reports files with an eligible extension.
///
/// The root is always descended. Subdirectories are only descended when
/// `recursive` is set; otherwise their whole subtree is skipped. Eligibility
/// is decided by extension alone, the actual format is sniffed at decode time.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Walk `root` top-down, calling `visit` for each eligible file.
    ///
    /// Entries are visited in file-name order within each directory. The
    /// first filesystem error aborts the walk and is returned, as is any error
    /// returned by `visit`. Returns the number of files visited.
    pub fn walk<F>(&self, root: &Path, mut visit: F) -> PipelineResult<usize>
    where
        F: FnMut(PathBuf) -> PipelineResult<()>,
    {
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let mut visited = 0;

        for entry in WalkDir::new(root).max_depth(max_depth).sort_by_file_name() {
            let entry = entry.map_err(|e| PipelineError::Traversal {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                message: e.to_string(),
            })?;

            if is_file_or_link_to_file(&entry) && self.is_supported(entry.path()) {
                visit(entry.into_path())?;
                visited += 1;
            }
        }

        Ok(visited)
    }

    /// Collect every eligible file under `root`.
    pub fn discover(&self, root: &Path) -> PipelineResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(root, |path| {
            files.push(path);
            Ok(())
        })?;
        Ok(files)
    }

    /// Check if a file has a supported extension.
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_extensions
                    .iter()
                    .any(|fmt| fmt.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// Regular files, plus symlinks whose target is a regular file. Symlinked
/// directories are never descended.
fn is_file_or_link_to_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        for name in [
            "a.jpg",
            "b.PNG",
            "c.jpeg",
            "notes.txt",
            "noext",
            "nested/d.jpg",
            "nested/e.gif",
            "nested/deeper/f.png",
        ] {
            fs::write(root.join(name), b"not really an image").unwrap();
        }
        dir
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(!discovery.is_supported(Path::new("test.webp")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("jpg")));
    }

    #[test]
    fn test_dotted_extensions_in_config() {
        let config = ProcessingConfig {
            supported_extensions: vec![".PNG".to_string()],
            ..ProcessingConfig::default()
        };
        let discovery = FileDiscovery::new(config);
        assert!(discovery.is_supported(Path::new("x.png")));
        assert!(!discovery.is_supported(Path::new("x.jpg")));
    }

    #[test]
    fn test_non_recursive_skips_subdirectories() {
        let dir = tree();
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        let files = discovery.discover(dir.path()).unwrap();
        assert_eq!(names(dir.path(), &files), vec!["a.jpg", "b.PNG", "c.jpeg"]);
    }

    #[test]
    fn test_recursive_finds_every_depth_once() {
        let dir = tree();
        let config = ProcessingConfig {
            recursive: true,
            ..ProcessingConfig::default()
        };
        let discovery = FileDiscovery::new(config);

        let files = discovery.discover(dir.path()).unwrap();
        assert_eq!(
            names(dir.path(), &files),
            vec![
                "a.jpg",
                "b.PNG",
                "c.jpeg",
                "nested/d.jpg",
                "nested/deeper/f.png"
            ]
        );
    }

    #[test]
    fn test_missing_root_is_traversal_error() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let err = discovery
            .discover(Path::new("/nonexistent/stripper-input"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Traversal { .. }));
    }

    #[test]
    fn test_visit_error_aborts_walk() {
        let dir = tree();
        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let mut seen = 0;

        let err = discovery
            .walk(dir.path(), |_| {
                seen += 1;
                Err(PipelineError::DispatchClosed)
            })
            .unwrap_err();
        assert!(matches!(err, PipelineError::DispatchClosed));
        assert_eq!(seen, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_visited_but_linked_dirs_are_not() {
        let dir = tree();
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("a.jpg"), root.join("link.jpg")).unwrap();
        std::os::unix::fs::symlink(root.join("missing.jpg"), root.join("dangling.jpg")).unwrap();
        std::os::unix::fs::symlink(root.join("nested"), root.join("zlinked")).unwrap();
        let config = ProcessingConfig {
            recursive: true,
            ..ProcessingConfig::default()
        };

        let files = FileDiscovery::new(config).discover(root).unwrap();
        assert_eq!(
            names(root, &files),
            vec![
                "a.jpg",
                "b.PNG",
                "c.jpeg",
                "link.jpg",
                "nested/d.jpg",
                "nested/deeper/f.png"
            ]
        );
    }
}
