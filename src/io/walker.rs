use crate::config::MsortConfig;
use crate::errors::{Error, Result};
use glob::Pattern;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Which files the walker hands to the sorter.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    skip_tests: bool,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            skip_tests: true,
        }
    }
}

impl FileFilter {
    pub fn from_config(config: &MsortConfig) -> Result<Self> {
        let compile = |patterns: &[String]| -> Result<Vec<Pattern>> {
            patterns
                .iter()
                .map(|p| Pattern::new(p).map_err(Error::from))
                .collect()
        };
        Ok(Self {
            include: compile(&config.include)?,
            exclude: compile(&config.exclude)?,
            skip_tests: config.skip_tests,
        })
    }

    /// `.go` files, minus tests when skipped, that match an include pattern
    /// (by file name) and no exclude pattern (by file name or path).
    pub fn should_process(&self, path: &Path) -> bool {
        if path.extension().and_then(|ext| ext.to_str()) != Some("go") {
            return false;
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        if self.skip_tests && file_name.ends_with("_test.go") {
            return false;
        }

        if !self.include.is_empty() && !self.include.iter().any(|p| p.matches(&file_name)) {
            return false;
        }

        let path_str = path.to_string_lossy();
        let path_str = path_str.strip_prefix("./").unwrap_or(&path_str);
        !self
            .exclude
            .iter()
            .any(|p| p.matches(&file_name) || p.matches(path_str))
    }
}

pub struct FileWalker {
    root: PathBuf,
    recursive: bool,
    filter: FileFilter,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            recursive: true,
            filter: FileFilter::default(),
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Eligible files under the root, sorted. Hidden entries are skipped and
    /// `.gitignore` is honoured.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut builder = WalkBuilder::new(&self.root);
        builder.hidden(true).git_ignore(true).require_git(false);
        if !self.recursive {
            builder.max_depth(Some(1));
        }

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|e| Error::FileSystem {
                message: format!("Failed to walk {}: {}", self.root.display(), e),
                path: Some(self.root.clone()),
                source: None,
            })?;
            let path = entry.path();
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && self.filter.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Expand command line paths into the files to process. Directories are
/// walked; explicit files are kept when they pass the filter.
pub fn collect_files(
    paths: &[PathBuf],
    recursive: bool,
    filter: &FileFilter,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let metadata = std::fs::metadata(path)
            .map_err(|e| Error::file_system("Failed to access path", path, e))?;
        if metadata.is_dir() {
            let walked = FileWalker::new(path.clone())
                .with_recursive(recursive)
                .with_filter(filter.clone())
                .walk()?;
            log::debug!("{}: {} Go files", path.display(), walked.len());
            files.extend(walked);
        } else if filter.should_process(path) {
            files.push(path.clone());
        } else {
            log::debug!("Skipping {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Go's marker for generated files: a line `// Code generated ... DO NOT EDIT.`
/// before the package clause.
pub fn is_generated(source: &str) -> bool {
    source
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .take_while(|line| !line.starts_with("package "))
        .any(|line| line.starts_with("// Code generated ") && line.ends_with(" DO NOT EDIT."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "package a\n").unwrap();
        path
    }

    fn default_filter() -> FileFilter {
        FileFilter::from_config(&MsortConfig::default()).unwrap()
    }

    #[test]
    fn test_walk_skips_tests_hidden_and_other_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let main = touch(root, "main.go");
        touch(root, "main_test.go");
        touch(root, "README.md");
        touch(root, ".hidden/x.go");
        let nested = touch(root, "pkg/server.go");

        let files = FileWalker::new(root.to_path_buf())
            .with_filter(default_filter())
            .walk()
            .unwrap();
        assert_eq!(files, vec![main, nested]);
    }

    #[test]
    fn test_non_recursive_walk_stays_at_top_level() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let main = touch(root, "main.go");
        touch(root, "pkg/server.go");

        let files = FileWalker::new(root.to_path_buf())
            .with_recursive(false)
            .with_filter(default_filter())
            .walk()
            .unwrap();
        assert_eq!(files, vec![main]);
    }

    #[test]
    fn test_exclude_patterns_match_names_and_paths() {
        let mut config = MsortConfig::default();
        config.exclude = vec!["*_gen.go".into(), "vendor/*".into()];
        let filter = FileFilter::from_config(&config).unwrap();

        assert!(filter.should_process(Path::new("server.go")));
        assert!(!filter.should_process(Path::new("model_gen.go")));
        assert!(!filter.should_process(Path::new("vendor/lib.go")));
        assert!(!filter.should_process(Path::new("./vendor/lib.go")));
    }

    #[test]
    fn test_tests_included_when_not_skipped() {
        let mut config = MsortConfig::default();
        config.skip_tests = false;
        let filter = FileFilter::from_config(&config).unwrap();
        assert!(filter.should_process(Path::new("a_test.go")));
    }

    #[test]
    fn test_collect_files_handles_explicit_files() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "one.go");
        let test_file = touch(dir.path(), "one_test.go");

        let files = collect_files(&[file.clone(), test_file], true, &default_filter()).unwrap();
        assert_eq!(files, vec![file]);

        let missing = collect_files(&[dir.path().join("nope.go")], true, &default_filter());
        assert!(matches!(missing, Err(Error::FileSystem { .. })));
    }

    #[test]
    fn test_generated_marker() {
        assert!(is_generated(
            "// Code generated by protoc-gen-go. DO NOT EDIT.\n\npackage pb\n"
        ));
        assert!(is_generated(
            "// Code generated by stringer. DO NOT EDIT.\r\npackage a\r\n"
        ));
        assert!(!is_generated("package a\n\n// Code generated by x. DO NOT EDIT.\n"));
        assert!(!is_generated("// Code generated by hand\npackage a\n"));
    }
}
