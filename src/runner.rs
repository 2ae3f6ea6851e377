//! Runs extraction over a set of files.
//!
//! Each file gets its own parser, extractor and [`CollectingSink`]; nothing
//! is shared between files. Files may be processed in parallel, but results
//! are always ordered by path so the report does not depend on scheduling.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::FileError;
use crate::listener::extract;
use crate::records::Declaration;
use crate::sink::CollectingSink;
use crate::syntax::parse;

/// Outcome of one file.
#[derive(Debug)]
pub struct FileExtraction {
    /// Path relative to the scan root, with `/` separators.
    pub path: String,
    /// Source text, kept for the trace report. Empty if the file was unreadable.
    pub source: String,
    /// Records in document order, or the fault that aborted the file.
    pub outcome: Result<Vec<Declaration>, FileError>,
}

impl FileExtraction {
    pub fn declarations(&self) -> &[Declaration] {
        match &self.outcome {
            Ok(records) => records,
            Err(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&FileError> {
        self.outcome.as_ref().err()
    }
}

/// Per-file outcomes sorted by path.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub files: Vec<FileExtraction>,
}

impl ExtractionResult {
    pub fn scanned(&self) -> usize {
        self.files.len()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileError> {
        self.files.iter().filter_map(FileExtraction::error)
    }

    pub fn declaration_count(&self) -> usize {
        self.files.iter().map(|f| f.declarations().len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Executes extraction against a set of files.
pub struct Runner {
    base_dir: PathBuf,
    parallel: bool,
}

impl Runner {
    /// Create a runner whose reported paths are relative to `base_dir`.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            parallel: true,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Extract every file. Failures are recorded per file; the run continues.
    pub fn run(&self, files: &[PathBuf]) -> ExtractionResult {
        info!(
            files = files.len(),
            parallel = self.parallel,
            "extracting declarations"
        );

        let mut extracted: Vec<FileExtraction> = if self.parallel {
            files.par_iter().map(|p| self.extract_file(p)).collect()
        } else {
            files.iter().map(|p| self.extract_file(p)).collect()
        };
        extracted.sort_by(|a, b| a.path.cmp(&b.path));

        let result = ExtractionResult { files: extracted };
        info!(
            scanned = result.scanned(),
            failed = result.failed(),
            declarations = result.declaration_count(),
            "extraction finished"
        );
        result
    }

    /// Read, parse and extract a single file.
    pub fn extract_file(&self, path: &Path) -> FileExtraction {
        let rel_path = self.relative_path(path);
        debug!(path = %rel_path, "extracting file");

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                let err = FileError::new(rel_path.clone(), e);
                warn!("{}", err);
                return FileExtraction {
                    path: rel_path,
                    source: String::new(),
                    outcome: Err(err),
                };
            }
        };

        let outcome = extract_source(&rel_path, &source);
        match &outcome {
            Ok(records) => debug!(path = %rel_path, records = records.len(), "file done"),
            Err(err) => warn!("{}", err),
        }

        FileExtraction {
            path: rel_path,
            source,
            outcome,
        }
    }

    fn relative_path(&self, path: &Path) -> String {
        relative_path(path, &self.base_dir)
    }
}

/// Parse `source` and extract its declarations. `path` only names the file
/// in errors.
pub fn extract_source(path: &str, source: &str) -> Result<Vec<Declaration>, FileError> {
    let tree = parse(source).map_err(|e| FileError::new(path, e))?;
    let sink = extract(&tree, CollectingSink::new()).map_err(|e| FileError::new(path, e))?;
    Ok(sink.into_records())
}

/// Collect source files under `root`.
///
/// A file root is returned as-is. Directories are walked recursively,
/// skipping hidden directories, and filtered by the configured extensions
/// and exclusion globs. The result is sorted.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let exclusions = config.exclusions()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden directories, but never the root itself
            let hidden = e.file_name().to_string_lossy().starts_with('.');
            !(e.depth() > 0 && e.file_type().is_dir() && hidden)
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !config.has_source_extension(entry.path()) {
            continue;
        }

        let rel = relative_path(entry.path(), root);
        if exclusions.is_match(&rel) || exclusions.is_match(entry.path()) {
            debug!(path = %rel, "excluded");
            continue;
        }
        files.push(entry.path().to_path_buf());
    }

    files.sort();
    debug!(root = %root.display(), files = files.len(), "collected source files");
    Ok(files)
}

fn relative_path(file_path: &Path, base_path: &Path) -> String {
    // A single-file scan reports just the file name
    if file_path == base_path {
        return file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string_lossy().to_string());
    }

    file_path
        .strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string_lossy().to_string())
}
