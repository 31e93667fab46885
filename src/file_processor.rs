//! File discovery and per-file processing for the CLI.

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{Config, SourceDialect};
use crate::fix_coordinator::FixCoordinator;
use crate::rule::{LintError, LintWarning, Rule};

/// Maximum fix passes per file
const MAX_FIX_ITERATIONS: usize = 100;

/// Outcome of linting (and possibly fixing) one file
#[derive(Debug, Clone, Default)]
pub struct FileResult {
    pub path: PathBuf,
    /// Warnings that remain after fixing (all warnings when not fixing)
    pub warnings: Vec<LintWarning>,
    /// Number of warnings that were resolved by fixes
    pub fixed: usize,
    /// Read, parse or write failure; the file was skipped
    pub error: Option<String>,
}

impl FileResult {
    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Result of running the linter over in-memory content
#[derive(Debug, Clone)]
pub struct ContentResult {
    /// Content after fixes (identical to the input when not fixing)
    pub content: String,
    pub warnings: Vec<LintWarning>,
    pub fixed: usize,
}

/// Compile glob patterns. A pattern without a `/` also matches at any depth,
/// so `node_modules` excludes every `node_modules` directory.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.trim().trim_start_matches("./").trim_end_matches('/');
        if pattern.is_empty() {
            continue;
        }
        builder.add(Glob::new(pattern)?);
        if !pattern.contains('/') {
            builder.add(Glob::new(&format!("**/{pattern}"))?);
        }
    }
    builder.build()
}

/// Include/exclude filter over discovered paths
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: Option<GlobSet>,
    exclude: GlobSet,
    root: Option<PathBuf>,
}

impl PathFilter {
    pub fn new(include: &[String], exclude: &[String], root: Option<PathBuf>) -> Result<Self, globset::Error> {
        let include = if include.is_empty() {
            None
        } else {
            Some(build_globset(include)?)
        };
        Ok(Self {
            include,
            exclude: build_globset(exclude)?,
            root,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, globset::Error> {
        Self::new(&config.global.include, &config.global.exclude, config.project_root.clone())
    }

    /// The spelling of `path` patterns are matched against: relative to the
    /// project root when it lies below it, else as given without a leading `./`
    fn match_path<'p>(&self, path: &'p Path) -> &'p Path {
        if let Some(root) = &self.root
            && let Ok(relative) = path.strip_prefix(root)
        {
            return relative;
        }
        path.strip_prefix(".").unwrap_or(path)
    }

    /// The path, or one of its ancestors, matches an exclude pattern
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.match_path(path)
            .ancestors()
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .any(|ancestor| self.exclude.is_match(ancestor))
    }

    /// No include patterns, or the file matches one of them
    pub fn is_included(&self, path: &Path) -> bool {
        match &self.include {
            None => true,
            Some(include) => include.is_match(self.match_path(path)),
        }
    }
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SourceDialect::from_extension(ext).is_some())
}

/// Collect the files to lint from the given paths.
///
/// Directories are walked (honoring `.gitignore` when `respect_gitignore` is
/// set) and only files with a JavaScript or TypeScript extension are kept.
/// Files named explicitly are linted regardless of their extension. Exclude
/// patterns apply to both.
pub fn find_source_files(
    paths: &[String],
    filter: &PathFilter,
    respect_gitignore: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let paths: Vec<String> = if paths.is_empty() {
        vec![".".to_string()]
    } else {
        paths.to_vec()
    };

    let mut files = Vec::new();
    for path_str in &paths {
        let path = Path::new(path_str);
        if !path.exists() {
            anyhow::bail!("File or directory not found: {path_str}");
        }

        if path.is_file() {
            if filter.is_excluded(path) {
                log::debug!("Skipping excluded file {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
            continue;
        }

        let walk_filter = filter.clone();
        let walker = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(respect_gitignore)
            .git_global(respect_gitignore)
            .git_exclude(respect_gitignore)
            .ignore(respect_gitignore)
            .require_git(false)
            .filter_entry(move |entry| entry.depth() == 0 || !walk_filter.is_excluded(entry.path()))
            .build();

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {path_str}"))?;
            let entry_path = entry.path();
            if !entry.file_type().is_some_and(|ft| ft.is_file()) || !has_source_extension(entry_path) {
                continue;
            }
            if filter.is_included(entry_path) {
                files.push(entry_path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    log::debug!("Found {} file(s) to lint", files.len());
    Ok(files)
}

/// Lint in-memory content, optionally fixing it until it converges.
pub fn process_content(
    content: &str,
    rules: &[Box<dyn Rule>],
    config: &Config,
    file_path: Option<&Path>,
    fix: bool,
) -> Result<ContentResult, LintError> {
    let dialect = file_path
        .map(|p| config.get_dialect_for_file(p))
        .unwrap_or_else(|| config.global.dialect.unwrap_or_default());
    let source_file = file_path.map(Path::to_path_buf);

    let warnings = crate::lint_file(content, rules, false, dialect, source_file.clone(), Some(config))?;
    if !fix || !warnings.iter().any(|w| w.fix.is_some()) {
        return Ok(ContentResult {
            content: content.to_string(),
            warnings,
            fixed: 0,
        });
    }

    let mut fixed_content = content.to_string();
    let result = FixCoordinator::new()
        .apply_fixes_iterative(rules, &mut fixed_content, config, MAX_FIX_ITERATIONS, file_path)
        .map_err(LintError::FixFailed)?;
    if !result.converged {
        log::warn!(
            "Fixes did not converge after {} iteration(s){}",
            result.iterations,
            file_path.map(|p| format!(" for {}", p.display())).unwrap_or_default()
        );
    }

    let remaining = crate::lint_file(&fixed_content, rules, false, dialect, source_file, Some(config))?;
    Ok(ContentResult {
        content: fixed_content,
        fixed: warnings.len().saturating_sub(remaining.len()),
        warnings: remaining,
    })
}

/// Lint one file from disk, writing it back when fixes changed it
pub fn process_file(path: &Path, rules: &[Box<dyn Rule>], config: &Config, fix: bool) -> FileResult {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return FileResult::failed(path, format!("Failed to read file: {e}")),
    };

    let result = match process_content(&content, rules, config, Some(path), fix) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            return FileResult::failed(path, e.to_string());
        }
    };

    if result.content != content
        && let Err(e) = fs::write(path, &result.content)
    {
        return FileResult::failed(path, format!("Failed to write file: {e}"));
    }

    FileResult {
        path: path.to_path_buf(),
        warnings: result.warnings,
        fixed: result.fixed,
        error: None,
    }
}

/// Process every file, in parallel when the `parallel` feature is enabled.
/// Results keep the order of `files`.
pub fn process_files(files: &[PathBuf], rules: &[Box<dyn Rule>], config: &Config, fix: bool) -> Vec<FileResult> {
    #[cfg(feature = "parallel")]
    {
        files
            .par_iter()
            .map(|path| process_file(path, rules, config, fix))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        files.iter().map(|path| process_file(path, rules, config, fix)).collect()
    }
}

/// Convert a file path to a display-friendly path relative to the project root,
/// falling back to the working directory, then to the path as given.
pub fn to_display_path(file_path: &str, project_root: Option<&Path>) -> String {
    let path = Path::new(file_path);
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    let bases = project_root
        .map(Path::to_path_buf)
        .into_iter()
        .chain(std::env::current_dir().ok());
    for base in bases {
        let base = base.canonicalize().unwrap_or(base);
        if let Ok(relative) = canonical.strip_prefix(&base)
            && !relative.as_os_str().is_empty()
        {
            return relative.to_string_lossy().to_string();
        }
    }

    file_path.strip_prefix("./").unwrap_or(file_path).to_string()
}
