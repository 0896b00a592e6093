//! Directory walk and header containment check.
//!
//! The walk is single-threaded. Each candidate is read fully into memory and
//! the handle is closed before the next entry is visited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{AuditError, Result};
use crate::models::{AuditReport, SkippedEntry, UnreadablePolicy};
use crate::template::LicenseTemplate;

/// Everything an audit needs besides the root path.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Literal, case-sensitive file name suffix (e.g. `.java`).
    pub extension: String,
    pub template: LicenseTemplate,
    pub on_unreadable: UnreadablePolicy,
    /// Matched against root-relative paths with `/` separators. Directories
    /// are matched with a trailing `/` so `^target/` prunes `target`.
    pub exclude: Vec<Regex>,
}

impl AuditOptions {
    pub fn new(extension: impl Into<String>, template: LicenseTemplate) -> Self {
        AuditOptions {
            extension: extension.into(),
            template,
            on_unreadable: UnreadablePolicy::default(),
            exclude: Vec::new(),
        }
    }

    pub fn on_unreadable(mut self, policy: UnreadablePolicy) -> Self {
        self.on_unreadable = policy;
        self
    }

    pub fn exclude(mut self, patterns: Vec<Regex>) -> Self {
        self.exclude = patterns;
        self
    }
}

/// Return every file under `root` whose name ends with `extension` and whose
/// content does not contain `template`.
///
/// Unreadable candidates fail the audit; use [`audit_with`] to choose another
/// [`UnreadablePolicy`].
pub fn audit(root: &Path, extension: &str, template: &LicenseTemplate) -> Result<Vec<PathBuf>> {
    let options = AuditOptions::new(extension, template.clone());
    Ok(audit_with(root, &options, |_| {})?.violations)
}

/// Run a full audit. `on_candidate` is called once per candidate file, before
/// it is read.
pub fn audit_with<F>(root: &Path, options: &AuditOptions, mut on_candidate: F) -> Result<AuditReport>
where
    F: FnMut(&Path),
{
    let metadata = fs::metadata(root).map_err(|e| AuditError::file_system(root, e))?;
    if !metadata.is_dir() {
        return Err(AuditError::file_system(
            root,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    let mut report = AuditReport::new(root.to_path_buf(), options.extension.clone());

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(root, entry, &options.exclude));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // The root itself must always be readable.
                let at_root = err.depth() == 0;
                let AuditError::FileSystem { path, source } = AuditError::from(err);
                if at_root {
                    return Err(AuditError::file_system(root, source));
                }
                handle_unreadable(options.on_unreadable, &mut report, path, source)?;
                continue;
            }
        };

        match classify(&entry, &options.extension) {
            Candidate::File => {}
            Candidate::Ignored => continue,
            Candidate::Unreadable(source) => {
                handle_unreadable(options.on_unreadable, &mut report, entry.into_path(), source)?;
                continue;
            }
        }

        on_candidate(entry.path());

        match file_contains_template(entry.path(), &options.template) {
            Ok(true) => {
                debug!(path = %entry.path().display(), "header present");
                report.scanned += 1;
            }
            Ok(false) => {
                debug!(path = %entry.path().display(), "header missing");
                report.scanned += 1;
                report.violations.push(entry.into_path());
            }
            Err(source) => {
                handle_unreadable(options.on_unreadable, &mut report, entry.into_path(), source)?;
            }
        }
    }

    Ok(report)
}

/// Read `path` as UTF-8 and test it for the template. Non-UTF-8 content is an
/// [`io::ErrorKind::InvalidData`] error.
pub fn file_contains_template(path: &Path, template: &LicenseTemplate) -> io::Result<bool> {
    let content = fs::read_to_string(path)?;
    Ok(template.is_contained_in(&content))
}

fn handle_unreadable(
    policy: UnreadablePolicy,
    report: &mut AuditReport,
    path: PathBuf,
    source: io::Error,
) -> Result<()> {
    match policy {
        UnreadablePolicy::Fail => Err(AuditError::file_system(path, source)),
        UnreadablePolicy::Skip => {
            warn!(path = %path.display(), error = %source, "skipping unreadable entry");
            report.skipped.push(SkippedEntry {
                path,
                reason: source.to_string(),
            });
            Ok(())
        }
    }
}

enum Candidate {
    File,
    Ignored,
    Unreadable(io::Error),
}

/// Only regular files, or symlinks resolving to one, are read. FIFOs, sockets
/// and device nodes would block or fail on read and are ignored.
fn classify(entry: &DirEntry, extension: &str) -> Candidate {
    let file_type = entry.file_type();
    if file_type.is_dir() || !entry.file_name().to_string_lossy().ends_with(extension) {
        return Candidate::Ignored;
    }
    if file_type.is_file() {
        return Candidate::File;
    }
    if entry.path_is_symlink() {
        return match fs::metadata(entry.path()) {
            Ok(target) if target.is_file() => Candidate::File,
            Ok(_) => Candidate::Ignored,
            Err(source) => Candidate::Unreadable(source),
        };
    }
    debug!(path = %entry.path().display(), "ignoring non-regular file");
    Candidate::Ignored
}

fn is_excluded(root: &Path, entry: &DirEntry, patterns: &[Regex]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let Ok(relative) = entry.path().strip_prefix(root) else {
        return false;
    };
    let mut key = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if entry.file_type().is_dir() {
        key.push('/');
    }
    patterns.iter().any(|re| re.is_match(&key))
}
