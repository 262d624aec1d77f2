//! Folder mode: collect the headings of every markdown file under a folder.
//!
//! Subfolders are visited depth-first and their files come *before* the
//! current folder's own files, recursively. Within one folder the files are
//! ordered by a [`FolderOrdering`].

mod ordering;

pub use ordering::{FolderOrdering, sort_files};

use crate::parser::{self, HeadingRecord};
use ignore::{DirEntry, WalkBuilder};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A file taking part in folder mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub path: PathBuf,
    /// File name without directory or extension.
    pub display_name: String,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, display_name }
    }

    /// File name including its extension.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display_name.clone())
    }
}

/// A file plus the timestamps the date orderings sort on.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub file: FileRef,
    pub modified: SystemTime,
    pub created: SystemTime,
}

/// One file's contribution to folder mode.
#[derive(Debug, Clone, Serialize)]
pub struct FileHeadings {
    pub file: FileRef,
    pub headings: Vec<HeadingRecord>,
}

/// Read access to a folder tree and its heading data.
pub trait FolderSource {
    /// Direct subfolders of `folder`, in the order they should be visited.
    fn subfolders(&self, folder: &Path) -> Vec<PathBuf>;

    /// Markdown files directly inside `folder`, in listing order.
    fn files(&self, folder: &Path) -> Vec<FileEntry>;

    /// Headings of one file, line-ordered.
    fn headings(&self, file: &FileRef) -> io::Result<Vec<HeadingRecord>>;
}

/// Walk `root` and return every file's headings in folder-mode order.
///
/// A file whose headings cannot be read still takes part, with no headings.
///
/// # Arguments
///
/// * `source` - Where folders, files and headings come from
/// * `root` - Folder to start at
/// * `ordering` - Per-folder file order; `None` keeps the listing order
///
/// # Returns
///
/// One entry per markdown file, subfolders' files before each folder's own.
pub fn headings_for_folder<S: FolderSource + ?Sized>(
    source: &S,
    root: &Path,
    ordering: Option<FolderOrdering>,
) -> Vec<FileHeadings> {
    let mut collected = Vec::new();

    for sub in source.subfolders(root) {
        collected.extend(headings_for_folder(source, &sub, ordering));
    }

    let mut files = source.files(root);
    sort_files(&mut files, ordering);

    for entry in files {
        let headings = source.headings(&entry.file).unwrap_or_else(|e| {
            log::warn!("skipping headings of {}: {}", entry.file.path.display(), e);
            Vec::new()
        });
        collected.push(FileHeadings {
            file: entry.file,
            headings,
        });
    }

    log::debug!("{}: {} files", root.display(), collected.len());
    collected
}

/// [`FolderSource`] backed by the local filesystem.
///
/// Each folder is listed with a one-level `ignore` walk. Hidden entries
/// (leading `.`) are skipped, entries come back in name order, and only
/// `.md`/`.markdown` files are listed. Symlinks are never followed, so a
/// link back to an ancestor folder cannot make the walk revisit it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFolder;

impl DiskFolder {
    /// Direct children of `folder`, in file name order.
    fn entries(folder: &Path) -> Vec<DirEntry> {
        let mut builder = WalkBuilder::new(folder);
        builder
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b));

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("cannot list {}: {}", folder.display(), e);
                    None
                }
            })
            .filter(|entry| entry.depth() == 1)
            .collect()
    }

    fn is_dir(entry: &DirEntry) -> bool {
        entry.file_type().is_some_and(|t| t.is_dir())
    }

    fn is_file(entry: &DirEntry) -> bool {
        entry.file_type().is_some_and(|t| t.is_file())
    }
}

impl FolderSource for DiskFolder {
    fn subfolders(&self, folder: &Path) -> Vec<PathBuf> {
        Self::entries(folder)
            .into_iter()
            .filter(Self::is_dir)
            .map(DirEntry::into_path)
            .collect()
    }

    fn files(&self, folder: &Path) -> Vec<FileEntry> {
        Self::entries(folder)
            .into_iter()
            .filter(|entry| Self::is_file(entry) && parser::is_markdown_path(entry.path()))
            .map(|entry| {
                let meta = entry.metadata().ok();
                let modified = meta
                    .as_ref()
                    .and_then(|m| m.modified().ok())
                    .unwrap_or(UNIX_EPOCH);
                let created = meta
                    .as_ref()
                    .and_then(|m| m.created().ok())
                    .unwrap_or(modified);
                FileEntry {
                    file: FileRef::new(entry.into_path()),
                    modified,
                    created,
                }
            })
            .collect()
    }

    fn headings(&self, file: &FileRef) -> io::Result<Vec<HeadingRecord>> {
        parser::parse_file(&file.path).map(|doc| doc.headings)
    }
}
