//! Sibling ordering policies for files inside one folder.

use super::FileEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumIter, EnumString};

/// How files sharing a folder are ordered in folder mode.
///
/// The variant names double as the persisted identifiers in the settings file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum FolderOrdering {
    ByNameAscending,
    ByNameDescending,
    ByModificationDateDescending,
    ByModificationDateAscending,
    ByCreationDateDescending,
    ByCreationDateAscending,
}

impl FolderOrdering {
    /// Parse a persisted identifier. Unknown identifiers give `None`, which
    /// callers treat as "keep the listing order".
    pub fn from_identifier(id: &str) -> Option<Self> {
        id.parse().ok()
    }

    /// Short human description, used by `config show`.
    pub fn describe(self) -> &'static str {
        match self {
            FolderOrdering::ByNameAscending => "File name (A to Z)",
            FolderOrdering::ByNameDescending => "File name (Z to A)",
            FolderOrdering::ByModificationDateDescending => "Modified time (new to old)",
            FolderOrdering::ByModificationDateAscending => "Modified time (old to new)",
            FolderOrdering::ByCreationDateDescending => "Created time (new to old)",
            FolderOrdering::ByCreationDateAscending => "Created time (old to new)",
        }
    }

    pub fn compare(self, a: &FileEntry, b: &FileEntry) -> Ordering {
        match self {
            FolderOrdering::ByNameAscending => compare_names(a, b),
            FolderOrdering::ByNameDescending => compare_names(b, a),
            FolderOrdering::ByModificationDateDescending => b.modified.cmp(&a.modified),
            FolderOrdering::ByModificationDateAscending => a.modified.cmp(&b.modified),
            FolderOrdering::ByCreationDateDescending => b.created.cmp(&a.created),
            FolderOrdering::ByCreationDateAscending => a.created.cmp(&b.created),
        }
    }
}

/// Sort one folder's files in place. `None` leaves the listing order alone.
///
/// The sort is stable: entries with equal keys keep their input order.
pub fn sort_files(entries: &mut [FileEntry], ordering: Option<FolderOrdering>) {
    if let Some(ordering) = ordering {
        entries.sort_by(|a, b| ordering.compare(a, b));
    }
}

fn compare_names(a: &FileEntry, b: &FileEntry) -> Ordering {
    let (a, b) = (a.file.file_name(), b.file.file_name());
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(&b))
}
