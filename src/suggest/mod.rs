//! The switcher's suggestion list.
//!
//! A [`SuggestionList`] is a flat, ordered run of file and heading items.
//! The order is both the display order and the only structure heading
//! ancestry is derived from: a heading's parent is the nearest earlier
//! heading of the same file with a strictly smaller level. Parents are
//! resolved once, in a single forward pass with a level stack, so breadcrumbs
//! cost O(depth) per item.

mod filter;

pub use filter::FuzzyFilter;

use crate::folder::{FileHeadings, FileRef};
use crate::parser::HeadingRecord;
use std::path::Path;

/// Separator between breadcrumb segments.
pub const PATH_SEPARATOR: &str = " > ";

/// A heading entry in the switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSuggestion {
    pub heading: HeadingRecord,
    /// Owning file in folder mode; always `None` for a single file.
    pub file: Option<FileRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionItem {
    File(FileRef),
    Heading(HeadingSuggestion),
}

impl SuggestionItem {
    /// Text shown for, and matched against, this item.
    pub fn label(&self) -> &str {
        match self {
            SuggestionItem::File(file) => &file.display_name,
            SuggestionItem::Heading(h) => &h.heading.text,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            SuggestionItem::File(_) => ItemKind::File,
            SuggestionItem::Heading(_) => ItemKind::Heading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Heading,
}

/// Everything a renderer needs to style one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHint {
    pub kind: ItemKind,
    /// Heading level, `None` for files.
    pub level: Option<usize>,
    /// A query is being typed; renderers show breadcrumbs instead of nesting.
    pub searching: bool,
    /// This row is the pre-selected item and highlighting is enabled.
    pub is_default: bool,
}

/// Where choosing an item should take the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTarget {
    /// File to open first, if the item belongs to one.
    pub file: Option<FileRef>,
    pub line: usize,
}

/// Ordered switcher items with precomputed heading parents.
#[derive(Debug, Clone, Default)]
pub struct SuggestionList {
    items: Vec<SuggestionItem>,
    parents: Vec<Option<usize>>,
}

impl SuggestionList {
    /// One heading item per heading, in line order, with no file items.
    pub fn single_file(headings: &[HeadingRecord]) -> Self {
        let items = headings
            .iter()
            .map(|heading| {
                SuggestionItem::Heading(HeadingSuggestion {
                    heading: heading.clone(),
                    file: None,
                })
            })
            .collect();
        Self::from_items(items)
    }

    /// `[File1, headings of File1…, File2, headings of File2…]`.
    ///
    /// # Arguments
    ///
    /// * `aggregated` - Per-file headings in folder-mode order, as returned
    ///   by [`crate::folder::headings_for_folder`]
    pub fn folder(aggregated: Vec<FileHeadings>) -> Self {
        let mut items = Vec::new();
        for FileHeadings { file, headings } in aggregated {
            items.push(SuggestionItem::File(file.clone()));
            items.extend(headings.into_iter().map(|heading| {
                SuggestionItem::Heading(HeadingSuggestion {
                    heading,
                    file: Some(file.clone()),
                })
            }));
        }
        Self::from_items(items)
    }

    fn from_items(items: Vec<SuggestionItem>) -> Self {
        let mut parents = Vec::with_capacity(items.len());
        let mut open: Vec<(usize, usize)> = Vec::new(); // (level, index)

        for (index, item) in items.iter().enumerate() {
            match item {
                SuggestionItem::File(_) => {
                    open.clear();
                    parents.push(None);
                }
                SuggestionItem::Heading(h) => {
                    let level = h.heading.level;
                    while open.last().is_some_and(|&(open_level, _)| open_level >= level) {
                        open.pop();
                    }
                    parents.push(open.last().map(|&(_, parent)| parent));
                    open.push((level, index));
                }
            }
        }

        Self { items, parents }
    }

    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&SuggestionItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(SuggestionItem::label)
    }

    /// Index of the item to pre-select when the switcher opens.
    ///
    /// Prefers the last heading of the active file at or above the cursor,
    /// then the active file's own item. Headings without an owning file
    /// (single-file mode) match any active file.
    ///
    /// # Arguments
    ///
    /// * `active_file` - Path of the file open in the editor, if any
    /// * `cursor_line` - 0-based cursor line in that file
    ///
    /// # Returns
    ///
    /// The row to select, or `None` when no heading of the active file sits
    /// at or above the cursor and the file has no item of its own.
    pub fn default_selection(&self, active_file: Option<&Path>, cursor_line: usize) -> Option<usize> {
        let in_active = |file: &Option<FileRef>| match (file, active_file) {
            (None, _) => true,
            (Some(file), Some(active)) => file.path == active,
            (Some(_), None) => false,
        };

        self.items
            .iter()
            .rposition(|item| match item {
                SuggestionItem::Heading(h) => {
                    h.heading.start_line <= cursor_line && in_active(&h.file)
                }
                SuggestionItem::File(_) => false,
            })
            .or_else(|| {
                let active = active_file?;
                self.items.iter().position(
                    |item| matches!(item, SuggestionItem::File(file) if file.path == active),
                )
            })
    }

    /// Structural parent of the heading at `index`.
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    /// Ancestor indices of `index`, outermost first.
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.parent(index);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain.reverse();
        chain
    }

    /// Breadcrumb for the heading at `index`, e.g. `"Guide > Install"`.
    ///
    /// In folder mode the owning file's display name is the root segment.
    /// Top-level headings have an empty path (or just the file name); file
    /// items always have an empty path.
    ///
    /// # Arguments
    ///
    /// * `index` - Row in this list
    ///
    /// # Returns
    ///
    /// Segments joined with `" > "`, root first. Out-of-range rows give an
    /// empty string.
    pub fn ancestor_path(&self, index: usize) -> String {
        let Some(SuggestionItem::Heading(item)) = self.items.get(index) else {
            return String::new();
        };

        let mut segments: Vec<&str> = Vec::new();
        if let Some(file) = &item.file {
            segments.push(&file.display_name);
        }
        segments.extend(self.ancestors(index).into_iter().map(|i| self.items[i].label()));
        segments.join(PATH_SEPARATOR)
    }

    /// Styling hint for the row at `index`.
    pub fn render_hint(
        &self,
        index: usize,
        searching: bool,
        default_index: Option<usize>,
        highlight_default: bool,
    ) -> Option<RenderHint> {
        let item = self.items.get(index)?;
        Some(RenderHint {
            kind: item.kind(),
            level: match item {
                SuggestionItem::File(_) => None,
                SuggestionItem::Heading(h) => Some(h.heading.level),
            },
            searching,
            is_default: highlight_default && default_index == Some(index),
        })
    }

    /// Where choosing the item at `index` leads.
    pub fn target(&self, index: usize) -> Option<JumpTarget> {
        match self.items.get(index)? {
            SuggestionItem::File(file) => Some(JumpTarget {
                file: Some(file.clone()),
                line: 0,
            }),
            SuggestionItem::Heading(h) => Some(JumpTarget {
                file: h.file.clone(),
                line: h.heading.start_line,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn heading(level: usize, text: &str, line: usize) -> HeadingRecord {
        HeadingRecord::new(text, level, line)
    }

    fn nested() -> Vec<HeadingRecord> {
        vec![
            heading(1, "H1", 0),
            heading(2, "H2", 5),
            heading(3, "H3", 10),
            heading(2, "H2b", 15),
            heading(1, "H1b", 20),
        ]
    }

    fn two_files() -> SuggestionList {
        SuggestionList::folder(vec![
            FileHeadings {
                file: FileRef::new("vault/A.md"),
                headings: vec![heading(1, "Alpha", 0), heading(2, "Alpha child", 10)],
            },
            FileHeadings {
                file: FileRef::new("vault/B.md"),
                headings: vec![heading(2, "Beta", 0)],
            },
        ])
    }

    #[test]
    fn test_single_file_maps_headings_one_to_one() {
        let list = SuggestionList::single_file(&nested());
        assert_eq!(list.len(), 5);
        assert!(list.items().iter().all(|item| matches!(
            item,
            SuggestionItem::Heading(HeadingSuggestion { file: None, .. })
        )));
        assert_eq!(list.label(3), Some("H2b"));
    }

    #[test]
    fn test_folder_layout() {
        let list = two_files();
        let layout: Vec<(ItemKind, &str)> = list
            .items()
            .iter()
            .map(|item| (item.kind(), item.label()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (ItemKind::File, "A"),
                (ItemKind::Heading, "Alpha"),
                (ItemKind::Heading, "Alpha child"),
                (ItemKind::File, "B"),
                (ItemKind::Heading, "Beta"),
            ]
        );

        // Every heading belongs to the file item opening its run.
        let mut current_file = None;
        for item in list.items() {
            match item {
                SuggestionItem::File(file) => current_file = Some(file.clone()),
                SuggestionItem::Heading(h) => assert_eq!(h.file, current_file),
            }
        }
    }

    #[test]
    fn test_ancestor_path_single_file() {
        let list = SuggestionList::single_file(&nested());
        assert_eq!(list.ancestor_path(0), "");
        assert_eq!(list.ancestor_path(1), "H1");
        assert_eq!(list.ancestor_path(2), "H1 > H2");
        assert_eq!(list.ancestor_path(3), "H1");
        assert_eq!(list.ancestor_path(4), "");
    }

    #[test]
    fn test_ancestor_path_with_skipped_levels() {
        let list = SuggestionList::single_file(&[
            heading(1, "Top", 0),
            heading(4, "Deep", 2),
            heading(3, "Mid", 4),
            heading(6, "Deepest", 6),
            heading(2, "Second", 8),
        ]);
        assert_eq!(list.ancestor_path(1), "Top");
        // "Deep" is deeper than "Mid", so it is not Mid's parent.
        assert_eq!(list.ancestor_path(2), "Top");
        assert_eq!(list.ancestor_path(3), "Top > Mid");
        assert_eq!(list.ancestor_path(4), "Top");
    }

    #[test]
    fn test_ancestor_path_without_shallower_heading() {
        let list = SuggestionList::single_file(&[heading(3, "First", 0), heading(3, "Second", 4)]);
        assert_eq!(list.ancestor_path(0), "");
        assert_eq!(list.ancestor_path(1), "");
        assert_eq!(list.parent(1), None);
    }

    #[test]
    fn test_ancestor_path_folder_scoped() {
        let list = two_files();
        assert_eq!(list.ancestor_path(0), "");
        assert_eq!(list.ancestor_path(1), "A");
        assert_eq!(list.ancestor_path(2), "A > Alpha");
        // "Alpha" is shallower and earlier but lives in another file.
        assert_eq!(list.ancestor_path(4), "B");
        assert_eq!(list.parent(4), None);
    }

    #[test]
    fn test_ancestors_match_backward_scan() {
        let headings = vec![
            heading(2, "a", 0),
            heading(1, "b", 1),
            heading(3, "c", 2),
            heading(2, "d", 3),
            heading(4, "e", 4),
            heading(3, "f", 5),
            heading(5, "g", 6),
            heading(1, "h", 7),
        ];
        let list = SuggestionList::single_file(&headings);
        for (index, item) in headings.iter().enumerate() {
            let scanned = headings[..index]
                .iter()
                .rposition(|h| h.start_line < item.start_line && h.level < item.level);
            assert_eq!(list.parent(index), scanned, "heading {}", item.text);
        }
    }

    #[test]
    fn test_default_selection_single_file() {
        let list = SuggestionList::single_file(&[
            heading(1, "Intro", 0),
            heading(2, "Background", 5),
            heading(2, "Setup", 12),
        ]);
        assert_eq!(list.default_selection(None, 8), Some(1));
        assert_eq!(list.default_selection(Some(Path::new("any.md")), 12), Some(2));

        let late = SuggestionList::single_file(&[heading(1, "Late", 4)]);
        assert_eq!(late.default_selection(None, 1), None);
    }

    #[test]
    fn test_default_selection_folder() {
        let list = two_files();
        let a = PathBuf::from("vault/A.md");
        let b = PathBuf::from("vault/B.md");
        assert_eq!(list.default_selection(Some(&a), 3), Some(1));
        assert_eq!(list.default_selection(Some(&a), 50), Some(2));
        assert_eq!(list.default_selection(Some(&b), 0), Some(4));
        assert_eq!(list.default_selection(None, 50), None);
        assert_eq!(list.default_selection(Some(Path::new("vault/C.md")), 0), None);
    }

    #[test]
    fn test_default_selection_falls_back_to_file_item() {
        let list = SuggestionList::folder(vec![
            FileHeadings {
                file: FileRef::new("A.md"),
                headings: vec![heading(1, "A", 0)],
            },
            FileHeadings {
                file: FileRef::new("B.md"),
                headings: vec![heading(1, "Late", 9)],
            },
        ]);
        assert_eq!(list.default_selection(Some(Path::new("B.md")), 2), Some(2));
    }

    #[test]
    fn test_targets() {
        let list = two_files();
        assert_eq!(
            list.target(0),
            Some(JumpTarget {
                file: Some(FileRef::new("vault/A.md")),
                line: 0
            })
        );
        assert_eq!(list.target(2).map(|t| t.line), Some(10));
        assert_eq!(list.target(9), None);

        let single = SuggestionList::single_file(&nested());
        assert_eq!(
            single.target(3),
            Some(JumpTarget {
                file: None,
                line: 15
            })
        );
    }

    #[test]
    fn test_render_hint() {
        let list = two_files();
        let hint = list.render_hint(2, true, Some(2), true).unwrap();
        assert_eq!(hint.kind, ItemKind::Heading);
        assert_eq!(hint.level, Some(2));
        assert!(hint.searching);
        assert!(hint.is_default);

        let hint = list.render_hint(2, false, Some(2), false).unwrap();
        assert!(!hint.is_default);

        let file = list.render_hint(3, false, Some(2), true).unwrap();
        assert_eq!(file.kind, ItemKind::File);
        assert_eq!(file.level, None);
        assert!(!file.is_default);
    }

    #[test]
    fn test_empty_lists() {
        assert!(SuggestionList::single_file(&[]).is_empty());
        assert!(SuggestionList::folder(Vec::new()).is_empty());
        assert_eq!(SuggestionList::default().ancestor_path(0), "");
    }
}
