//! # headway
//!
//! Heading navigation for markdown documents and folders.
//!
//! Given the line-ordered headings of a file (or of every file in a folder),
//! this library finds the heading a cursor sits under, computes where a
//! "previous heading" / "next heading" jump should land, and builds the
//! searchable list behind a heading switcher, including each heading's
//! breadcrumb of ancestors.
//!
//! ## Example
//!
//! ```rust
//! use headway::navigator::{BoundaryPolicy, Direction, relative_heading};
//! use headway::parse_markdown;
//! use headway::suggest::SuggestionList;
//!
//! let doc = parse_markdown("# Guide\n\n## Install\n\ntext\n\n### Linux\n");
//!
//! // From inside the Install section, "previous" lands on Install itself.
//! let target = relative_heading(&doc.headings, 4, Direction::Previous, BoundaryPolicy::Stop);
//! assert_eq!(target, Some(2));
//!
//! let list = SuggestionList::single_file(&doc.headings);
//! assert_eq!(list.ancestor_path(2), "Guide > Install");
//! ```

/// Host command layer: previous/next heading and the switcher.
pub mod actions;

/// Configuration module for persisting user preferences.
pub mod config;

/// Folder mode: walking a folder and ordering its files.
pub mod folder;

/// Cursor-relative heading lookup and previous/next targets.
pub mod navigator;

/// Parser module for markdown documents.
///
/// Provides functions to parse markdown files and content into heading lists.
pub mod parser;

/// Switcher items, default selection, breadcrumbs and fuzzy filtering.
pub mod suggest;

/// TUI module for the interactive heading switcher.
pub mod tui;

// Re-export commonly used types for convenience
pub use config::Settings;
pub use folder::{FileRef, FolderOrdering};
pub use parser::{Document, HeadingRecord, parse_file, parse_markdown};
pub use suggest::{SuggestionItem, SuggestionList};
