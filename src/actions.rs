//! The three user-facing commands: previous heading, next heading and the
//! heading switcher, written against small host traits so any front end
//! (the CLI, the TUI picker, an editor integration) can drive them.

use crate::config::Settings;
use crate::folder::{FileRef, FolderSource, headings_for_folder};
use crate::navigator::{self, BoundaryPolicy, Direction};
use crate::parser::Document;
use crate::suggest::{JumpTarget, SuggestionList};
use std::path::Path;

/// Cursor and viewport of one open buffer.
pub trait Editor {
    fn cursor_line(&self) -> usize;
    fn set_cursor_line(&mut self, line: usize);
    fn scroll_into_view(&mut self, line: usize);
}

/// The host's view of open files.
pub trait Workspace {
    type Editor: Editor;

    fn active_file(&self) -> Option<FileRef>;

    /// Parsed contents of `file`, if it can be read.
    fn document(&self, file: &FileRef) -> Option<Document>;

    /// Make `file` the active file. Its editor becomes the active editor.
    fn open_file(&mut self, file: &FileRef);

    fn active_editor(&mut self) -> Option<&mut Self::Editor>;
}

/// Put the cursor at the start of `line` and bring it into view.
pub fn goto_line<E: Editor + ?Sized>(editor: &mut E, line: usize) {
    editor.set_cursor_line(line);
    editor.scroll_into_view(line);
}

/// Move the active editor to the previous or next heading.
///
/// Returns the line moved to, or `None` when there is nothing to do (no
/// active file, no headings, already at the edge).
pub fn go_to_relative_heading<W: Workspace>(
    workspace: &mut W,
    direction: Direction,
    settings: &Settings,
) -> Option<usize> {
    let file = workspace.active_file()?;
    let document = workspace.document(&file)?;
    let editor = workspace.active_editor()?;

    let policy =
        BoundaryPolicy::from_setting(settings.include_document_boundaries, document.last_line());
    let target = navigator::relative_heading(
        &document.headings,
        editor.cursor_line(),
        direction,
        policy,
    )?;

    log::debug!("{:?} heading: line {}", direction, target);
    goto_line(editor, target);
    Some(target)
}

/// One open switcher: its items and the row to pre-select.
///
/// Built fresh every time the switcher opens and dropped when it closes.
#[derive(Debug, Clone)]
pub struct SwitcherSession {
    pub list: SuggestionList,
    pub default_index: Option<usize>,
    pub highlight_default: bool,
}

/// Build a switcher over the active file's headings.
pub fn open_switcher<W: Workspace>(workspace: &mut W, settings: &Settings) -> Option<SwitcherSession> {
    let file = workspace.active_file()?;
    let document = workspace.document(&file)?;
    if document.headings.is_empty() {
        return None;
    }
    let cursor = workspace.active_editor()?.cursor_line();

    let list = SuggestionList::single_file(&document.headings);
    let default_index = list.default_selection(None, cursor);
    Some(SwitcherSession {
        list,
        default_index,
        highlight_default: settings.highlight_current_item,
    })
}

/// Build a switcher over every markdown file under `root`.
pub fn open_folder_switcher<W, S>(
    workspace: &mut W,
    source: &S,
    root: &Path,
    settings: &Settings,
) -> Option<SwitcherSession>
where
    W: Workspace,
    S: FolderSource + ?Sized,
{
    let aggregated = headings_for_folder(source, root, settings.ordering());
    if aggregated.is_empty() {
        return None;
    }

    let active = workspace.active_file();
    let cursor = workspace
        .active_editor()
        .map(|editor| editor.cursor_line())
        .unwrap_or(0);

    let list = SuggestionList::folder(aggregated);
    let default_index = list.default_selection(active.as_ref().map(|f| f.path.as_path()), cursor);
    Some(SwitcherSession {
        list,
        default_index,
        highlight_default: settings.highlight_current_item,
    })
}

/// Jump to the item at `index`, opening its file first when needed.
pub fn choose<W: Workspace>(
    session: &SwitcherSession,
    index: usize,
    workspace: &mut W,
) -> Option<JumpTarget> {
    let target = session.list.target(index)?;

    if let Some(file) = &target.file {
        let already_active = workspace
            .active_file()
            .is_some_and(|active| active.path == file.path);
        if !already_active {
            workspace.open_file(file);
        }
    }

    let editor = workspace.active_editor()?;
    goto_line(editor, target.line);
    Some(target)
}
