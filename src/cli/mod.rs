mod commands;

pub use commands::{Cli, Command, ConfigAction, MoveArgs, OutputFormat, SwitcherArgs};

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use headway::actions::{self, Editor, SwitcherSession, Workspace};
use headway::folder::{DiskFolder, FileRef, FolderOrdering};
use headway::navigator::{self, Direction};
use headway::parser::{self, Document};
use headway::suggest::{FuzzyFilter, SuggestionItem};
use headway::{Settings, tui};
use serde::Serialize;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Cursor position handed in on the command line.
#[derive(Debug, Default)]
struct LineCursor {
    line: usize,
}

impl Editor for LineCursor {
    fn cursor_line(&self) -> usize {
        self.line
    }

    fn set_cursor_line(&mut self, line: usize) {
        self.line = line;
    }

    fn scroll_into_view(&mut self, _line: usize) {}
}

/// Workspace over files on disk with a single virtual cursor.
struct FileWorkspace {
    active: Option<FileRef>,
    cursor: LineCursor,
}

impl FileWorkspace {
    fn new(active: Option<&Path>, line: usize) -> Self {
        Self {
            active: active.map(FileRef::new),
            cursor: LineCursor { line },
        }
    }
}

impl Workspace for FileWorkspace {
    type Editor = LineCursor;

    fn active_file(&self) -> Option<FileRef> {
        self.active.clone()
    }

    fn document(&self, file: &FileRef) -> Option<Document> {
        parser::parse_file(&file.path)
            .inspect_err(|e| log::warn!("cannot read {}: {}", file.path.display(), e))
            .ok()
    }

    fn open_file(&mut self, file: &FileRef) {
        self.active = Some(file.clone());
        self.cursor = LineCursor::default();
    }

    fn active_editor(&mut self) -> Option<&mut LineCursor> {
        self.active.as_ref()?;
        Some(&mut self.cursor)
    }
}

/// CLI lines are 1-based; everything below the CLI is 0-based.
fn to_index(line: usize) -> usize {
    line.saturating_sub(1)
}

fn to_display(line: usize) -> usize {
    line + 1
}

pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Current { file, line } => current(&file, line),
        Command::Next(args) => relative(args, Direction::Next),
        Command::Prev(args) => relative(args, Direction::Previous),
        Command::List {
            target,
            filter,
            output,
        } => list(&target, filter.as_deref(), &output),
        Command::Pick { target } => pick(&target),
        Command::Config { action } => config(action.unwrap_or(ConfigAction::Show)),
    }
}

fn read_document(file: &Path) -> Result<Document> {
    parser::parse_file(file).wrap_err_with(|| format!("cannot read {}", file.display()))
}

fn current(file: &Path, line: usize) -> Result<()> {
    let doc = read_document(file)?;
    if let Some(index) = navigator::nearest_heading_index(&doc.headings, to_index(line)) {
        let heading = &doc.headings[index];
        println!(
            "{}: {} {}",
            to_display(heading.start_line),
            "#".repeat(heading.level),
            heading.text
        );
    }
    Ok(())
}

fn relative(args: MoveArgs, direction: Direction) -> Result<()> {
    // Fail loudly on an unreadable input file; the workspace itself is silent.
    read_document(&args.file)?;

    let mut settings = Settings::load();
    if args.boundaries {
        settings.include_document_boundaries = true;
    }

    let mut workspace = FileWorkspace::new(Some(&args.file), to_index(args.line));
    if let Some(line) = actions::go_to_relative_heading(&mut workspace, direction, &settings) {
        println!("{}", to_display(line));
    }
    Ok(())
}

/// Resolve the switcher for a file or folder, plus the workspace it was built against.
fn open_session(
    target: &SwitcherArgs,
    settings: &Settings,
) -> Result<Option<(SwitcherSession, FileWorkspace, Option<PathBuf>)>> {
    let cursor = to_index(target.line);

    if target.path.is_dir() {
        let root = target
            .path
            .canonicalize()
            .wrap_err_with(|| format!("cannot open {}", target.path.display()))?;
        let active = target
            .active
            .as_ref()
            .map(|file| file.canonicalize().unwrap_or_else(|_| file.clone()));
        let mut workspace = FileWorkspace::new(active.as_deref(), cursor);
        let session = actions::open_folder_switcher(&mut workspace, &DiskFolder, &root, settings);
        Ok(session.map(|session| (session, workspace, Some(root))))
    } else {
        read_document(&target.path)?;
        let mut workspace = FileWorkspace::new(Some(&target.path), cursor);
        let session = actions::open_switcher(&mut workspace, settings);
        Ok(session.map(|session| (session, workspace, None)))
    }
}

fn relative_to<'a>(path: &'a Path, root: Option<&Path>) -> &'a Path {
    root.and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListEntry {
    kind: &'static str,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    path: String,
    default: bool,
}

fn list(target: &SwitcherArgs, filter: Option<&str>, output: &OutputFormat) -> Result<()> {
    let settings = Settings::load();
    let Some((session, _, root)) = open_session(target, &settings)? else {
        return Ok(());
    };

    let indices = match filter {
        Some(query) => FuzzyFilter::new().filter(&session.list, query),
        None => (0..session.list.len()).collect(),
    };

    let entries: Vec<ListEntry> = indices
        .into_iter()
        .filter_map(|index| {
            let item = session.list.get(index)?;
            let file = match item {
                SuggestionItem::File(file) => Some(file),
                SuggestionItem::Heading(h) => h.file.as_ref(),
            };
            let (level, line) = match item {
                SuggestionItem::File(_) => (None, None),
                SuggestionItem::Heading(h) => {
                    (Some(h.heading.level), Some(to_display(h.heading.start_line)))
                }
            };
            Some(ListEntry {
                kind: match item {
                    SuggestionItem::File(_) => "file",
                    SuggestionItem::Heading(_) => "heading",
                },
                text: item.label().to_string(),
                level,
                line,
                file: file.map(|f| relative_to(&f.path, root.as_deref()).display().to_string()),
                path: session.list.ancestor_path(index),
                default: session.highlight_default && session.default_index == Some(index),
            })
        })
        .collect();

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            let searching = filter.is_some();
            for entry in &entries {
                print_entry(entry, searching);
            }
        }
    }
    Ok(())
}

fn print_entry(entry: &ListEntry, searching: bool) {
    let marker = if entry.default { "*" } else { " " };
    match (entry.level, entry.line) {
        (Some(level), Some(line)) => {
            let crumb = if searching && !entry.path.is_empty() {
                format!("  ({})", entry.path)
            } else {
                String::new()
            };
            println!(
                "{} {} {}  [{}]{}",
                marker,
                "#".repeat(level),
                entry.text,
                line,
                crumb
            );
        }
        _ => println!("{} {}", marker, entry.file.as_deref().unwrap_or(&entry.text)),
    }
}

fn pick(target: &SwitcherArgs) -> Result<()> {
    let settings = Settings::load();
    let Some((session, mut workspace, root)) = open_session(target, &settings)? else {
        return Ok(());
    };

    let Some(index) = tui::pick(session.clone())? else {
        return Ok(());
    };
    if let Some(jump) = actions::choose(&session, index, &mut workspace) {
        let file = jump
            .file
            .map(|f| f.path)
            .or_else(|| workspace.active_file().map(|f| f.path))
            .ok_or_else(|| eyre!("no file to jump to"))?;
        println!(
            "{}:{}",
            relative_to(&file, root.as_deref()).display(),
            to_display(jump.line)
        );
    }
    Ok(())
}

fn config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load();
            for (key, value) in settings.entries() {
                println!("{} = {}", key, value);
            }
            if settings.ordering().is_none() {
                println!("\n(unrecognised folder ordering; files keep their listing order)");
            }
            println!("\nFolder orderings:");
            for ordering in FolderOrdering::iter() {
                println!("  {:<30} {}", ordering.to_string(), ordering.describe());
            }
        }
        ConfigAction::Path => match Settings::config_path() {
            Some(path) => println!("{}", path.display()),
            None => return Err(eyre!("could not determine config directory")),
        },
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load();
            settings.set(&key, &value)?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
