use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "headway")]
#[command(version)]
#[command(about = "Jump between markdown headings and search them with a fuzzy switcher")]
#[command(
    long_about = "headway - heading navigation for markdown files and folders.\n\n\
    Find the heading under a cursor line, compute the previous/next heading to jump to,\n\
    list headings with their breadcrumbs, or pick one interactively. Pointing a command\n\
    at a folder searches every markdown file beneath it.\n\n\
    Line numbers are 1-based, like in editors.\n\n\
    Examples:\n  \
    headway current README.md --line 40   # Heading the cursor is under\n  \
    headway next README.md --line 40      # Line of the next heading\n  \
    headway list docs/ --filter install   # Fuzzy-search headings in a folder\n  \
    headway pick docs/                    # Interactive heading switcher\n  \
    headway config set folder-ordering ByModificationDateDescending"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the heading the given line sits under
    Current {
        /// Markdown file
        file: PathBuf,

        /// Cursor line (1-based)
        #[arg(short = 'n', long = "line", default_value_t = 1)]
        line: usize,
    },

    /// Print the line of the next heading
    Next(MoveArgs),

    /// Print the line of the previous heading
    ///
    /// From inside a section body this is the section's own heading; from a
    /// heading line it is the heading before it.
    Prev(MoveArgs),

    /// List headings as the switcher would show them
    List {
        #[command(flatten)]
        target: SwitcherArgs,

        /// Fuzzy filter applied to the list
        #[arg(short = 'f', long = "filter", value_name = "QUERY")]
        filter: Option<String>,

        /// Output format
        #[arg(short = 'o', long = "output", default_value = "plain")]
        output: OutputFormat,
    },

    /// Pick a heading interactively and print its location as path:line
    Pick {
        #[command(flatten)]
        target: SwitcherArgs,
    },

    /// Show or change persisted settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Args)]
pub struct MoveArgs {
    /// Markdown file
    pub file: PathBuf,

    /// Cursor line (1-based)
    #[arg(short = 'n', long = "line", default_value_t = 1)]
    pub line: usize,

    /// Allow landing on the first/last line of the document
    ///
    /// Overrides the include-document-boundaries setting for this call.
    #[arg(short = 'b', long = "boundaries")]
    pub boundaries: bool,
}

#[derive(Debug, clap::Args)]
pub struct SwitcherArgs {
    /// Markdown file, or a folder to search every markdown file in it
    pub path: PathBuf,

    /// Cursor line (1-based) used to pre-select the current heading
    #[arg(short = 'n', long = "line", default_value_t = 1)]
    pub line: usize,

    /// In folder mode, the file the cursor line refers to
    #[arg(short = 'a', long = "active", value_name = "FILE")]
    pub active: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print every setting (default)
    Show,
    /// Print the settings file location
    Path,
    /// Change a setting and save it
    Set {
        /// highlight-current-item, folder-ordering or include-document-boundaries
        key: String,
        value: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}
