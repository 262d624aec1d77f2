//! # headway
//!
//! Heading navigation for markdown files and folders.
//!
//! ## Usage
//!
//! Find the heading under a line:
//! ```sh
//! headway current README.md --line 40
//! ```
//!
//! Jump targets for previous/next heading:
//! ```sh
//! headway prev README.md --line 40
//! headway next README.md --line 40
//! ```
//!
//! Search every heading in a folder:
//! ```sh
//! headway pick docs/
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Silent unless RUST_LOG is set, so the picker screen stays clean.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
        .format_timestamp(None)
        .init();

    let args = Cli::parse();
    cli::execute(args)
}
