use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::importer::{ImportOptions, run_import};
use crate::indexer::scan_vault;
use crate::parsers::load_export;

#[derive(Parser)]
#[command(name = "obsidize")]
#[command(version = "0.1.0")]
#[command(about = "Import a Claude data export into an Obsidian vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an export directory into the vault, adding only what changed
    Import {
        /// Directory containing conversations.json / projects.json
        #[arg(long, value_name = "DIR")]
        input: PathBuf,

        /// Vault root directory to write notes into
        #[arg(long, value_name = "DIR")]
        vault: PathBuf,

        /// Comma-separated tags added to newly created conversation notes
        #[arg(long, value_name = "TAGS", value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Classify and report everything without writing a single note
        #[arg(long)]
        dry_run: bool,

        /// Print each note created, updated or left unchanged
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show statistics about previously imported notes in the vault
    Stats {
        /// Vault root directory to scan
        #[arg(long, value_name = "DIR")]
        vault: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Import { input, vault, tags, dry_run, verbose }) => {
            run_import_command(&input, &vault, tags, dry_run, verbose)?;
        }
        Some(Commands::Stats { vault }) => {
            show_stats(&vault)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn run_import_command(
    input: &PathBuf,
    vault: &PathBuf,
    tags: Option<Vec<String>>,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let data = load_export(input)?;
    for problem in &data.problems {
        eprintln!("Warning: {}", problem);
    }

    let options = ImportOptions { dry_run, verbose, tags };
    let summary = run_import(vault, data.conversations, data.projects, &options)?;

    let mode = if dry_run { " (dry run, nothing written)" } else { "" };
    println!(
        "Conversations: {} created, {} updated, {} unchanged, {} skipped",
        summary.conversations_created,
        summary.conversations_updated,
        summary.conversations_unchanged,
        summary.conversations_skipped
    );
    println!(
        "Projects: {} created, {} updated, {} unchanged",
        summary.projects_created, summary.projects_updated, summary.projects_unchanged
    );
    println!("Notes written: {}{}", summary.notes_written, mode);

    Ok(())
}

fn show_stats(vault: &PathBuf) -> Result<()> {
    let index = scan_vault(vault)?;

    let document_count: usize = index.projects.values().map(|p| p.documents.len()).sum();

    println!("Vault Import Statistics");
    println!("=======================");
    println!("Markdown files scanned: {}", index.total_files);
    println!("  Conversations: {}", index.conversations.len());
    println!("  Projects: {}", index.projects.len());
    println!("  Project documents: {}", document_count);

    Ok(())
}
