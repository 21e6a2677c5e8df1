//! obsidize - incrementally import a Claude data export into an Obsidian vault
//!
//! This library turns a bulk export of conversations and projects into a
//! tree of markdown notes, and keeps that tree up to date across repeated
//! imports without destroying manual edits:
//!
//! - No side database: prior import state is recovered each run by
//!   re-parsing the frontmatter of the notes themselves
//! - Each incoming record is classified as create/update/skip against the
//!   `obsidized_at` watermark recorded in its note
//! - Conversation merges are append-only; new messages are deduplicated by
//!   a (timestamp, question) signature so user deletions stick
//! - Project documents get stable `NNN_` indices that are never reused
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use obsidize::{ImportOptions, load_export, run_import};
//!
//! let data = load_export(Path::new("claude-export"))?;
//! let summary = run_import(
//!     Path::new("vault"),
//!     data.conversations,
//!     data.projects,
//!     &ImportOptions::default(),
//! )?;
//! println!("{} notes written", summary.notes_written);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod frontmatter;
pub mod importer;
pub mod indexer;
pub mod merger;
pub mod models;
pub mod parsers;
pub mod planner;
pub mod utils;

// Re-export commonly used types
pub use importer::{ImportOptions, ImportSummary, run_import, run_import_at};
pub use indexer::scan_vault;
pub use models::{ImportConversation, ImportProject, VaultIndex};
pub use parsers::load_export;
pub use planner::{UpdateAction, plan_updates};
