//! Conversation and project mergers
//!
//! Mergers turn one planned record into the exact file contents the vault
//! should hold, but never touch the filesystem themselves beyond reading the
//! existing note: each merge returns [`PlannedWrite`]s and the import runner
//! applies them. Dry-run is therefore enforced by not invoking the apply
//! step at all, not by writing and reverting.
//!
//! # Error Handling Strategy
//!
//! Merging is conservative by construction:
//!
//! - Existing conversation bodies are append-only; the only mutated header
//!   fields are `updated_at` and `obsidized_at`, via targeted substitution.
//! - A conversation note whose watermark is missing or unparsable is treated
//!   as corrupted and skipped rather than rewritten -- never destroying user
//!   content wins over completeness.
//! - Failure to read an existing note propagates as an `anyhow` error with
//!   path context.

pub mod conversation;
pub mod project;

use std::path::PathBuf;

pub use conversation::{ConversationMerge, merge_conversation};
pub use project::{ProjectMerge, merge_project};

/// One file the vault should contain after the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub path: PathBuf,
    pub content: String,
}
