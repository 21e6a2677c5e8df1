use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::indexer::scan_vault;
use crate::merger::{
    ConversationMerge, PlannedWrite, ProjectMerge, merge_conversation, merge_project,
};
use crate::models::{ImportConversation, ImportProject};
use crate::planner::{UpdateAction, plan_updates};

/// Explicit per-run configuration threaded through the pipeline
///
/// Verbosity and dry-run travel here rather than in any process-wide state.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub verbose: bool,
    /// Extra frontmatter tags for newly created conversation notes
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub conversations_created: usize,
    pub conversations_updated: usize,
    pub conversations_unchanged: usize,
    pub conversations_skipped: usize,
    pub projects_created: usize,
    pub projects_updated: usize,
    pub projects_unchanged: usize,
    /// Files actually written; stays 0 on a dry run
    pub notes_written: usize,
}

/// Run one import pass against the vault
pub fn run_import(
    vault: &Path,
    conversations: Vec<ImportConversation>,
    projects: Vec<ImportProject>,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    run_import_at(vault, conversations, projects, options, Utc::now())
}

/// [`run_import`] with an injected clock, used by tests to pin the watermark
pub fn run_import_at(
    vault: &Path,
    conversations: Vec<ImportConversation>,
    projects: Vec<ImportProject>,
    options: &ImportOptions,
    now: DateTime<Utc>,
) -> Result<ImportSummary> {
    let index = scan_vault(vault)?;
    let plan = plan_updates(&index, conversations, projects);
    let mut summary = ImportSummary::default();

    for planned in &plan.conversations {
        let record = &planned.record;
        let entry = match planned.action {
            UpdateAction::NoUpdate => {
                summary.conversations_unchanged += 1;
                report(options, "Unchanged", &record.uuid);
                continue;
            }
            UpdateAction::CreateNew => None,
            UpdateAction::UpdateExisting => index.conversations.get(&record.uuid),
        };

        match merge_conversation(record, entry, vault, options.tags.as_deref(), now)? {
            ConversationMerge::Created(write) => {
                summary.conversations_created += 1;
                report(options, "Created", &display_name(&write, vault));
                apply(&write, options, &mut summary)?;
            }
            ConversationMerge::Appended(write) => {
                summary.conversations_updated += 1;
                report(options, "Updated", &display_name(&write, vault));
                apply(&write, options, &mut summary)?;
            }
            ConversationMerge::UpToDate => {
                summary.conversations_unchanged += 1;
                report(options, "Unchanged", &record.uuid);
            }
            ConversationMerge::Skipped { path, reason } => {
                summary.conversations_skipped += 1;
                eprintln!("Warning: Skipping {} ({})", path.display(), reason);
            }
        }
    }

    for planned in &plan.projects {
        let record = &planned.record;
        let entry = match planned.action {
            UpdateAction::NoUpdate => {
                summary.projects_unchanged += 1;
                report(options, "Unchanged", &record.uuid);
                continue;
            }
            UpdateAction::CreateNew => None,
            UpdateAction::UpdateExisting => index.projects.get(&record.uuid),
        };

        match merge_project(record, entry, vault, now)? {
            ProjectMerge::Created { writes, documents } => {
                summary.projects_created += 1;
                report(
                    options,
                    "Created",
                    &format!("project {} ({} documents)", record.name, documents),
                );
                for write in &writes {
                    apply(write, options, &mut summary)?;
                }
            }
            ProjectMerge::Updated { writes, new_documents } => {
                summary.projects_updated += 1;
                report(
                    options,
                    "Updated",
                    &format!("project {} ({} new documents)", record.name, new_documents),
                );
                for write in &writes {
                    apply(write, options, &mut summary)?;
                }
            }
            ProjectMerge::UpToDate => {
                summary.projects_unchanged += 1;
                report(options, "Unchanged", &record.uuid);
            }
        }
    }

    Ok(summary)
}

fn apply(write: &PlannedWrite, options: &ImportOptions, summary: &mut ImportSummary) -> Result<()> {
    if options.dry_run {
        return Ok(());
    }
    if let Some(parent) = write.path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&write.path, &write.content)
        .with_context(|| format!("Failed to write note: {}", write.path.display()))?;
    summary.notes_written += 1;
    Ok(())
}

fn report(options: &ImportOptions, verb: &str, what: &str) {
    if options.verbose {
        println!("{}: {}", verb, what);
    }
}

fn display_name(write: &PlannedWrite, vault: &Path) -> String {
    write
        .path
        .strip_prefix(vault)
        .unwrap_or(&write.path)
        .to_string_lossy()
        .to_string()
}
