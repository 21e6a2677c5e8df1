use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::frontmatter::{
    self, Frontmatter, KEY_CREATED_AT, KEY_OBSIDIZED_AT, KEY_PROJECT, KEY_TYPE, KEY_UPDATED_AT,
    KEY_UUID, KEY_VERSION, TYPE_PROJECT_DOCUMENT, TYPE_PROJECT_OVERVIEW,
};
use crate::merger::PlannedWrite;
use crate::models::{Document, ImportProject, ProjectEntry};
use crate::utils::{format_timestamp, parse_timestamp, sanitize_filename};

pub const FALLBACK_PROJECT_NAME: &str = "untitled project";

const DOCUMENTS_HEADING: &str = "## Project Documents";

/// Result of merging one project record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectMerge {
    Created { writes: Vec<PlannedWrite>, documents: usize },
    Updated { writes: Vec<PlannedWrite>, new_documents: usize },
    UpToDate,
}

/// Merge one project record into the vault
///
/// With no existing entry the whole project folder is rendered: overview
/// plus all documents with indices 1..N in record order. With an entry, new
/// documents (uuids unknown to the membership index) get the next sequential
/// indices in import order, and the overview is rewritten only when there
/// are new documents or its recorded `updated_at` differs from the record's.
pub fn merge_project(
    record: &ImportProject,
    entry: Option<&ProjectEntry>,
    vault_root: &Path,
    now: DateTime<Utc>,
) -> Result<ProjectMerge> {
    match entry {
        None => Ok(create_project(record, vault_root, now)),
        Some(entry) => merge_into_existing(record, entry, now),
    }
}

fn create_project(record: &ImportProject, vault_root: &Path, now: DateTime<Utc>) -> ProjectMerge {
    let name = project_name(record);
    let dir = vault_root.join(sanitize_filename(&format!("{}__{}", name, record.uuid)));

    let mut writes = Vec::new();
    let mut listed: Vec<(String, String)> = Vec::new();
    for (position, document) in record.documents.iter().enumerate() {
        let index = position as u32 + 1;
        let filename = document_filename(index, document);
        writes.push(PlannedWrite {
            path: dir.join(&filename),
            content: render_document(document, name, now),
        });
        listed.push((filename, document.created_at.clone()));
    }

    let overview_path = dir.join(sanitize_filename(&format!("{}.md", name)));
    writes.push(PlannedWrite {
        path: overview_path,
        content: render_overview(record, name, &listed, now),
    });

    ProjectMerge::Created { writes, documents: record.documents.len() }
}

fn merge_into_existing(
    record: &ImportProject,
    entry: &ProjectEntry,
    now: DateTime<Utc>,
) -> Result<ProjectMerge> {
    let name = project_name(record);
    let new_documents: Vec<&Document> =
        record.documents.iter().filter(|d| !entry.contains_document(&d.uuid)).collect();
    let metadata_changed = record.updated_at != entry.updated_at;

    if new_documents.is_empty() && !metadata_changed {
        return Ok(ProjectMerge::UpToDate);
    }

    let mut writes = Vec::new();

    // Indices continue past the highest recovered one; in import order,
    // never reusing a slot even if earlier documents disappeared.
    let mut listed: Vec<(String, String)> =
        entry.documents.iter().map(|d| (d.filename.clone(), d.created_at.clone())).collect();
    let mut next_index = entry.highest_index();
    for document in &new_documents {
        next_index += 1;
        let filename = document_filename(next_index, document);
        writes.push(PlannedWrite {
            path: entry.dir.join(&filename),
            content: render_document(document, name, now),
        });
        listed.push((filename, document.created_at.clone()));
    }

    let text = fs::read_to_string(&entry.overview_path)
        .with_context(|| format!("Failed to read overview: {}", entry.overview_path.display()))?;
    let substituted = frontmatter::substitute_fields(
        &text,
        &[
            (KEY_UPDATED_AT, record.updated_at.clone()),
            (KEY_OBSIDIZED_AT, format_timestamp(now)),
        ],
    );
    writes.push(PlannedWrite {
        path: entry.overview_path.clone(),
        content: rebuild_documents_section(&substituted, &listed),
    });

    Ok(ProjectMerge::Updated { writes, new_documents: new_documents.len() })
}

fn project_name(record: &ImportProject) -> &str {
    let trimmed = record.name.trim();
    if trimmed.is_empty() { FALLBACK_PROJECT_NAME } else { trimmed }
}

fn document_filename(index: u32, document: &Document) -> String {
    let mut sanitized = sanitize_filename(document.filename.trim());
    if sanitized.is_empty() {
        sanitized = "document".to_string();
    }
    // Extensionless documents become markdown notes; named extensions stay.
    if !sanitized.contains('.') {
        sanitized.push_str(".md");
    }
    format!("{:03}_{}", index, sanitized)
}

fn render_document(document: &Document, project_name: &str, now: DateTime<Utc>) -> String {
    let mut fm = Frontmatter::new();
    fm.set(KEY_UUID, document.uuid.as_str());
    fm.set(KEY_TYPE, TYPE_PROJECT_DOCUMENT);
    fm.set(KEY_PROJECT, project_name);
    fm.set(KEY_VERSION, env!("CARGO_PKG_VERSION"));
    fm.set(KEY_CREATED_AT, document.created_at.as_str());
    fm.set(KEY_OBSIDIZED_AT, format_timestamp(now));

    let mut content = fm.render();
    content.push('\n');
    content.push_str(&document.content);
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

fn render_overview(
    record: &ImportProject,
    name: &str,
    documents: &[(String, String)],
    now: DateTime<Utc>,
) -> String {
    let mut fm = Frontmatter::new();
    fm.set(KEY_UUID, record.uuid.as_str());
    fm.set(KEY_TYPE, TYPE_PROJECT_OVERVIEW);
    fm.set(KEY_PROJECT, name);
    fm.set(KEY_CREATED_AT, record.created_at.as_str());
    fm.set(KEY_UPDATED_AT, record.updated_at.as_str());
    fm.set(KEY_VERSION, env!("CARGO_PKG_VERSION"));
    fm.set(KEY_OBSIDIZED_AT, format_timestamp(now));

    let mut content = fm.render();
    content.push_str(&format!("\n# {}\n", name));
    let description = record.description.trim();
    if !description.is_empty() {
        content.push('\n');
        content.push_str(description);
        content.push('\n');
    }
    content.push('\n');
    content.push_str(&documents_section(documents));
    content
}

/// Render the `## Project Documents` section, chronological by `created_at`
///
/// Note this is deliberately a different order than index assignment (which
/// follows import order); the two can disagree and that is preserved
/// behavior.
fn documents_section(documents: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = documents.iter().collect();
    sorted.sort_by_key(|(_, created_at)| parse_timestamp(created_at));

    let mut section = String::from(DOCUMENTS_HEADING);
    section.push('\n');
    for (filename, _) in sorted {
        section.push_str(&format!("\n- [[{}]]", filename));
    }
    section.push('\n');
    section
}

/// Replace the `## Project Documents` section of an overview note
///
/// The section runs from its heading line to the next `## ` heading or end
/// of file; everything outside it is untouched. An overview without the
/// heading gets the section appended.
fn rebuild_documents_section(text: &str, documents: &[(String, String)]) -> String {
    let section = documents_section(documents);

    let mut section_start = None;
    let mut section_end = text.len();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if section_start.is_none() {
            if trimmed == DOCUMENTS_HEADING {
                section_start = Some(offset);
            }
        } else if trimmed.starts_with("## ") {
            section_end = offset;
            break;
        }
        offset += line.len();
    }

    match section_start {
        Some(start) => {
            let mut out = String::with_capacity(text.len() + section.len());
            out.push_str(&text[..start]);
            out.push_str(&section);
            if section_end < text.len() {
                out.push('\n');
                out.push_str(&text[section_end..]);
            }
            out
        }
        None => {
            let mut out = text.to_string();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&section);
            out
        }
    }
}
