use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::frontmatter::{
    self, Frontmatter, KEY_CREATED_AT, KEY_OBSIDIZED_AT, KEY_TYPE, KEY_UPDATED_AT, KEY_UUID,
    TYPE_CONVERSATION, TYPE_PROJECT_DOCUMENT, TYPE_PROJECT_OVERVIEW,
};
use crate::models::{ConversationEntry, DocumentEntry, ProjectEntry, VaultIndex};

/// Recover the numeric `NNN_` prefix of a document filename
///
/// Returns 0 when the filename has no such prefix, so notes a user dropped
/// into a project folder by hand never claim an index slot.
pub fn parse_index_prefix(filename: &str) -> u32 {
    match filename.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Scan the vault and rebuild the index of previously-imported notes
///
/// Walks `root` recursively, reads the frontmatter of every file that
/// carries a frontmatter block, and dispatches on the `type` key:
/// `conversation` notes become [`ConversationEntry`]s, `project-overview`
/// notes become [`ProjectEntry`]s. Document membership is resolved here and
/// only here: every `project-document` note is associated with the overview
/// sharing its directory, and the project merger consumes that single
/// index. Documents keep their source extension, so the walk cannot filter
/// to `.md`; `total_files` still counts markdown files only.
///
/// A nonexistent `root` yields an empty index rather than an error.
pub fn scan_vault(root: &Path) -> Result<VaultIndex> {
    let mut index = VaultIndex::default();
    if !root.exists() {
        return Ok(index);
    }

    // Overviews and documents can be visited in any order, so collect both
    // during the walk and join them by directory afterwards.
    let mut overviews: Vec<(PathBuf, Frontmatter)> = Vec::new();
    let mut documents_by_dir: HashMap<PathBuf, Vec<DocumentEntry>> = HashMap::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Warning: Failed to walk vault entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let is_markdown = path.extension().and_then(|e| e.to_str()) == Some("md");
        if is_markdown {
            index.total_files += 1;
        }

        // Unreadable non-markdown files (binaries, attachments) are normal
        // vault residents; only warn for markdown.
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                if is_markdown {
                    eprintln!("Warning: Failed to read note {}: {}", path.display(), e);
                }
                continue;
            }
        };

        let parsed = frontmatter::parse(&text);
        if !parsed.present {
            // Unmanaged markdown; not part of the index.
            continue;
        }
        let fm = parsed.frontmatter;

        let note_type = fm.get(KEY_TYPE).unwrap_or_default().to_string();
        match note_type.as_str() {
            TYPE_CONVERSATION => {
                let Some(uuid) = nonempty(fm.get(KEY_UUID)) else {
                    eprintln!("Warning: Skipping {} (conversation without uuid)", path.display());
                    continue;
                };
                index.conversations.insert(
                    uuid.clone(),
                    ConversationEntry {
                        path: path.to_path_buf(),
                        uuid,
                        updated_at: fm.get(KEY_UPDATED_AT).unwrap_or_default().to_string(),
                        obsidized_at: fm.get(KEY_OBSIDIZED_AT).map(str::to_string),
                    },
                );
            }
            TYPE_PROJECT_OVERVIEW => {
                if nonempty(fm.get(KEY_UUID)).is_none() {
                    eprintln!("Warning: Skipping {} (overview without uuid)", path.display());
                    continue;
                }
                overviews.push((path.to_path_buf(), fm));
            }
            TYPE_PROJECT_DOCUMENT => {
                let Some(uuid) = nonempty(fm.get(KEY_UUID)) else {
                    eprintln!("Warning: Skipping {} (document without uuid)", path.display());
                    continue;
                };
                let Some(parent) = path.parent() else {
                    continue;
                };
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                documents_by_dir.entry(parent.to_path_buf()).or_default().push(DocumentEntry {
                    uuid,
                    index: parse_index_prefix(&filename),
                    filename,
                    created_at: fm.get(KEY_CREATED_AT).unwrap_or_default().to_string(),
                });
            }
            _ => {
                // Managed-looking note of an unknown type; leave it alone.
            }
        }
    }

    for (overview_path, fm) in overviews {
        let Some(dir) = overview_path.parent().map(Path::to_path_buf) else {
            continue;
        };
        let mut documents = documents_by_dir.remove(&dir).unwrap_or_default();
        documents.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.filename.cmp(&b.filename)));

        // uuid presence was checked during the walk
        let uuid = fm.get(KEY_UUID).unwrap_or_default().to_string();
        index.projects.insert(
            uuid.clone(),
            ProjectEntry {
                dir,
                overview_path,
                uuid,
                updated_at: fm.get(KEY_UPDATED_AT).unwrap_or_default().to_string(),
                obsidized_at: fm.get(KEY_OBSIDIZED_AT).map(str::to_string),
                documents,
            },
        );
    }

    Ok(index)
}

fn nonempty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
