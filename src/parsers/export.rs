use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{ImportConversation, ImportProject};
use crate::utils::parse_timestamp;

const CONVERSATIONS_FILE: &str = "conversations.json";
const PROJECTS_FILE: &str = "projects.json";

/// Validated records from one export directory
#[derive(Debug, Clone, Default)]
pub struct ExportData {
    pub conversations: Vec<ImportConversation>,
    pub projects: Vec<ImportProject>,
    /// One human-readable line per record dropped during validation
    pub problems: Vec<String>,
}

/// Load and validate `conversations.json` and `projects.json` from `dir`
///
/// A missing file yields a warning and an empty list. Records with a blank
/// uuid or an unparsable `created_at` are dropped into
/// [`ExportData::problems`]; everything the reconciliation core consumes
/// afterwards is known to satisfy its input contract.
pub fn load_export(dir: &Path) -> Result<ExportData> {
    let mut data = ExportData::default();

    let conversations_path = dir.join(CONVERSATIONS_FILE);
    if conversations_path.exists() {
        let raw: Vec<ImportConversation> = read_json(&conversations_path)?;
        for (position, record) in raw.into_iter().enumerate() {
            match validate(&record.uuid, &record.created_at, CONVERSATIONS_FILE, position) {
                Ok(()) => data.conversations.push(record),
                Err(problem) => data.problems.push(problem),
            }
        }
    } else {
        eprintln!("Warning: {} not found in {}", CONVERSATIONS_FILE, dir.display());
    }

    let projects_path = dir.join(PROJECTS_FILE);
    if projects_path.exists() {
        let raw: Vec<ImportProject> = read_json(&projects_path)?;
        for (position, record) in raw.into_iter().enumerate() {
            match validate(&record.uuid, &record.created_at, PROJECTS_FILE, position) {
                Ok(()) => data.projects.push(record),
                Err(problem) => data.problems.push(problem),
            }
        }
    } else {
        eprintln!("Warning: {} not found in {}", PROJECTS_FILE, dir.display());
    }

    Ok(data)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read export file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse export file: {}", path.display()))
}

fn validate(uuid: &str, created_at: &str, file: &str, position: usize) -> Result<(), String> {
    if uuid.trim().is_empty() {
        return Err(format!("{}: record {} has a blank uuid", file, position + 1));
    }
    if parse_timestamp(created_at).is_none() {
        return Err(format!(
            "{}: record {} ({}) has an unparsable created_at: {:?}",
            file,
            position + 1,
            uuid,
            created_at
        ));
    }
    Ok(())
}
