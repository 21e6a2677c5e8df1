use std::collections::HashMap;
use std::path::PathBuf;

/// A previously-imported conversation recovered from its note's frontmatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub path: PathBuf,
    pub uuid: String,
    /// Raw `updated_at` value as recorded in the note
    pub updated_at: String,
    /// Raw `obsidized_at` watermark; `None` when the key is missing
    pub obsidized_at: Option<String>,
}

/// A previously-imported project recovered from its overview note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub dir: PathBuf,
    pub overview_path: PathBuf,
    pub uuid: String,
    pub updated_at: String,
    pub obsidized_at: Option<String>,
    /// Documents co-located in the project directory, sorted by recovered index
    pub documents: Vec<DocumentEntry>,
}

impl ProjectEntry {
    /// Highest document index recovered from `NNN_` filename prefixes, or 0
    pub fn highest_index(&self) -> u32 {
        self.documents.iter().map(|d| d.index).max().unwrap_or(0)
    }

    pub fn contains_document(&self, uuid: &str) -> bool {
        self.documents.iter().any(|d| d.uuid == uuid)
    }
}

/// One `project-document` note co-located with a project overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub uuid: String,
    /// On-disk filename, including the `NNN_` prefix and extension
    pub filename: String,
    /// Index recovered from the `NNN_` prefix; 0 when the prefix is absent
    pub index: u32,
    /// Raw `created_at` value from the document's own frontmatter
    pub created_at: String,
}

/// Prior import state recovered by scanning the vault, keyed by uuid
///
/// Exists only in memory for the duration of one run; the durable record of
/// state is the note files themselves.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    pub conversations: HashMap<String, ConversationEntry>,
    pub projects: HashMap<String, ProjectEntry>,
    /// Total markdown files seen during the scan, managed or not
    pub total_files: usize,
}
