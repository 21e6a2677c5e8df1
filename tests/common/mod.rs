//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use obsidize::models::{Document, ImportConversation, ImportProject, Message};
use tempfile::TempDir;

/// A temporary vault root for exercising full import runs
pub struct VaultBuilder {
    temp_dir: TempDir,
}

impl VaultBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Drop a raw markdown file into the vault root
    pub fn with_note(self, name: &str, content: &str) -> Self {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write note");
        self
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for VaultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for import conversation records
pub struct ConversationBuilder {
    uuid: String,
    name: Option<String>,
    created_at: String,
    updated_at: String,
    messages: Vec<Message>,
}

impl ConversationBuilder {
    pub fn new(uuid: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: None,
            created_at: "2025-08-01T00:00:00Z".to_string(),
            updated_at: "2025-08-01T00:00:00Z".to_string(),
            messages: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn updated_at(mut self, updated_at: &str) -> Self {
        self.updated_at = updated_at.to_string();
        self
    }

    pub fn message(mut self, question: &str, answer: &str, create_time: &str) -> Self {
        self.messages.push(Message {
            question: question.to_string(),
            answer: answer.to_string(),
            create_time: create_time.to_string(),
        });
        self
    }

    pub fn build(self) -> ImportConversation {
        ImportConversation {
            uuid: self.uuid,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            messages: self.messages,
        }
    }
}

/// Builder for import project records
pub struct ProjectBuilder {
    uuid: String,
    name: String,
    description: String,
    created_at: String,
    updated_at: String,
    documents: Vec<Document>,
}

impl ProjectBuilder {
    pub fn new(uuid: &str, name: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: name.to_string(),
            description: String::new(),
            created_at: "2025-08-01T00:00:00Z".to_string(),
            updated_at: "2025-08-01T00:00:00Z".to_string(),
            documents: Vec::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn updated_at(mut self, updated_at: &str) -> Self {
        self.updated_at = updated_at.to_string();
        self
    }

    pub fn document(mut self, uuid: &str, filename: &str, content: &str, created_at: &str) -> Self {
        self.documents.push(Document {
            uuid: uuid.to_string(),
            filename: filename.to_string(),
            content: content.to_string(),
            created_at: created_at.to_string(),
        });
        self
    }

    pub fn build(self) -> ImportProject {
        ImportProject {
            uuid: self.uuid,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
            documents: self.documents,
        }
    }
}

/// Read every file under `root` into (relative path, content) pairs,
/// sorted by path, for whole-vault byte comparisons
pub fn snapshot_vault(root: &Path) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files);
    files.sort();
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap().to_path_buf();
            let content = fs::read_to_string(&path).unwrap_or_default();
            files.push((relative, content));
        }
    }
}
