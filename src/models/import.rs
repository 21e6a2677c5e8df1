use serde::Deserialize;

/// One conversation from the export, already validated by the loader
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConversation {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A question/answer exchange inside a conversation
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub create_time: String,
}

/// One project from the export, already validated by the loader
#[derive(Debug, Clone, Deserialize)]
pub struct ImportProject {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, rename = "docs")]
    pub documents: Vec<Document>,
}

/// A document attached to a project
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}
