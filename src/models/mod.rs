//! Data models for the import pipeline.
//!
//! Two families of types live here:
//!
//! - [`ImportConversation`] / [`ImportProject`] - transient records built
//!   fresh each run from the export files by the loader in `parsers`
//! - [`ConversationEntry`] / [`ProjectEntry`] - prior import state recovered
//!   from the vault by the indexer at the start of each run
//!
//! All timestamps are carried as the raw strings found in the export or in
//! note frontmatter and parsed lazily; the planner and the mergers each
//! define their own behavior for unparsable values.

pub mod import;
pub mod vault;

pub use import::{Document, ImportConversation, ImportProject, Message};
pub use vault::{ConversationEntry, DocumentEntry, ProjectEntry, VaultIndex};
