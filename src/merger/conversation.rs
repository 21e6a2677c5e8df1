use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::frontmatter::{
    self, Frontmatter, KEY_CREATED_AT, KEY_OBSIDIZED_AT, KEY_TAGS, KEY_TYPE, KEY_UPDATED_AT,
    KEY_UUID, KEY_VERSION, TYPE_CONVERSATION,
};
use crate::merger::PlannedWrite;
use crate::models::{ConversationEntry, ImportConversation, Message};
use crate::utils::{format_timestamp, parse_timestamp, sanitize_filename};

pub const FALLBACK_QUESTION: &str = "(no question)";
pub const FALLBACK_ANSWER: &str = "(no answer)";
pub const FALLBACK_TIME: &str = "(unknown time)";
pub const FALLBACK_TITLE: &str = "untitled";
pub const FALLBACK_DATE: &str = "undated";

const TITLE_TOKEN_LIMIT: usize = 6;

/// Result of merging one conversation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationMerge {
    Created(PlannedWrite),
    Appended(PlannedWrite),
    UpToDate,
    /// The existing note could not be trusted; nothing is written
    Skipped { path: PathBuf, reason: String },
}

/// Merge one conversation record into the vault
///
/// With no existing entry a fresh note is rendered. With an entry, new
/// messages are appended after the existing text; the pre-merge content
/// stays a byte prefix of the post-merge content except for the two
/// substituted header fields. `now` becomes the new `obsidized_at`
/// watermark and is injected for testability.
pub fn merge_conversation(
    record: &ImportConversation,
    entry: Option<&ConversationEntry>,
    vault_root: &Path,
    tags: Option<&[String]>,
    now: DateTime<Utc>,
) -> Result<ConversationMerge> {
    match entry {
        None => Ok(ConversationMerge::Created(create_note(record, vault_root, tags, now))),
        Some(entry) => merge_into_existing(record, entry, now),
    }
}

fn create_note(
    record: &ImportConversation,
    vault_root: &Path,
    tags: Option<&[String]>,
    now: DateTime<Utc>,
) -> PlannedWrite {
    let title = conversation_title(record);
    let filename = sanitize_filename(&format!("{}__{}.md", title, record.uuid));

    let mut messages: Vec<&Message> = record.messages.iter().collect();
    sort_by_create_time(&mut messages);

    // The watermark of a fresh note is the newest message time; a record
    // with no parseable message times gets the wall clock.
    let obsidized_at = messages
        .iter()
        .filter_map(|m| parse_timestamp(&m.create_time))
        .max()
        .map(format_timestamp)
        .unwrap_or_else(|| format_timestamp(now));

    let mut fm = Frontmatter::new();
    fm.set(KEY_UUID, record.uuid.as_str());
    fm.set(KEY_TYPE, TYPE_CONVERSATION);
    fm.set(KEY_CREATED_AT, record.created_at.as_str());
    fm.set(KEY_UPDATED_AT, record.updated_at.as_str());
    fm.set(KEY_VERSION, env!("CARGO_PKG_VERSION"));
    if let Some(tags) = tags.filter(|t| !t.is_empty()) {
        fm.set(KEY_TAGS, tags.join(", "));
    }
    fm.set(KEY_OBSIDIZED_AT, obsidized_at);

    let mut content = fm.render();
    content.push_str(&format!("\n# {}\n", title));
    for message in &messages {
        content.push('\n');
        content.push_str(&message_block(message));
        content.push('\n');
    }

    PlannedWrite { path: vault_root.join(filename), content }
}

fn merge_into_existing(
    record: &ImportConversation,
    entry: &ConversationEntry,
    now: DateTime<Utc>,
) -> Result<ConversationMerge> {
    let text = fs::read_to_string(&entry.path)
        .with_context(|| format!("Failed to read note: {}", entry.path.display()))?;

    // The note itself is the source of truth for the watermark, not the
    // index: a missing or unparsable value means the note cannot be merged
    // into safely.
    let Some(watermark) = frontmatter::parse(&text).frontmatter.timestamp(KEY_OBSIDIZED_AT) else {
        return Ok(ConversationMerge::Skipped {
            path: entry.path.clone(),
            reason: "missing or unparsable obsidized_at".to_string(),
        });
    };

    let mut candidates: Vec<&Message> = record
        .messages
        .iter()
        .filter(|m| {
            parse_timestamp(&m.create_time).is_some_and(|t| t > watermark)
                && !text.contains(&message_signature(m))
        })
        .collect();

    if candidates.is_empty() {
        return Ok(ConversationMerge::UpToDate);
    }
    sort_by_create_time(&mut candidates);

    let mut content = frontmatter::substitute_fields(
        &text,
        &[
            (KEY_UPDATED_AT, record.updated_at.clone()),
            (KEY_OBSIDIZED_AT, format_timestamp(now)),
        ],
    );
    if !content.ends_with('\n') {
        content.push('\n');
    }
    for message in &candidates {
        content.push('\n');
        content.push_str(&message_block(message));
        content.push('\n');
    }

    Ok(ConversationMerge::Appended(PlannedWrite { path: entry.path.clone(), content }))
}

/// The question line of a rendered message block
///
/// Embeds both halves of the dedup signature (create_time, trimmed
/// question), so searching the note text for this line detects a message
/// that was already rendered regardless of what the watermark says.
pub fn message_signature(message: &Message) -> String {
    let time = nonblank(&message.create_time).unwrap_or(FALLBACK_TIME);
    let question = nonblank(&message.question).unwrap_or(FALLBACK_QUESTION);
    format!("**[{}] Q:** {}", time, question)
}

fn message_block(message: &Message) -> String {
    let answer = nonblank(&message.answer).unwrap_or(FALLBACK_ANSWER);
    format!("{}\n**A:** {}", message_signature(message), answer)
}

fn conversation_title(record: &ImportConversation) -> String {
    if let Some(name) = record.name.as_deref().and_then(nonblank) {
        return name.to_string();
    }
    let Some(first) = record.messages.first() else {
        return format!("{} {}", FALLBACK_DATE, FALLBACK_TITLE);
    };

    let date = first
        .create_time
        .split('T')
        .next()
        .and_then(nonblank)
        .unwrap_or(FALLBACK_DATE);
    let words: Vec<&str> =
        first.question.split_whitespace().take(TITLE_TOKEN_LIMIT).collect();
    if words.is_empty() {
        format!("{} {}", date, FALLBACK_TITLE)
    } else {
        format!("{} {}", date, words.join(" "))
    }
}

fn sort_by_create_time(messages: &mut [&Message]) {
    // Stable sort: messages without a parseable time keep import order,
    // ahead of the dated ones.
    messages.sort_by_key(|m| parse_timestamp(&m.create_time));
}

fn nonblank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
