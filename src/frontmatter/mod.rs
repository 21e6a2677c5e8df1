//! Flat frontmatter codec for managed vault notes
//!
//! Managed notes carry a `---`-delimited header of flat `key: value` lines.
//! This is an intentional subset of YAML: values are literal text with no
//! escaping or nesting, so the codec is a pure line-oriented text operation
//! with no structured-markup dependency.
//!
//! The codec is the only component that touches header text. Everything else
//! goes through [`Frontmatter`], which preserves key order so that keys a
//! user added by hand survive a merge in their original position.

pub mod codec;

pub use codec::{
    Frontmatter, KEY_CREATED_AT, KEY_OBSIDIZED_AT, KEY_PROJECT, KEY_TAGS, KEY_TYPE,
    KEY_UPDATED_AT, KEY_UUID, KEY_VERSION, ParsedNote, TYPE_CONVERSATION, TYPE_PROJECT_DOCUMENT,
    TYPE_PROJECT_OVERVIEW, parse, substitute_fields,
};
