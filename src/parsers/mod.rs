//! Export loaders for the bulk data export
//!
//! # Error Handling Strategy
//!
//! The loader is the validation collaborator in front of the reconciliation
//! core: everything downstream assumes records with a non-blank uuid and a
//! parseable `created_at`, so that is enforced here and only here.
//!
//! - **Missing export files**: `conversations.json` or `projects.json` not
//!   being present is a warning plus an empty list, not an error -- partial
//!   exports are common.
//! - **Record-level failures**: a record failing validation is dropped and
//!   becomes one human-readable problem string surfaced to the caller; it
//!   never aborts the run.
//! - **File-level failures**: an export file that is not valid JSON at all
//!   propagates as an `anyhow` error with path context. There is nothing to
//!   salvage from it.

pub mod export;

pub use export::{ExportData, load_export};
