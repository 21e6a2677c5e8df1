//! Import orchestration
//!
//! One run is a single sequential pass: scan the vault, plan updates,
//! merge each planned record, apply the planned writes. The write pass
//! iterates the plan and nothing else, and dry-run skips the apply step
//! entirely -- nothing is written and reverted.
//!
//! There is no retry policy and no cross-item transaction: a failed write
//! propagates immediately and notes written earlier in the run stay on disk.

pub mod runner;

pub use runner::{ImportOptions, ImportSummary, run_import, run_import_at};
