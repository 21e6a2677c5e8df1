//! Vault index building
//!
//! # Error Handling Strategy
//!
//! The scanner recovers prior import state by re-parsing the vault itself;
//! there is no side database, so a note that cannot be read or understood
//! simply contributes no state:
//!
//! - **Nonexistent vault root**: returns an empty index, not an error --
//!   a first run against a fresh vault is the normal case.
//! - **Unreadable files / walk errors**: logged as warnings to stderr and
//!   skipped, allowing partial index recovery.
//! - **Notes without a frontmatter block**: excluded silently. Unmanaged
//!   markdown living in the vault is expected, not a defect.
//! - **Managed notes missing a uuid**: warned about and skipped; without an
//!   identity key they cannot participate in reconciliation.

pub mod scanner;

pub use scanner::scan_vault;
