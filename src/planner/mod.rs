//! Update planning
//!
//! The planner compares the recovered vault index against the incoming
//! records and classifies every record into create-new, update-existing or
//! no-update. The resulting [`UpdatePlan`](classify::UpdatePlan) is the sole
//! basis for both the dry-run preview and the write pass: the write pass
//! iterates the plan and nothing else, so it cannot discover work the
//! preview did not show.
//!
//! Unparsable timestamps classify as update-existing (fail open): an
//! unnecessary re-check by a merger is harmless, silently missing an update
//! is not.

pub mod classify;

pub use classify::{PlanSummary, PlannedRecord, UpdateAction, UpdatePlan, classify, plan_updates};
