use crate::models::{ImportConversation, ImportProject, VaultIndex};
use crate::utils::parse_timestamp;

/// Outcome of comparing one incoming record against the vault index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    CreateNew,
    UpdateExisting,
    NoUpdate,
}

/// One incoming record paired with its classification
#[derive(Debug, Clone)]
pub struct PlannedRecord<T> {
    pub record: T,
    pub action: UpdateAction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub conversations_new: usize,
    pub conversations_updated: usize,
    pub conversations_unchanged: usize,
    pub projects_new: usize,
    pub projects_updated: usize,
    pub projects_unchanged: usize,
}

/// The full classification of one import run
#[derive(Debug, Clone, Default)]
pub struct UpdatePlan {
    pub conversations: Vec<PlannedRecord<ImportConversation>>,
    pub projects: Vec<PlannedRecord<ImportProject>>,
    pub summary: PlanSummary,
}

/// Classify one record against the watermark recovered from its note
///
/// `watermark` is the vault entry's raw `obsidized_at` value, `None` when no
/// entry exists. An unparsable watermark or `updated_at` fails open to
/// [`UpdateAction::UpdateExisting`]: the merger will re-check and no-op if
/// nothing actually changed.
pub fn classify(watermark: Option<&str>, record_updated_at: &str) -> UpdateAction {
    let Some(watermark) = watermark else {
        return UpdateAction::CreateNew;
    };
    match (parse_timestamp(watermark), parse_timestamp(record_updated_at)) {
        (Some(obsidized_at), Some(updated_at)) => {
            if obsidized_at < updated_at {
                UpdateAction::UpdateExisting
            } else {
                UpdateAction::NoUpdate
            }
        }
        _ => UpdateAction::UpdateExisting,
    }
}

/// Build the update plan for an entire import run
pub fn plan_updates(
    index: &VaultIndex,
    conversations: Vec<ImportConversation>,
    projects: Vec<ImportProject>,
) -> UpdatePlan {
    let mut plan = UpdatePlan::default();

    for record in conversations {
        let watermark = index
            .conversations
            .get(&record.uuid)
            .map(|e| e.obsidized_at.clone().unwrap_or_default());
        let action = classify(watermark.as_deref(), &record.updated_at);
        match action {
            UpdateAction::CreateNew => plan.summary.conversations_new += 1,
            UpdateAction::UpdateExisting => plan.summary.conversations_updated += 1,
            UpdateAction::NoUpdate => plan.summary.conversations_unchanged += 1,
        }
        plan.conversations.push(PlannedRecord { record, action });
    }

    for record in projects {
        let watermark =
            index.projects.get(&record.uuid).map(|e| e.obsidized_at.clone().unwrap_or_default());
        let action = classify(watermark.as_deref(), &record.updated_at);
        match action {
            UpdateAction::CreateNew => plan.summary.projects_new += 1,
            UpdateAction::UpdateExisting => plan.summary.projects_updated += 1,
            UpdateAction::NoUpdate => plan.summary.projects_unchanged += 1,
        }
        plan.projects.push(PlannedRecord { record, action });
    }

    plan
}
