//! In-memory campaign store backed by DashMap — the persistence
//! collaborator for the review workflow.
//!
//! Production: replace with PostgreSQL (sqlx) or similar ACID store. The
//! API surface is transactional: a status transition and its approval
//! record commit together, and review decisions are fenced by a
//! compare-and-set claim per campaign.

use dashmap::DashMap;
use launchgate_core::channels::Channel;
use launchgate_core::error::{WorkflowError, WorkflowResult};
use launchgate_core::types::{ApprovalRecord, ApprovalStatus, Campaign, CampaignStatus};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

pub struct CampaignStore {
    campaigns: DashMap<Uuid, Campaign>,
    /// campaign_id -> approval records, append-only, oldest first.
    approvals: DashMap<Uuid, Vec<ApprovalRecord>>,
    /// Campaigns with a review decision currently in flight. Fences
    /// concurrent approve/reject without holding a shard lock across
    /// adapter awaits.
    in_flight: DashMap<Uuid, ()>,
}

impl CampaignStore {
    pub fn new() -> Self {
        info!("Campaign store initialized (in-memory, development mode)");
        Self {
            campaigns: DashMap::new(),
            approvals: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn insert(&self, campaign: Campaign) {
        self.campaigns.insert(campaign.id, campaign);
    }

    pub fn get(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.get(&id).map(|r| r.value().clone())
    }

    pub fn list(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> =
            self.campaigns.iter().map(|r| r.value().clone()).collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        campaigns
    }

    // ─── Submission ────────────────────────────────────────────────────────

    /// Transition Draft -> PendingReview and append the new cycle's
    /// approval record as one unit. Fails with no mutation when the
    /// campaign is not in Draft.
    pub fn submit_transaction(
        &self,
        campaign_id: Uuid,
        submitted_by: Uuid,
    ) -> WorkflowResult<ApprovalRecord> {
        let mut entry = self
            .campaigns
            .get_mut(&campaign_id)
            .ok_or(WorkflowError::NotFound(campaign_id))?;
        let campaign = entry.value_mut();

        if campaign.status != CampaignStatus::Draft {
            return Err(WorkflowError::StateConflict(format!(
                "campaign {campaign_id} is {:?}, submit requires draft",
                campaign.status
            )));
        }

        let record = ApprovalRecord::pending(campaign, submitted_by);
        campaign.status = CampaignStatus::PendingReview;
        campaign.updated_at = Utc::now();

        // Record append happens under the campaign entry guard, so the
        // status change and the record are never observable apart.
        self.approvals
            .entry(campaign_id)
            .or_default()
            .push(record.clone());

        Ok(record)
    }

    // ─── Review decisions ──────────────────────────────────────────────────

    /// Atomically claim the campaign for a review decision. The campaign
    /// must be PendingReview and not already claimed; the losing side of a
    /// concurrent decision gets a state conflict.
    pub fn claim_decision(&self, campaign_id: Uuid) -> WorkflowResult<Campaign> {
        let entry = self
            .campaigns
            .get(&campaign_id)
            .ok_or(WorkflowError::NotFound(campaign_id))?;
        let campaign = entry.value();

        if campaign.status != CampaignStatus::PendingReview {
            return Err(WorkflowError::StateConflict(format!(
                "campaign {campaign_id} is {:?}, review decisions require pending_review",
                campaign.status
            )));
        }
        if self.in_flight.insert(campaign_id, ()).is_some() {
            return Err(WorkflowError::StateConflict(format!(
                "a review decision for campaign {campaign_id} is already in progress"
            )));
        }

        Ok(campaign.clone())
    }

    /// Abort path for a claimed decision that could not be committed.
    pub fn release_claim(&self, campaign_id: Uuid) {
        self.in_flight.remove(&campaign_id);
    }

    /// Commit a claimed review decision: the status write, the append-only
    /// merge of external references, and the cycle record update apply
    /// together. Clears the claim regardless of outcome.
    pub fn commit_decision(
        &self,
        campaign_id: Uuid,
        new_status: CampaignStatus,
        external_refs: Vec<(Channel, String)>,
        update_record: impl FnOnce(&mut ApprovalRecord),
    ) -> WorkflowResult<ApprovalRecord> {
        let result = self.apply_decision(campaign_id, new_status, external_refs, update_record);
        self.in_flight.remove(&campaign_id);
        result
    }

    fn apply_decision(
        &self,
        campaign_id: Uuid,
        new_status: CampaignStatus,
        external_refs: Vec<(Channel, String)>,
        update_record: impl FnOnce(&mut ApprovalRecord),
    ) -> WorkflowResult<ApprovalRecord> {
        let mut entry = self
            .campaigns
            .get_mut(&campaign_id)
            .ok_or(WorkflowError::NotFound(campaign_id))?;
        let campaign = entry.value_mut();

        let mut records = self.approvals.entry(campaign_id).or_default();
        let record = records.last_mut().ok_or_else(|| {
            WorkflowError::Persistence(format!(
                "no approval record for campaign {campaign_id}'s current cycle"
            ))
        })?;

        campaign.status = new_status;
        campaign.updated_at = Utc::now();
        // Progress is append-only: a launch that succeeded in an earlier
        // attempt keeps its reference even if this attempt failed there.
        for (channel, external_id) in external_refs {
            campaign
                .external_references
                .entry(channel)
                .or_insert(external_id);
        }

        update_record(record);
        Ok(record.clone())
    }

    // ─── History ───────────────────────────────────────────────────────────

    /// All approval records for a campaign, most recent first.
    pub fn history(&self, campaign_id: Uuid) -> Vec<ApprovalRecord> {
        let mut records = self
            .approvals
            .get(&campaign_id)
            .map(|v| v.clone())
            .unwrap_or_default();
        // Stored oldest-first; cycles are strictly ordered by submission.
        records.reverse();
        records
    }

    /// Status of the most recent approval record, or `None` when the
    /// campaign was never submitted.
    pub fn current_approval_status(&self, campaign_id: Uuid) -> Option<ApprovalStatus> {
        self.approvals
            .get(&campaign_id)
            .and_then(|v| v.last().map(|r| r.status))
    }
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchgate_core::types::CampaignObjective;

    fn draft_campaign() -> Campaign {
        Campaign::draft(
            Uuid::new_v4(),
            "Store Test Campaign",
            500.0,
            "an audience long enough to pass",
            vec![CampaignObjective::Conversions],
            vec![Channel::Meta],
        )
    }

    #[test]
    fn submit_transaction_writes_status_and_record_together() {
        let store = CampaignStore::new();
        let campaign = draft_campaign();
        let id = campaign.id;
        store.insert(campaign);

        let submitter = Uuid::new_v4();
        let record = store.submit_transaction(id, submitter).unwrap();
        assert_eq!(record.status, ApprovalStatus::PendingReview);
        assert_eq!(record.submitted_by, submitter);

        assert_eq!(store.get(id).unwrap().status, CampaignStatus::PendingReview);
        assert_eq!(store.history(id).len(), 1);
    }

    #[test]
    fn submit_transaction_rejects_non_draft_without_mutation() {
        let store = CampaignStore::new();
        let mut campaign = draft_campaign();
        campaign.status = CampaignStatus::Active;
        let id = campaign.id;
        store.insert(campaign);

        let err = store.submit_transaction(id, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, WorkflowError::StateConflict(_)));
        assert_eq!(store.history(id).len(), 0);
        assert_eq!(store.get(id).unwrap().status, CampaignStatus::Active);
    }

    #[test]
    fn second_claim_conflicts_until_commit() {
        let store = CampaignStore::new();
        let campaign = draft_campaign();
        let id = campaign.id;
        store.insert(campaign);
        store.submit_transaction(id, Uuid::new_v4()).unwrap();

        store.claim_decision(id).unwrap();
        let err = store.claim_decision(id).unwrap_err();
        assert!(matches!(err, WorkflowError::StateConflict(_)));

        store
            .commit_decision(id, CampaignStatus::Active, Vec::new(), |r| {
                r.status = ApprovalStatus::Approved;
            })
            .unwrap();

        // Claim cleared, but the campaign is no longer pending.
        let err = store.claim_decision(id).unwrap_err();
        assert!(matches!(err, WorkflowError::StateConflict(_)));
    }

    #[test]
    fn external_references_merge_is_append_only() {
        let store = CampaignStore::new();
        let campaign = draft_campaign();
        let id = campaign.id;
        store.insert(campaign);

        store.submit_transaction(id, Uuid::new_v4()).unwrap();
        store.claim_decision(id).unwrap();
        store
            .commit_decision(
                id,
                CampaignStatus::Draft,
                vec![(Channel::Meta, "ext-123".to_string())],
                |r| r.status = ApprovalStatus::Approved,
            )
            .unwrap();

        // Second cycle fails on Meta; the earlier reference survives.
        store.submit_transaction(id, Uuid::new_v4()).unwrap();
        store.claim_decision(id).unwrap();
        store
            .commit_decision(
                id,
                CampaignStatus::Draft,
                vec![(Channel::Meta, "ext-overwrite".to_string())],
                |r| r.status = ApprovalStatus::Approved,
            )
            .unwrap();

        let campaign = store.get(id).unwrap();
        assert_eq!(
            campaign.external_references.get(&Channel::Meta),
            Some(&"ext-123".to_string())
        );
    }

    #[test]
    fn history_is_most_recent_first() {
        let store = CampaignStore::new();
        let campaign = draft_campaign();
        let id = campaign.id;
        store.insert(campaign);

        let first = store.submit_transaction(id, Uuid::new_v4()).unwrap();
        store.claim_decision(id).unwrap();
        store
            .commit_decision(id, CampaignStatus::Draft, Vec::new(), |r| {
                r.status = ApprovalStatus::NeedsChanges;
            })
            .unwrap();
        let second = store.submit_transaction(id, Uuid::new_v4()).unwrap();

        let history = store.history(id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
        assert_eq!(
            store.current_approval_status(id),
            Some(ApprovalStatus::PendingReview)
        );
    }

    #[test]
    fn unknown_campaign_is_not_found() {
        let store = CampaignStore::new();
        let err = store.claim_decision(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));
    }
}
