//! Approval workflow — the review gate between a drafted campaign and its
//! multi-channel launch, plus the append-only audit trail of decisions.
//!
//! State machine: Draft -> PendingReview -> { Active, Draft (failed launch
//! or needs changes), Rejected (terminal) }. Active <-> Paused is handled
//! by separate lifecycle actions outside this gate.

use crate::orchestrator::LaunchOrchestrator;
use crate::store::CampaignStore;
use crate::validator;
use launchgate_core::channels::LaunchResult;
use launchgate_core::config::LaunchConfig;
use launchgate_core::error::{WorkflowError, WorkflowResult};
use launchgate_core::notify::Notifier;
use launchgate_core::profile::ProfileReader;
use launchgate_core::types::{
    ApprovalRecord, ApprovalStatus, CampaignStatus, LaunchOptions, ValidationReport,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const MIN_FEEDBACK_LEN: usize = 10;

/// Result of a submit call. Validation failures are a normal outcome, not
/// an error: the report comes back and nothing mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Accepted {
        approval_id: Uuid,
        estimated_review_hours: u32,
    },
    Invalid(ValidationReport),
}

/// Reviewer inputs for an approve call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApproveOptions {
    pub review_notes: Option<String>,
    #[serde(default)]
    pub launch: LaunchOptions,
}

/// Reviewer inputs for a reject call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    pub feedback: String,
    #[serde(default)]
    pub reasons: Vec<String>,
    /// Send the campaign back to Draft for edits instead of terminally
    /// rejecting it.
    pub needs_changes: bool,
}

/// What an approve call hands back: the audit record, the full per-channel
/// launch result, and where the campaign landed. The call succeeding does
/// NOT mean every channel launched; callers must inspect
/// `launch.overall_success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub approval: ApprovalRecord,
    pub launch: LaunchResult,
    pub campaign_status: CampaignStatus,
}

pub struct ApprovalWorkflow {
    store: Arc<CampaignStore>,
    orchestrator: LaunchOrchestrator,
    profiles: Arc<dyn ProfileReader>,
    notifier: Arc<dyn Notifier>,
    config: LaunchConfig,
}

impl ApprovalWorkflow {
    pub fn new(
        store: Arc<CampaignStore>,
        orchestrator: LaunchOrchestrator,
        profiles: Arc<dyn ProfileReader>,
        notifier: Arc<dyn Notifier>,
        config: LaunchConfig,
    ) -> Self {
        Self {
            store,
            orchestrator,
            profiles,
            notifier,
            config,
        }
    }

    // ─── Submit ────────────────────────────────────────────────────────────

    /// Submit a draft campaign for review. Runs the content validator; an
    /// invalid campaign gets its report back with zero state mutation. A
    /// valid one transitions to PendingReview with a fresh approval record
    /// in the same commit.
    pub fn submit(&self, campaign_id: Uuid, submitter_id: Uuid) -> WorkflowResult<SubmitOutcome> {
        let campaign = self
            .store
            .get(campaign_id)
            .ok_or(WorkflowError::NotFound(campaign_id))?;

        if campaign.status != CampaignStatus::Draft {
            return Err(WorkflowError::StateConflict(format!(
                "campaign {campaign_id} is {:?}, submit requires draft",
                campaign.status
            )));
        }

        let report = validator::validate(&campaign);
        if !report.ok {
            info!(
                campaign_id = %campaign_id,
                errors = report.errors.len(),
                "Submission blocked by validation"
            );
            return Ok(SubmitOutcome::Invalid(report));
        }

        let record = self.store.submit_transaction(campaign_id, submitter_id)?;
        metrics::counter!("workflow.submitted").increment(1);

        let estimated_review_hours = if campaign.budget > self.config.high_budget_threshold {
            self.config.review_window_hours * 2
        } else {
            self.config.review_window_hours
        };

        info!(
            campaign_id = %campaign_id,
            approval_id = %record.id,
            review_hours = estimated_review_hours,
            "Campaign submitted for review"
        );

        self.notify_send(
            "campaign_submitted",
            campaign.owner_id,
            json!({
                "campaign_id": campaign_id,
                "approval_id": record.id,
                "estimated_review_hours": estimated_review_hours,
                "warnings": report.warnings,
            }),
        );
        self.notify_in_app(
            campaign.owner_id,
            "review_submitted",
            "Campaign submitted for review",
            &format!(
                "\"{}\" is in review. Estimated review time: {estimated_review_hours} hours.",
                campaign.name
            ),
            json!({ "campaign_id": campaign_id }),
        );

        Ok(SubmitOutcome::Accepted {
            approval_id: record.id,
            estimated_review_hours,
        })
    }

    // ─── Approve ───────────────────────────────────────────────────────────

    /// Approve a pending campaign and launch it on every selected channel.
    ///
    /// The call succeeds even when channels fail; per-channel outcomes are
    /// in the returned launch result. Full success activates the campaign,
    /// anything less returns it to Draft while keeping the references of
    /// the channels that did launch.
    pub async fn approve(
        &self,
        campaign_id: Uuid,
        reviewer_id: Uuid,
        options: ApproveOptions,
    ) -> WorkflowResult<ApprovalDecision> {
        let campaign = self.store.claim_decision(campaign_id)?;

        let enrichment = self.profiles.owner_profile(campaign.owner_id);
        if enrichment.is_none() {
            warn!(
                campaign_id = %campaign_id,
                owner_id = %campaign.owner_id,
                "No owner profile available; launching without enrichment"
            );
        }

        let launch = self
            .orchestrator
            .launch(&campaign, enrichment.as_ref(), &options.launch)
            .await;

        let new_status = if launch.overall_success {
            CampaignStatus::Active
        } else {
            CampaignStatus::Draft
        };
        let external_refs: Vec<_> = launch
            .channel_results
            .iter()
            .filter_map(|(channel, outcome)| {
                outcome
                    .external_id
                    .as_ref()
                    .map(|id| (*channel, id.clone()))
            })
            .collect();

        let launch_for_record = launch.clone();
        let review_notes = options.review_notes.clone();
        let record = self
            .store
            .commit_decision(campaign_id, new_status, external_refs, move |record| {
                record.status = ApprovalStatus::Approved;
                record.reviewed_by = Some(reviewer_id);
                record.reviewed_at = Some(Utc::now());
                record.review_notes = review_notes;
                record.launch_result = Some(launch_for_record);
            })
            .map_err(|e| {
                // The launch already ran; the caller must not lose it.
                WorkflowError::Persistence(format!(
                    "failed to commit approval for campaign {campaign_id}: {e}; \
                     launch outcomes may need manual reconciliation"
                ))
            })?;

        metrics::counter!("workflow.approved").increment(1);
        if !launch.overall_success {
            metrics::counter!("workflow.partial_launches").increment(1);
        }

        info!(
            campaign_id = %campaign_id,
            reviewer_id = %reviewer_id,
            overall_success = launch.overall_success,
            status = ?new_status,
            "Approval decision committed"
        );

        if launch.overall_success {
            self.notify_send(
                "campaign_launched",
                campaign.owner_id,
                json!({ "campaign_id": campaign_id, "channels": campaign.channel_selection }),
            );
            self.notify_in_app(
                campaign.owner_id,
                "campaign_launched",
                "Campaign approved and launched",
                &format!("\"{}\" is now live on all selected channels.", campaign.name),
                json!({ "campaign_id": campaign_id }),
            );
        } else {
            let failed = launch.failed_channels();
            self.notify_send(
                "campaign_launch_partial",
                campaign.owner_id,
                json!({
                    "campaign_id": campaign_id,
                    "failed_channels": failed,
                    "channel_results": launch.channel_results,
                }),
            );
            self.notify_in_app(
                campaign.owner_id,
                "campaign_launch_partial",
                "Campaign approved, launch incomplete",
                &format!(
                    "\"{}\" was approved but {} channel(s) failed to launch. \
                     The campaign is back in draft.",
                    campaign.name,
                    failed.len()
                ),
                json!({ "campaign_id": campaign_id }),
            );
        }

        Ok(ApprovalDecision {
            approval: record,
            launch,
            campaign_status: new_status,
        })
    }

    // ─── Reject ────────────────────────────────────────────────────────────

    /// Reject a pending campaign, either terminally or back to Draft for
    /// changes. Feedback is mandatory and validated before any state is
    /// touched.
    pub fn reject(
        &self,
        campaign_id: Uuid,
        reviewer_id: Uuid,
        rejection: Rejection,
    ) -> WorkflowResult<ApprovalRecord> {
        if rejection.feedback.trim().len() < MIN_FEEDBACK_LEN {
            return Err(WorkflowError::Validation(format!(
                "review feedback must be at least {MIN_FEEDBACK_LEN} characters"
            )));
        }

        let campaign = self.store.claim_decision(campaign_id)?;

        let (new_status, record_status) = if rejection.needs_changes {
            (CampaignStatus::Draft, ApprovalStatus::NeedsChanges)
        } else {
            (CampaignStatus::Rejected, ApprovalStatus::Rejected)
        };

        let feedback = rejection.feedback.clone();
        let reasons = rejection.reasons.clone();
        let record =
            self.store
                .commit_decision(campaign_id, new_status, Vec::new(), move |record| {
                    record.status = record_status;
                    record.reviewed_by = Some(reviewer_id);
                    record.reviewed_at = Some(Utc::now());
                    record.review_notes = Some(feedback);
                    record.rejection_reasons = reasons;
                })?;

        metrics::counter!("workflow.rejected").increment(1);
        info!(
            campaign_id = %campaign_id,
            reviewer_id = %reviewer_id,
            needs_changes = rejection.needs_changes,
            "Campaign rejected"
        );

        let (kind, title) = if rejection.needs_changes {
            ("review_needs_changes", "Campaign needs changes")
        } else {
            ("review_rejected", "Campaign rejected")
        };
        self.notify_send(
            kind,
            campaign.owner_id,
            json!({
                "campaign_id": campaign_id,
                "reasons": rejection.reasons,
                "feedback": rejection.feedback,
            }),
        );
        self.notify_in_app(
            campaign.owner_id,
            kind,
            title,
            &rejection.feedback,
            json!({ "campaign_id": campaign_id }),
        );

        Ok(record)
    }

    // ─── History ───────────────────────────────────────────────────────────

    /// All approval records for a campaign, most recent first.
    pub fn get_history(&self, campaign_id: Uuid) -> Vec<ApprovalRecord> {
        self.store.history(campaign_id)
    }

    /// Status of the latest review cycle, or `None` for a never-submitted
    /// campaign.
    pub fn current_approval_status(&self, campaign_id: Uuid) -> Option<ApprovalStatus> {
        self.store.current_approval_status(campaign_id)
    }

    // ─── Notification plumbing ─────────────────────────────────────────────

    fn notify_send(&self, event_type: &str, recipient: Uuid, data: serde_json::Value) {
        if let Err(e) = self.notifier.send(event_type, recipient, data) {
            warn!(event_type, error = %e, "Notification send failed");
        }
    }

    fn notify_in_app(
        &self,
        user_id: Uuid,
        kind: &str,
        title: &str,
        message: &str,
        data: serde_json::Value,
    ) {
        if let Err(e) = self.notifier.create_in_app(user_id, kind, title, message, data) {
            warn!(kind, error = %e, "In-app notification failed");
        }
    }
}
