//! Campaign review domain types — campaigns, creatives, approval records.

use crate::channels::{Channel, LaunchResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ─── Campaign ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    PendingReview,
    Active,
    Paused,
    Rejected,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignObjective {
    LeadGeneration,
    BrandAwareness,
    WebsiteTraffic,
    Conversions,
    Engagement,
}

impl CampaignObjective {
    pub fn display_name(&self) -> &'static str {
        match self {
            CampaignObjective::LeadGeneration => "Lead Generation",
            CampaignObjective::BrandAwareness => "Brand Awareness",
            CampaignObjective::WebsiteTraffic => "Website Traffic",
            CampaignObjective::Conversions => "Conversions",
            CampaignObjective::Engagement => "Engagement",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub budget: f64,
    pub target_audience: String,
    pub objectives: Vec<CampaignObjective>,
    pub channel_selection: Vec<Channel>,
    pub creatives: Vec<Creative>,
    pub status: CampaignStatus,
    /// Platform-assigned campaign ids, keyed by channel. Populated only for
    /// channels that succeeded; entries survive later failed relaunches.
    #[serde(default)]
    pub external_references: HashMap<Channel, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// New draft campaign owned by `owner_id`.
    pub fn draft(
        owner_id: Uuid,
        name: impl Into<String>,
        budget: f64,
        target_audience: impl Into<String>,
        objectives: Vec<CampaignObjective>,
        channel_selection: Vec<Channel>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            budget,
            target_audience: target_audience.into(),
            objectives,
            channel_selection,
            creatives: Vec::new(),
            status: CampaignStatus::Draft,
            external_references: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Primary objective, defaulting to conversions when none is set.
    pub fn primary_objective(&self) -> CampaignObjective {
        self.objectives
            .first()
            .copied()
            .unwrap_or(CampaignObjective::Conversions)
    }
}

// ─── Creative ──────────────────────────────────────────────────────────────

/// A single ad creative. Immutable once referenced by a launched channel
/// campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creative {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub headline: String,
    pub description: String,
    pub call_to_action: String,
    pub image_url: Option<String>,
}

// ─── Approval records ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    PendingReview,
    Approved,
    Rejected,
    NeedsChanges,
}

/// Copy of the reviewed fields taken at submission time, so the audit trail
/// reflects what the reviewer actually saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSnapshot {
    pub budget: f64,
    pub channel_selection: Vec<Channel>,
    pub creative_count: usize,
    pub target_audience: String,
    pub objectives: Vec<CampaignObjective>,
}

impl ReviewSnapshot {
    pub fn of(campaign: &Campaign) -> Self {
        Self {
            budget: campaign.budget,
            channel_selection: campaign.channel_selection.clone(),
            creative_count: campaign.creatives.len(),
            target_audience: campaign.target_audience.clone(),
            objectives: campaign.objectives.clone(),
        }
    }
}

/// One submission/review cycle. Records are append-only: each resubmission
/// creates a new record, and history is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub status: ApprovalStatus,
    pub submitted_by: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
    #[serde(default)]
    pub rejection_reasons: Vec<String>,
    pub review_snapshot: ReviewSnapshot,
    pub launch_result: Option<LaunchResult>,
}

impl ApprovalRecord {
    /// Fresh pending record for a newly submitted campaign.
    pub fn pending(campaign: &Campaign, submitted_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            campaign_id: campaign.id,
            status: ApprovalStatus::PendingReview,
            submitted_by,
            submitted_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            review_notes: None,
            rejection_reasons: Vec::new(),
            review_snapshot: ReviewSnapshot::of(campaign),
            launch_result: None,
        }
    }
}

// ─── Validation ────────────────────────────────────────────────────────────

/// Outcome of the content validator. `ok` holds exactly when `errors` is
/// empty; warnings never block submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// ─── Enrichment / launch options ───────────────────────────────────────────

/// Owner-profile context merged into channel requests at approval time.
/// Read-only data from the profile collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub service_type: Option<String>,
    pub city: Option<String>,
    pub landing_page_url: Option<String>,
    pub avg_transaction_value: Option<f64>,
}

/// Reviewer-selected options for a launch attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchOptions {
    /// Use the lead-capture campaign variant instead of the standard one.
    pub lead_capture: bool,
}
