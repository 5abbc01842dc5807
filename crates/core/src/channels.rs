//! Channel-facing types shared by the launch orchestrator and the platform
//! adapters: creation requests, per-channel outcomes, and the channel error
//! taxonomy.

use crate::types::{CampaignObjective, Creative};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

// ─── Channel ───────────────────────────────────────────────────────────────

/// An external advertising platform this system can launch to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Meta,
    Google,
}

impl Channel {
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Meta => "Meta Ads",
            Channel::Google => "Google Ads",
        }
    }

    /// Stable snake_case key for metric labels and reference maps.
    pub fn as_key(&self) -> &'static str {
        match self {
            Channel::Meta => "meta",
            Channel::Google => "google",
        }
    }
}

// ─── Channel errors ────────────────────────────────────────────────────────

/// Per-channel failure. Never escapes the orchestrator as a call-level
/// error; it is captured into the channel's outcome instead.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum ChannelError {
    /// Missing or incomplete credentials. Operator action required.
    #[error("{} channel is not configured", .0.display_name())]
    NotConfigured(Channel),

    /// The platform rejected the campaign content. Requires campaign edits.
    #[error("remote validation rejected: {0}")]
    Rejected(String),

    /// Network or rate-limit trouble. Safe to retry later.
    #[error("transient channel error: {0}")]
    Transient(String),

    /// No response within the per-channel deadline.
    #[error("channel call timed out after {0}ms")]
    Timeout(u64),
}

impl ChannelError {
    /// Whether a later retry could succeed without operator action or
    /// campaign edits.
    pub fn retryable(&self) -> bool {
        matches!(self, ChannelError::Transient(_) | ChannelError::Timeout(_))
    }
}

// ─── Creation request / response ───────────────────────────────────────────

/// Channel-agnostic campaign creation request. Building one is pure and
/// infallible; missing optional fields are defaulted by the builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRequest {
    pub channel: Channel,
    pub campaign_id: Uuid,
    /// Fresh per-attempt token the adapter forwards to the platform so a
    /// retried approve cannot double-create within one attempt.
    pub idempotency_key: String,
    pub name: String,
    pub budget: f64,
    pub objective: CampaignObjective,
    pub target_audience: String,
    pub creatives: Vec<Creative>,
    /// Lead-capture variant vs the standard variant.
    pub lead_capture: bool,
    /// Created remote campaigns start paused so a partial launch stays
    /// inert for manual reconciliation.
    pub start_paused: bool,
    pub landing_page_url: Option<String>,
    pub city: Option<String>,
    pub service_type: Option<String>,
    /// Typical transaction value, used as a value hint by channels that
    /// support value-based optimization.
    pub avg_transaction_value: Option<f64>,
}

/// Platform-assigned identifiers for a successfully created campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelLaunch {
    /// The remote campaign id; this is what lands in
    /// `Campaign::external_references`.
    pub external_id: String,
    /// Secondary assets created alongside (ad set, ad group, lead form).
    #[serde(default)]
    pub asset_ids: HashMap<String, String>,
}

// ─── Aggregated launch result ──────────────────────────────────────────────

/// Serializable projection of one channel's launch attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelOutcome {
    pub success: bool,
    pub external_id: Option<String>,
    pub error: Option<String>,
    pub retryable: Option<bool>,
}

impl ChannelOutcome {
    pub fn launched(external_id: impl Into<String>) -> Self {
        Self {
            success: true,
            external_id: Some(external_id.into()),
            error: None,
            retryable: None,
        }
    }

    pub fn failed(error: &ChannelError) -> Self {
        Self {
            success: false,
            external_id: None,
            error: Some(error.to_string()),
            retryable: Some(error.retryable()),
        }
    }
}

/// Fan-out result across all selected channels. `overall_success` is true
/// only when every channel succeeded; callers must inspect it rather than
/// assume the approve call's success implies a full launch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchResult {
    pub channel_results: HashMap<Channel, ChannelOutcome>,
    pub overall_success: bool,
}

impl LaunchResult {
    pub fn failed_channels(&self) -> Vec<Channel> {
        self.channel_results
            .iter()
            .filter(|(_, outcome)| !outcome.success)
            .map(|(channel, _)| *channel)
            .collect()
    }
}

// ─── Post-launch operations ────────────────────────────────────────────────

/// Mutable fields for in-place updates of an already-launched campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub budget: Option<f64>,
    pub target_audience: Option<String>,
}

/// Delivery metrics pulled from a channel for one remote campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub leads: u64,
    pub spend: f64,
}
