//! Google Ads adapter. Creation follows campaign → ad group → responsive
//! search ad; the lead-capture variant attaches a lead form asset. Remote
//! mechanics are simulated at the API seam.

use crate::adapter::ChannelAdapter;
use async_trait::async_trait;
use launchgate_core::channels::{
    CampaignUpdate, Channel, ChannelError, ChannelLaunch, ChannelMetrics, ChannelRequest,
};
use launchgate_core::config::GoogleAdsConfig;
use launchgate_core::types::CampaignObjective;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub struct GoogleAdsAdapter {
    config: GoogleAdsConfig,
}

impl GoogleAdsAdapter {
    pub fn new(config: GoogleAdsConfig) -> Self {
        Self { config }
    }

    /// Advertising channel sub-type for the campaign resource.
    fn campaign_type(request: &ChannelRequest) -> &'static str {
        match request.objective {
            CampaignObjective::BrandAwareness => "DISPLAY",
            _ => "SEARCH",
        }
    }

    fn require_configured(&self) -> Result<(), ChannelError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ChannelError::NotConfigured(Channel::Google))
        }
    }
}

#[async_trait]
impl ChannelAdapter for GoogleAdsAdapter {
    fn channel(&self) -> Channel {
        Channel::Google
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn create_campaign(
        &self,
        request: &ChannelRequest,
    ) -> Result<ChannelLaunch, ChannelError> {
        self.require_configured()?;

        debug!(
            campaign_id = %request.campaign_id,
            campaign_type = Self::campaign_type(request),
            idempotency_key = %request.idempotency_key,
            paused = request.start_paused,
            "Creating Google Ads campaign"
        );

        // In production: CampaignService.MutateCampaigns with a budget
        // resource, then AdGroupService and AdGroupAdService, carrying the
        // idempotency key as the mutate request id.
        let campaign_id = format!("gads-cmp-{}", Uuid::new_v4().simple());
        let mut asset_ids = HashMap::new();
        asset_ids.insert(
            "ad_group".to_string(),
            format!("gads-adgroup-{}", Uuid::new_v4().simple()),
        );
        if !request.creatives.is_empty() {
            asset_ids.insert(
                "responsive_search_ad".to_string(),
                format!("gads-ad-{}", Uuid::new_v4().simple()),
            );
        }
        if request.lead_capture {
            asset_ids.insert(
                "lead_form_asset".to_string(),
                format!("gads-leadform-{}", Uuid::new_v4().simple()),
            );
        }

        Ok(ChannelLaunch {
            external_id: campaign_id,
            asset_ids,
        })
    }

    async fn pause(&self, external_id: &str) -> Result<(), ChannelError> {
        self.require_configured()?;
        debug!(external_id, "Pausing Google Ads campaign");
        Ok(())
    }

    async fn update(
        &self,
        external_id: &str,
        fields: &CampaignUpdate,
    ) -> Result<(), ChannelError> {
        self.require_configured()?;
        debug!(external_id, ?fields, "Updating Google Ads campaign");
        Ok(())
    }

    async fn get_metrics(&self, external_id: &str) -> Result<ChannelMetrics, ChannelError> {
        self.require_configured()?;
        debug!(external_id, "Querying Google Ads campaign metrics");
        Ok(ChannelMetrics::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> GoogleAdsAdapter {
        GoogleAdsAdapter::new(GoogleAdsConfig {
            developer_token: Some("dev-token".into()),
            customer_id: Some("123-456-7890".into()),
            refresh_token: Some("refresh".into()),
        })
    }

    fn sample_request(objective: CampaignObjective, lead_capture: bool) -> ChannelRequest {
        let campaign_id = Uuid::new_v4();
        ChannelRequest {
            channel: Channel::Google,
            campaign_id,
            idempotency_key: format!("{campaign_id}:attempt:google"),
            name: "Winter Tune-Up".into(),
            budget: 1_200.0,
            objective,
            target_audience: "homeowners searching for furnace repair".into(),
            creatives: Vec::new(),
            lead_capture,
            start_paused: true,
            landing_page_url: None,
            city: None,
            service_type: Some("HVAC".into()),
            avg_transaction_value: None,
        }
    }

    #[tokio::test]
    async fn unconfigured_adapter_reports_not_configured() {
        let adapter = GoogleAdsAdapter::new(GoogleAdsConfig::default());
        let err = adapter
            .create_campaign(&sample_request(CampaignObjective::Conversions, false))
            .await
            .unwrap_err();
        assert_eq!(err, ChannelError::NotConfigured(Channel::Google));
    }

    #[tokio::test]
    async fn awareness_runs_as_display_everything_else_as_search() {
        let display = sample_request(CampaignObjective::BrandAwareness, false);
        assert_eq!(GoogleAdsAdapter::campaign_type(&display), "DISPLAY");
        let search = sample_request(CampaignObjective::LeadGeneration, false);
        assert_eq!(GoogleAdsAdapter::campaign_type(&search), "SEARCH");
    }

    #[tokio::test]
    async fn lead_capture_attaches_a_lead_form_asset() {
        let adapter = configured();
        let launch = adapter
            .create_campaign(&sample_request(CampaignObjective::LeadGeneration, true))
            .await
            .unwrap();
        assert!(launch.external_id.starts_with("gads-cmp-"));
        assert!(launch.asset_ids.contains_key("lead_form_asset"));
        // No creatives in the request, so no responsive search ad either.
        assert!(!launch.asset_ids.contains_key("responsive_search_ad"));
    }
}
