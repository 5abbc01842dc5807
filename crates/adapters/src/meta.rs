//! Meta Ads adapter. Creation follows the platform's campaign → ad set →
//! ad shape; the remote call itself is simulated at the HTTP seam, behind
//! the same trait a production Graph API client implements.

use crate::adapter::ChannelAdapter;
use async_trait::async_trait;
use launchgate_core::channels::{
    CampaignUpdate, Channel, ChannelError, ChannelLaunch, ChannelMetrics, ChannelRequest,
};
use launchgate_core::config::MetaAdsConfig;
use launchgate_core::types::CampaignObjective;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub struct MetaAdsAdapter {
    config: MetaAdsConfig,
}

impl MetaAdsAdapter {
    pub fn new(config: MetaAdsConfig) -> Self {
        Self { config }
    }

    /// Map our objective onto Meta's outcome-based objectives. Lead-capture
    /// launches always run as lead campaigns.
    fn objective_param(request: &ChannelRequest) -> &'static str {
        if request.lead_capture {
            return "OUTCOME_LEADS";
        }
        match request.objective {
            CampaignObjective::LeadGeneration => "OUTCOME_LEADS",
            CampaignObjective::BrandAwareness => "OUTCOME_AWARENESS",
            CampaignObjective::WebsiteTraffic => "OUTCOME_TRAFFIC",
            CampaignObjective::Conversions => "OUTCOME_SALES",
            CampaignObjective::Engagement => "OUTCOME_ENGAGEMENT",
        }
    }

    fn require_configured(&self) -> Result<(), ChannelError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ChannelError::NotConfigured(Channel::Meta))
        }
    }
}

#[async_trait]
impl ChannelAdapter for MetaAdsAdapter {
    fn channel(&self) -> Channel {
        Channel::Meta
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
            objective = Self::objective_param(request),
            idempotency_key = %request.idempotency_key,
            paused = request.start_paused,
            "Creating Meta campaign"
        );

        // In production: POST /act_{ad_account_id}/campaigns, then ad set,
        // creatives, and ads against the Graph API, passing the idempotency
        // key as the request's client token.
        let campaign_id = format!("meta-cmp-{}", Uuid::new_v4().simple());
        let mut asset_ids = HashMap::new();
        asset_ids.insert(
            "ad_set".to_string(),
            format!("meta-adset-{}", Uuid::new_v4().simple()),
        );
        for (i, _creative) in request.creatives.iter().enumerate() {
            asset_ids.insert(
                format!("ad_{}", i + 1),
                format!("meta-ad-{}", Uuid::new_v4().simple()),
            );
        }
        if request.lead_capture {
            asset_ids.insert(
                "lead_form".to_string(),
                format!("meta-form-{}", Uuid::new_v4().simple()),
            );
        }

        Ok(ChannelLaunch {
            external_id: campaign_id,
            asset_ids,
        })
    }

    async fn pause(&self, external_id: &str) -> Result<(), ChannelError> {
        self.require_configured()?;
        debug!(external_id, "Pausing Meta campaign");
        // In production: POST /{campaign_id} with status=PAUSED.
        Ok(())
    }

    async fn update(
        &self,
        external_id: &str,
        fields: &CampaignUpdate,
    ) -> Result<(), ChannelError> {
        self.require_configured()?;
        debug!(external_id, ?fields, "Updating Meta campaign");
        Ok(())
    }

    async fn get_metrics(&self, external_id: &str) -> Result<ChannelMetrics, ChannelError> {
        self.require_configured()?;
        debug!(external_id, "Fetching Meta campaign insights");
        // In production: GET /{campaign_id}/insights.
        Ok(ChannelMetrics::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchgate_core::types::Creative;

    fn configured() -> MetaAdsAdapter {
        MetaAdsAdapter::new(MetaAdsConfig {
            access_token: Some("token".into()),
            ad_account_id: Some("act_123".into()),
            page_id: Some("page_1".into()),
        })
    }

    fn sample_request(lead_capture: bool) -> ChannelRequest {
        let campaign_id = Uuid::new_v4();
        ChannelRequest {
            channel: Channel::Meta,
            campaign_id,
            idempotency_key: format!("{campaign_id}:attempt:meta"),
            name: "Spring Promo".into(),
            budget: 500.0,
            objective: CampaignObjective::WebsiteTraffic,
            target_audience: "homeowners in Austin".into(),
            creatives: vec![Creative {
                id: Uuid::new_v4(),
                campaign_id,
                headline: "Spring savings".into(),
                description: "Seasonal offers for your home".into(),
                call_to_action: "Learn More".into(),
                image_url: None,
            }],
            lead_capture,
            start_paused: true,
            landing_page_url: Some("https://example.com/spring".into()),
            city: Some("Austin".into()),
            service_type: None,
            avg_transaction_value: Some(480.0),
        }
    }

    #[tokio::test]
    async fn unconfigured_adapter_reports_not_configured() {
        let adapter = MetaAdsAdapter::new(MetaAdsConfig::default());
        let err = adapter.create_campaign(&sample_request(false)).await.unwrap_err();
        assert_eq!(err, ChannelError::NotConfigured(Channel::Meta));
        assert!(!err.retryable());
    }

    #[tokio::test]
    async fn lead_capture_variant_creates_a_lead_form() {
        let adapter = configured();
        let launch = adapter.create_campaign(&sample_request(true)).await.unwrap();
        assert!(launch.external_id.starts_with("meta-cmp-"));
        assert!(launch.asset_ids.contains_key("lead_form"));
        assert!(launch.asset_ids.contains_key("ad_set"));
    }

    #[tokio::test]
    async fn standard_variant_maps_objective_without_lead_form() {
        let adapter = configured();
        let request = sample_request(false);
        assert_eq!(MetaAdsAdapter::objective_param(&request), "OUTCOME_TRAFFIC");
        let launch = adapter.create_campaign(&request).await.unwrap();
        assert!(!launch.asset_ids.contains_key("lead_form"));
    }

    #[tokio::test]
    async fn lifecycle_calls_require_credentials() {
        let adapter = MetaAdsAdapter::new(MetaAdsConfig::default());
        assert!(adapter.pause("meta-cmp-x").await.is_err());
        assert!(adapter.get_metrics("meta-cmp-x").await.is_err());

        let adapter = configured();
        assert!(adapter.pause("meta-cmp-x").await.is_ok());
        assert!(adapter
            .update("meta-cmp-x", &CampaignUpdate::default())
            .await
            .is_ok());
    }
}
