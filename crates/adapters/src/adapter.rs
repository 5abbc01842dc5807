//! Adapter trait and registry. Each adapter translates a generic channel
//! request into its platform's campaign-creation mechanics.

use async_trait::async_trait;
use launchgate_core::channels::{
    CampaignUpdate, Channel, ChannelError, ChannelLaunch, ChannelMetrics, ChannelRequest,
};
use launchgate_core::config::AppConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::google::GoogleAdsAdapter;
use crate::meta::MetaAdsAdapter;

/// Uniform interface over one advertising channel.
///
/// `create_campaign` must always create, never update in place; callers
/// may hold no prior external id. Missing credentials surface as
/// [`ChannelError::NotConfigured`], not a panic, so the orchestrator can
/// treat an unconfigured channel as an ordinary per-channel failure.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    fn channel(&self) -> Channel;

    /// Capability check evaluated against the credentials the adapter was
    /// constructed with. No global readiness state.
    fn is_configured(&self) -> bool;

    async fn create_campaign(&self, request: &ChannelRequest)
        -> Result<ChannelLaunch, ChannelError>;

    async fn pause(&self, external_id: &str) -> Result<(), ChannelError>;

    async fn update(
        &self,
        external_id: &str,
        fields: &CampaignUpdate,
    ) -> Result<(), ChannelError>;

    async fn get_metrics(&self, external_id: &str) -> Result<ChannelMetrics, ChannelError>;
}

/// The set of adapters available to the orchestrator, built once at process
/// start and passed in by dependency injection.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<Channel, Arc<dyn ChannelAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from application config. Adapters are registered
    /// even when unconfigured; they report the condition per call.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(MetaAdsAdapter::new(config.meta.clone())));
        registry.insert(Arc::new(GoogleAdsAdapter::new(config.google.clone())));

        info!(
            meta_configured = config.meta.is_configured(),
            google_configured = config.google.is_configured(),
            "Adapter registry initialized"
        );
        registry
    }

    pub fn insert(&mut self, adapter: Arc<dyn ChannelAdapter>) {
        self.adapters.insert(adapter.channel(), adapter);
    }

    pub fn get(&self, channel: Channel) -> Option<Arc<dyn ChannelAdapter>> {
        self.adapters.get(&channel).cloned()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_from_default_config_covers_both_channels() {
        let registry = AdapterRegistry::from_config(&AppConfig::default());
        assert_eq!(registry.len(), 2);
        assert!(registry.get(Channel::Meta).is_some());
        assert!(registry.get(Channel::Google).is_some());
        // Default config carries no credentials.
        assert!(!registry.get(Channel::Meta).unwrap().is_configured());
    }
}
