//! Launch orchestrator — fans campaign creation out to every selected
//! channel and collects independent per-channel outcomes. A join, not a
//! race: every dispatched call is awaited, and one channel's failure never
//! gates another's.

use launchgate_adapters::AdapterRegistry;
use launchgate_core::channels::{
    Channel, ChannelError, ChannelLaunch, ChannelOutcome, ChannelRequest, LaunchResult,
};
use launchgate_core::config::LaunchConfig;
use launchgate_core::types::{Campaign, LaunchOptions, OwnerProfile};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

pub struct LaunchOrchestrator {
    adapters: AdapterRegistry,
    channel_timeout: Duration,
}

impl LaunchOrchestrator {
    pub fn new(adapters: AdapterRegistry, config: &LaunchConfig) -> Self {
        info!(
            adapters = adapters.len(),
            timeout_ms = config.channel_timeout_ms,
            "Launch orchestrator initialized"
        );
        Self {
            adapters,
            channel_timeout: Duration::from_millis(config.channel_timeout_ms),
        }
    }

    /// Attempt creation on every selected channel. Per-channel failures are
    /// captured in the result; this call itself never fails. Once
    /// dispatched, a channel call is not cancellable; a timeout on one
    /// channel becomes that channel's failure while the others' outcomes
    /// are still honored.
    pub async fn launch(
        &self,
        campaign: &Campaign,
        enrichment: Option<&OwnerProfile>,
        options: &LaunchOptions,
    ) -> LaunchResult {
        let attempt_id = Uuid::new_v4();
        let mut result = LaunchResult::default();
        let mut handles: Vec<(Channel, JoinHandle<Result<ChannelLaunch, ChannelError>>)> =
            Vec::new();

        let mut seen = Vec::new();
        for &channel in &campaign.channel_selection {
            if seen.contains(&channel) {
                continue;
            }
            seen.push(channel);

            let request = build_channel_request(campaign, channel, enrichment, options, attempt_id);

            let adapter = match self.adapters.get(channel) {
                Some(adapter) if adapter.is_configured() => adapter,
                _ => {
                    // Missing or credential-less adapter: an ordinary
                    // per-channel failure, no dispatch.
                    let error = ChannelError::NotConfigured(channel);
                    warn!(campaign_id = %campaign.id, channel = channel.as_key(), %error, "Channel skipped");
                    result
                        .channel_results
                        .insert(channel, ChannelOutcome::failed(&error));
                    metrics::counter!("launch.errors", "channel" => channel.as_key()).increment(1);
                    continue;
                }
            };

            metrics::counter!("launch.dispatched", "channel" => channel.as_key()).increment(1);

            let timeout = self.channel_timeout;
            handles.push((
                channel,
                tokio::spawn(async move {
                    let start = std::time::Instant::now();
                    let outcome = match tokio::time::timeout(
                        timeout,
                        adapter.create_campaign(&request),
                    )
                    .await
                    {
                        Ok(inner) => inner,
                        Err(_) => Err(ChannelError::Timeout(timeout.as_millis() as u64)),
                    };
                    metrics::histogram!("launch.latency_ms", "channel" => channel.as_key())
                        .record(start.elapsed().as_millis() as f64);
                    outcome
                }),
            ));
        }

        for (channel, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(launch)) => {
                    info!(
                        campaign_id = %campaign.id,
                        channel = channel.as_key(),
                        external_id = %launch.external_id,
                        "Channel launch succeeded"
                    );
                    ChannelOutcome::launched(launch.external_id)
                }
                Ok(Err(error)) => {
                    warn!(
                        campaign_id = %campaign.id,
                        channel = channel.as_key(),
                        %error,
                        retryable = error.retryable(),
                        "Channel launch failed"
                    );
                    metrics::counter!("launch.errors", "channel" => channel.as_key()).increment(1);
                    ChannelOutcome::failed(&error)
                }
                Err(join_error) => {
                    // Adapter task panicked; contain it to this channel.
                    warn!(
                        campaign_id = %campaign.id,
                        channel = channel.as_key(),
                        error = %join_error,
                        "Channel launch task failed"
                    );
                    metrics::counter!("launch.errors", "channel" => channel.as_key()).increment(1);
                    ChannelOutcome::failed(&ChannelError::Transient(format!(
                        "launch task failed: {join_error}"
                    )))
                }
            };
            result.channel_results.insert(channel, outcome);
        }

        result.overall_success = result.channel_results.values().all(|o| o.success);
        result
    }
}

/// Build the channel-agnostic creation request for one channel. Pure and
/// infallible; optional fields default to `None`. Each launch attempt mints
/// its own idempotency key per channel so a retried approve cannot
/// double-create within an attempt.
pub fn build_channel_request(
    campaign: &Campaign,
    channel: Channel,
    enrichment: Option<&OwnerProfile>,
    options: &LaunchOptions,
    attempt_id: Uuid,
) -> ChannelRequest {
    ChannelRequest {
        channel,
        campaign_id: campaign.id,
        idempotency_key: format!("{}:{}:{}", campaign.id, attempt_id, channel.as_key()),
        name: campaign.name.clone(),
        budget: campaign.budget,
        objective: campaign.primary_objective(),
        target_audience: campaign.target_audience.clone(),
        creatives: campaign.creatives.clone(),
        lead_capture: options.lead_capture,
        // Remote campaigns start paused so a partial launch stays inert for
        // manual reconciliation instead of being torn down.
        start_paused: true,
        landing_page_url: enrichment.and_then(|p| p.landing_page_url.clone()),
        city: enrichment.and_then(|p| p.city.clone()),
        service_type: enrichment.and_then(|p| p.service_type.clone()),
        avg_transaction_value: enrichment.and_then(|p| p.avg_transaction_value),
    }
}
