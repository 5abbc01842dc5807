use serde::Deserialize;

/// Root application configuration. Loaded from environment variables with
/// the prefix `LAUNCHGATE__` and standard config sources.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub meta: MetaAdsConfig,
    #[serde(default)]
    pub google: GoogleAdsConfig,
    #[serde(default)]
    pub launch: LaunchConfig,
}

/// Meta Ads credentials. All fields must be present for the channel to be
/// considered configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaAdsConfig {
    pub access_token: Option<String>,
    pub ad_account_id: Option<String>,
    pub page_id: Option<String>,
}

impl MetaAdsConfig {
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some() && self.ad_account_id.is_some() && self.page_id.is_some()
    }
}

/// Google Ads credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleAdsConfig {
    pub developer_token: Option<String>,
    pub customer_id: Option<String>,
    pub refresh_token: Option<String>,
}

impl GoogleAdsConfig {
    pub fn is_configured(&self) -> bool {
        self.developer_token.is_some() && self.customer_id.is_some() && self.refresh_token.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LaunchConfig {
    /// Per-channel deadline for a single adapter call.
    #[serde(default = "default_channel_timeout_ms")]
    pub channel_timeout_ms: u64,
    /// Base review window quoted to submitters.
    #[serde(default = "default_review_window_hours")]
    pub review_window_hours: u32,
    /// Budgets above this get the extended review window (and a validator
    /// warning at submission).
    #[serde(default = "default_high_budget_threshold")]
    pub high_budget_threshold: f64,
}

fn default_channel_timeout_ms() -> u64 {
    15_000
}

fn default_review_window_hours() -> u32 {
    24
}

fn default_high_budget_threshold() -> f64 {
    50_000.0
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            channel_timeout_ms: default_channel_timeout_ms(),
            review_window_hours: default_review_window_hours(),
            high_budget_threshold: default_high_budget_threshold(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            meta: MetaAdsConfig::default(),
            google: GoogleAdsConfig::default(),
            launch: LaunchConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("LAUNCHGATE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconfigured() {
        let config = AppConfig::default();
        assert!(!config.meta.is_configured());
        assert!(!config.google.is_configured());
        assert_eq!(config.launch.review_window_hours, 24);
    }

    #[test]
    fn partial_credentials_do_not_configure_a_channel() {
        let meta = MetaAdsConfig {
            access_token: Some("token".into()),
            ad_account_id: None,
            page_id: Some("page".into()),
        };
        assert!(!meta.is_configured());
    }
}
