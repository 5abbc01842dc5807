//! Platform adapters — one per advertising channel, behind a uniform
//! creation/lifecycle interface the launch orchestrator fans out to.

pub mod adapter;
pub mod google;
pub mod meta;

pub use adapter::{AdapterRegistry, ChannelAdapter};
pub use google::GoogleAdsAdapter;
pub use meta::MetaAdsAdapter;
