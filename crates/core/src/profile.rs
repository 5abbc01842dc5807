//! Owner-profile read collaborator. Supplies the enrichment context the
//! approve path merges into channel requests (service type, city, landing
//! page, typical transaction value).

use crate::types::OwnerProfile;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub trait ProfileReader: Send + Sync {
    /// Read-only profile lookup; `None` when the owner has no profile or
    /// the backend is unavailable. The workflow proceeds either way.
    fn owner_profile(&self, owner_id: Uuid) -> Option<OwnerProfile>;
}

/// Reader with no backing store.
pub struct NoProfiles;

impl ProfileReader for NoProfiles {
    fn owner_profile(&self, _owner_id: Uuid) -> Option<OwnerProfile> {
        None
    }
}

pub fn no_profiles() -> Arc<dyn ProfileReader> {
    Arc::new(NoProfiles)
}

/// Map-backed reader for tests and local development.
#[derive(Default)]
pub struct StaticProfiles {
    profiles: HashMap<Uuid, OwnerProfile>,
}

impl StaticProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, owner_id: Uuid, profile: OwnerProfile) -> Self {
        self.profiles.insert(owner_id, profile);
        self
    }
}

impl ProfileReader for StaticProfiles {
    fn owner_profile(&self, owner_id: Uuid) -> Option<OwnerProfile> {
        self.profiles.get(&owner_id).cloned()
    }
}
