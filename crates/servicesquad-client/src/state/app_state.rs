use std::sync::Arc;
use tokio::sync::RwLock;

use servicesquad_protocol::{OpportunityData, OrganizationData, UserData};

/// Application-wide state shared by the UI, the network client and the
/// session controller. Cloning shares the same slot.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<RwLock<AppStateInner>>,
}

#[derive(Debug, Default)]
pub struct AppStateInner {
    // Current user
    pub current_user: Option<UserData>,
    /// Bumped whenever the user changes; listings fetched under an older value are dropped
    pub session_generation: u64,

    // Listings
    pub organizations: Vec<OrganizationData>,
    pub opportunities: Vec<OpportunityData>,

    // Connection state
    pub connection_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner::default())),
        }
    }

    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppStateInner> {
        self.inner.read().await
    }

    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppStateInner> {
        self.inner.write().await
    }

    pub async fn set_user(&self, user: UserData) {
        let mut state = self.inner.write().await;
        state.current_user = Some(user);
        state.session_generation += 1;
        state.connection_error = None;
    }

    /// Drop the user and everything fetched on their behalf.
    pub async fn clear_user(&self) {
        let mut state = self.inner.write().await;
        state.current_user = None;
        state.session_generation += 1;
        state.organizations.clear();
        state.opportunities.clear();
    }

    pub async fn current_user(&self) -> Option<UserData> {
        self.inner.read().await.current_user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.current_user.is_some()
    }

    pub async fn session_generation(&self) -> u64 {
        self.inner.read().await.session_generation
    }

    /// Store listings fetched under `generation`. Returns false, storing nothing,
    /// if the user changed since.
    pub async fn set_organizations(
        &self,
        generation: u64,
        organizations: Vec<OrganizationData>,
    ) -> bool {
        let mut state = self.inner.write().await;
        if state.session_generation != generation {
            return false;
        }
        state.organizations = organizations;
        true
    }

    pub async fn set_opportunities(
        &self,
        generation: u64,
        opportunities: Vec<OpportunityData>,
    ) -> bool {
        let mut state = self.inner.write().await;
        if state.session_generation != generation {
            return false;
        }
        state.opportunities = opportunities;
        true
    }

    pub async fn set_connection_error(&self, error: Option<String>) {
        self.inner.write().await.connection_error = error;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn volunteer() -> UserData {
        serde_json::from_value(json!({ "id": 1, "username": "volunteer1" })).unwrap()
    }

    fn beach_cleanup() -> OpportunityData {
        serde_json::from_value(json!({ "id": 2, "title": "Beach cleanup" })).unwrap()
    }

    #[tokio::test]
    async fn clones_share_the_user_slot() {
        let state = AppState::new();
        let handle = state.clone();

        handle.set_user(volunteer()).await;
        assert!(state.is_authenticated().await);
        assert_eq!(state.current_user().await, Some(volunteer()));
    }

    #[tokio::test]
    async fn clear_user_drops_listings() {
        let state = AppState::new();
        state.set_user(volunteer()).await;
        let generation = state.session_generation().await;
        assert!(
            state
                .set_opportunities(generation, vec![beach_cleanup()])
                .await
        );

        state.clear_user().await;

        let inner = state.read().await;
        assert!(inner.current_user.is_none());
        assert!(inner.opportunities.is_empty());
    }

    #[tokio::test]
    async fn listings_from_a_previous_session_are_dropped() {
        let state = AppState::new();
        state.set_user(volunteer()).await;
        let generation = state.session_generation().await;

        state.clear_user().await;

        assert!(
            !state
                .set_opportunities(generation, vec![beach_cleanup()])
                .await
        );
        assert!(!state.set_organizations(generation, Vec::new()).await);
        assert!(state.read().await.opportunities.is_empty());
    }
}
