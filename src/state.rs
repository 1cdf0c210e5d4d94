use std::sync::Arc;

use crate::assets::{AssetStore, LocalAssetStore};
use crate::auth::SessionGate;
use crate::config::AppConfig;
use crate::database::EventRepository;
use crate::listing::{ListingInvalidations, PublicListing};
use crate::workflow::EventWorkflow;

/// Shared application state handed to the router.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gate: Arc<SessionGate>,
    pub repository: Arc<dyn EventRepository>,
    pub workflow: Arc<EventWorkflow>,
    pub listing: PublicListing,
    pub invalidations: ListingInvalidations,
}

impl AppState {
    /// Wire the components around the given repository. The session gate
    /// and asset store take their settings from `config`.
    pub fn new(config: AppConfig, repository: Arc<dyn EventRepository>) -> Self {
        let gate = Arc::new(SessionGate::new(&config.security));
        let assets: Arc<dyn AssetStore> = Arc::new(LocalAssetStore::new(&config.uploads));
        let invalidations = ListingInvalidations::new();
        let workflow = Arc::new(EventWorkflow::new(
            repository.clone(),
            assets,
            invalidations.clone(),
        ));
        let listing = PublicListing::new(repository.clone());

        Self {
            config: Arc::new(config),
            gate,
            repository,
            workflow,
            listing,
            invalidations,
        }
    }
}
