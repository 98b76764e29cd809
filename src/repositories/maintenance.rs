use std::sync::Arc;

use tracing::info;

use crate::store::Store;

/// Triggers for the scheduled store procedures.
///
/// Each returns whether the procedure completed; failures are logged and
/// never surfaced as an outcome.
#[derive(Clone)]
pub struct MaintenanceRepository {
    store: Arc<dyn Store>,
}

impl MaintenanceRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn run_nightly_cleanup(&self) -> bool {
        match self.store.run_nightly_cleanup().await {
            Ok(()) => {
                info!("Nightly cleanup completed");
                true
            }
            Err(err) => {
                err.log("maintenance.nightly_cleanup");
                false
            }
        }
    }

    pub async fn run_status_update(&self) -> bool {
        match self.store.run_status_update().await {
            Ok(()) => {
                info!("Event status update completed");
                true
            }
            Err(err) => {
                err.log("maintenance.status_update");
                false
            }
        }
    }
}
