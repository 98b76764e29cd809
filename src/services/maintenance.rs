use crate::repositories::MaintenanceRepository;

#[derive(Clone)]
pub struct MaintenanceService {
    repository: MaintenanceRepository,
}

impl MaintenanceService {
    pub fn new(repository: MaintenanceRepository) -> Self {
        Self { repository }
    }

    /// Hard-purges aged soft-deleted rows.
    pub async fn run_nightly_cleanup(&self) -> bool {
        self.repository.run_nightly_cleanup().await
    }

    /// Recomputes event statuses from the current time.
    pub async fn run_status_update(&self) -> bool {
        self.repository.run_status_update().await
    }
}
