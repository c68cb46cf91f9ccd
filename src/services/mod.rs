//! Business logic services

pub mod equipment;
pub mod lubrication;
pub mod users;

use crate::{config::SchedulingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub lubrication: lubrication::LubricationService,
    pub users: users::UsersService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, scheduling: SchedulingConfig) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            lubrication: lubrication::LubricationService::new(repository.clone(), scheduling),
            users: users::UsersService::new(repository.clone()),
            repository,
        }
    }

    /// Database connectivity check for readiness probes
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
