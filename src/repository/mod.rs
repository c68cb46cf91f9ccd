//! Repository layer for database operations

pub mod equipment;
pub mod history;
pub mod plans;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::{is_unique_violation, AppError, AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub plans: plans::PlansRepository,
    pub history: history::HistoryRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            plans: plans::PlansRepository::new(pool.clone()),
            history: history::HistoryRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Turn a unique constraint violation into a conflict with a readable message
pub(crate) fn map_unique(err: sqlx::Error, message: impl FnOnce() -> String) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(message())
    } else {
        AppError::Database(err)
    }
}
