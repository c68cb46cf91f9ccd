//! Lubrication scheduling service: upcoming work, execution registration, history

use chrono::{DateTime, Duration, Utc};
use validator::Validate;

use crate::{
    config::SchedulingConfig,
    error::{is_write_conflict, AppError, AppResult},
    models::{
        history::{HistoryEntry, RegisterExecution},
        plan::{LubricationPlan, PlanDetails, ScheduleSummary, UpcomingPlan, UpdatePlan},
        Criticality,
    },
    repository::Repository,
    scheduling,
};

#[derive(Clone)]
pub struct LubricationService {
    repository: Repository,
    config: SchedulingConfig,
}

impl LubricationService {
    pub fn new(repository: Repository, config: SchedulingConfig) -> Self {
        Self { repository, config }
    }

    /// Resolve the requested horizon against configured bounds
    pub fn horizon(&self, days: Option<i64>) -> AppResult<i64> {
        let days = days.unwrap_or(self.config.default_horizon_days);
        scheduling::validate_horizon(days)?;
        if days > self.config.max_horizon_days {
            return Err(AppError::Validation(format!(
                "Horizon must be at most {} days",
                self.config.max_horizon_days
            )));
        }
        Ok(days)
    }

    /// Resolve the requested history limit against configured bounds
    pub fn history_limit(&self, limit: Option<i64>) -> AppResult<i64> {
        let limit = limit.unwrap_or(self.config.default_history_limit);
        if !(1..=self.config.max_history_limit).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                self.config.max_history_limit
            )));
        }
        Ok(limit)
    }

    /// Plans due within `horizon_days` of `now`, earliest first
    pub async fn list_upcoming(&self, horizon_days: i64, now: DateTime<Utc>) -> AppResult<Vec<UpcomingPlan>> {
        scheduling::validate_horizon(horizon_days)?;
        let candidates = self
            .repository
            .plans
            .list_due_candidates(now + Duration::days(horizon_days))
            .await?;
        scheduling::list_upcoming(&candidates, horizon_days, now)
    }

    /// Dashboard counters for the given horizon
    pub async fn summary(&self, horizon_days: i64, now: DateTime<Utc>) -> AppResult<ScheduleSummary> {
        let upcoming = self.list_upcoming(horizon_days, now).await?;
        let (overdue, due_now, upcoming_count) = scheduling::count_by_urgency(&upcoming);

        let mut summary = ScheduleSummary {
            horizon_days,
            overdue,
            due_now,
            upcoming: upcoming_count,
            ..Default::default()
        };
        for row in self.repository.equipment.count_active_by_criticality().await? {
            summary.active_equipment += row.count;
            match row.criticality {
                Criticality::Critical => summary.critical = row.count,
                Criticality::Medium => summary.medium = row.count,
                Criticality::Low => summary.low = row.count,
            }
        }
        Ok(summary)
    }

    /// Record completed work on a plan and advance its schedule.
    ///
    /// History append and plan update commit together. Lock contention with
    /// another registration on the same plan is retried up to
    /// `max_write_retries` times after the first attempt before surfacing
    /// as a conflict.
    pub async fn register_execution(&self, plan_id: i32, data: &RegisterExecution) -> AppResult<HistoryEntry> {
        scheduling::validate_execution(data)?;
        data.validate()?;
        let executed_at = data.executed_at.unwrap_or_else(Utc::now);
        let attempts = self.write_attempts();

        for attempt in 1..=attempts {
            match self
                .repository
                .plans
                .register_execution(plan_id, executed_at, data, self.config.lock_timeout_ms)
                .await
            {
                Ok((entry, plan)) => {
                    tracing::info!(
                        plan_id,
                        history_id = entry.id,
                        next_due_date = %plan.next_due_date,
                        "Lubrication registered by {}",
                        entry.technician
                    );
                    return Ok(entry);
                }
                Err(AppError::Database(e)) if is_write_conflict(&e) => {
                    tracing::warn!(plan_id, attempt, "Concurrent write on plan, retrying: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Conflict(format!(
            "Plan {} is being updated concurrently, try again",
            plan_id
        )))
    }

    /// First try plus configured retries
    fn write_attempts(&self) -> u32 {
        self.config.max_write_retries.saturating_add(1)
    }

    /// Execution history, newest first
    pub async fn list_history(&self, plan_id: Option<i32>, limit: i64) -> AppResult<Vec<HistoryEntry>> {
        if let Some(id) = plan_id {
            self.repository.plans.get_by_id(id).await?;
        }
        self.repository.history.list(plan_id, limit).await
    }

    /// Execution history across an equipment unit's plans
    pub async fn list_equipment_history(&self, equipment_id: i32, limit: i64) -> AppResult<Vec<HistoryEntry>> {
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.history.list_for_equipment(equipment_id, limit).await
    }

    pub async fn list_plans(&self) -> AppResult<Vec<PlanDetails>> {
        self.repository.plans.list_details().await
    }

    pub async fn get_plan(&self, id: i32) -> AppResult<LubricationPlan> {
        self.repository.plans.get_by_id(id).await
    }

    pub async fn get_equipment_plan(&self, equipment_id: i32) -> AppResult<LubricationPlan> {
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.plans.get_by_equipment(equipment_id).await
    }

    /// Edit a plan's interval, quantity or lubricant
    pub async fn update_plan(&self, id: i32, data: &UpdatePlan) -> AppResult<LubricationPlan> {
        data.validate()?;
        let plan = self.repository.plans.update(id, data).await?;
        tracing::info!(
            plan_id = id,
            interval_days = plan.interval_days,
            next_due_date = %plan.next_due_date,
            "Plan updated"
        );
        Ok(plan)
    }
}
