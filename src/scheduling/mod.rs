//! Lubrication scheduling rules.
//!
//! Pure functions over plans and a caller-supplied `now`; nothing here touches
//! the database. Urgency is derived on every call and never persisted.

pub mod skf;

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        history::RegisterExecution,
        plan::{PlanDetails, UpcomingPlan},
        Urgency,
    },
};

pub use skf::grease_grams;

/// Reject a lookahead window shorter than one day
pub fn validate_horizon(horizon_days: i64) -> AppResult<()> {
    if horizon_days < 1 {
        return Err(AppError::Validation(format!(
            "Horizon must be at least 1 day, got {}",
            horizon_days
        )));
    }
    Ok(())
}

/// Signed whole days from `now` until `next_due_date`, floored.
///
/// Any fraction of a second past due yields -1; 23h59m ahead yields 0.
pub fn days_remaining(next_due_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = next_due_date - now;
    // num_days truncates toward zero
    let days = delta.num_days();
    if delta < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// Whether a plan falls due within `horizon_days` of `now` and its equipment is active
pub fn is_due_within(plan: &PlanDetails, horizon_days: i64, now: DateTime<Utc>) -> AppResult<bool> {
    validate_horizon(horizon_days)?;
    Ok(plan.equipment_status.is_schedulable()
        && plan.next_due_date <= now + Duration::days(horizon_days))
}

/// Plans due within the horizon, earliest first (ties by plan id), classified
pub fn list_upcoming(
    plans: &[PlanDetails],
    horizon_days: i64,
    now: DateTime<Utc>,
) -> AppResult<Vec<UpcomingPlan>> {
    validate_horizon(horizon_days)?;

    let mut due: Vec<&PlanDetails> = Vec::new();
    for plan in plans {
        if is_due_within(plan, horizon_days, now)? {
            due.push(plan);
        }
    }
    due.sort_by(|a, b| {
        a.next_due_date
            .cmp(&b.next_due_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(due
        .into_iter()
        .map(|plan| {
            let remaining = days_remaining(plan.next_due_date, now);
            UpcomingPlan {
                plan_id: plan.id,
                equipment_id: plan.equipment_id,
                equipment_name: plan.equipment_name.clone(),
                criticality: plan.criticality,
                lubricant_type: plan.lubricant_type.clone(),
                quantity_grams: plan.quantity_grams,
                next_due_date: plan.next_due_date,
                days_remaining: remaining,
                urgency: Urgency::from_days_remaining(remaining),
            }
        })
        .collect())
}

/// Count upcoming plans per urgency: (overdue, due_now, upcoming)
pub fn count_by_urgency(upcoming: &[UpcomingPlan]) -> (usize, usize, usize) {
    upcoming.iter().fold((0, 0, 0), |(o, d, u), p| match p.urgency {
        Urgency::Overdue => (o + 1, d, u),
        Urgency::DueNow => (o, d + 1, u),
        Urgency::Upcoming => (o, d, u + 1),
    })
}

/// Check execution fields before any write is attempted
pub fn validate_execution(data: &RegisterExecution) -> AppResult<()> {
    if !data.quantity_applied.is_finite() || data.quantity_applied <= 0.0 {
        return Err(AppError::Validation(format!(
            "Quantity applied must be positive, got {}",
            data.quantity_applied
        )));
    }
    if data.technician.trim().is_empty() {
        return Err(AppError::Validation("Technician is required".to_string()));
    }
    Ok(())
}
