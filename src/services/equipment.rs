//! Equipment registry service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
        plan::LubricationPlan,
        EquipmentStatus,
    },
    repository::Repository,
    scheduling,
};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List equipment, active units by default
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if skip < 0 {
            return Err(AppError::Validation("skip must not be negative".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        let status = query.status.unwrap_or(EquipmentStatus::Active);
        self.repository.equipment.list(status, skip, limit).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Register equipment together with its lubrication plan.
    ///
    /// With bearing dimensions and no explicit quantity, the plan quantity
    /// defaults to the SKF estimate.
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<(Equipment, LubricationPlan)> {
        data.validate()?;
        let quantity = suggested_quantity(data)?;

        let (equipment, plan) = self
            .repository
            .equipment
            .create(data, quantity, Utc::now())
            .await?;

        tracing::info!(
            equipment_id = equipment.id,
            plan_id = plan.id,
            next_due_date = %plan.next_due_date,
            "Equipment registered: {}",
            equipment.name
        );
        Ok((equipment, plan))
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = self.repository.equipment.update(id, data).await?;
        tracing::info!(equipment_id = id, "Equipment updated: {}", equipment.name);
        Ok(equipment)
    }

    /// Soft delete: the unit becomes inactive and drops out of scheduling
    pub async fn deactivate(&self, id: i32) -> AppResult<Equipment> {
        let equipment = self
            .repository
            .equipment
            .set_status(id, EquipmentStatus::Inactive)
            .await?;
        tracing::info!(equipment_id = id, "Equipment deactivated: {}", equipment.name);
        Ok(equipment)
    }
}

/// Explicit quantity wins; otherwise SKF estimate from bearing dimensions, if both are given
fn suggested_quantity(data: &CreateEquipment) -> AppResult<Option<f64>> {
    if data.quantity_grams.is_some() {
        return Ok(data.quantity_grams);
    }
    match (data.bearing_diameter_mm, data.bearing_width_mm) {
        (Some(d), Some(b)) => scheduling::grease_grams(d, b)
            .map(|g| Some(scheduling::skf::round_grams(g))),
        (None, None) => Ok(None),
        _ => Err(AppError::Validation(
            "Both bearing_diameter_mm and bearing_width_mm are required for an SKF estimate"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateEquipment {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_explicit_quantity_wins() {
        let data = request(
            r#"{"name": "Fan F-2", "quantity_grams": 8.0, "bearing_diameter_mm": 20, "bearing_width_mm": 10}"#,
        );
        assert_eq!(suggested_quantity(&data).unwrap(), Some(8.0));
    }

    #[test]
    fn test_quantity_from_bearing_dimensions() {
        let data = request(r#"{"name": "Fan F-2", "bearing_diameter_mm": 52, "bearing_width_mm": 15}"#);
        assert_eq!(suggested_quantity(&data).unwrap(), Some(3.9));
    }

    #[test]
    fn test_no_dimensions_no_quantity() {
        let data = request(r#"{"name": "Fan F-2"}"#);
        assert_eq!(suggested_quantity(&data).unwrap(), None);
    }

    #[test]
    fn test_partial_or_invalid_dimensions_rejected() {
        let partial = request(r#"{"name": "Fan F-2", "bearing_diameter_mm": 52}"#);
        assert!(matches!(suggested_quantity(&partial), Err(AppError::Validation(_))));

        let zero = request(r#"{"name": "Fan F-2", "bearing_diameter_mm": 0, "bearing_width_mm": 15}"#);
        assert!(matches!(suggested_quantity(&zero), Err(AppError::Validation(_))));
    }
}
