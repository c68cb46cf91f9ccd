//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{Criticality, EquipmentStatus};

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Unique equipment name
    pub name: String,
    pub component: Option<String>,
    pub criticality: Criticality,
    pub location: Option<String>,
    /// Bearing designation (e.g. "6205-2RS")
    pub bearing_model: Option<String>,
    /// Default lubricant for new plans
    pub lubricant_type: Option<String>,
    /// Default grease quantity per service, in grams
    pub quantity_grams: Option<f64>,
    /// Default service interval, in days
    pub interval_days: i32,
    pub status: EquipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request. A lubrication plan is created alongside.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 150, message = "Name must be 1 to 150 characters"))]
    pub name: String,
    #[validate(length(max = 150))]
    pub component: Option<String>,
    #[serde(default)]
    pub criticality: Criticality,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub bearing_model: Option<String>,
    #[validate(length(max = 100))]
    pub lubricant_type: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be positive"))]
    pub quantity_grams: Option<f64>,
    #[serde(default = "default_interval_days")]
    #[validate(range(min = 1, max = 3650, message = "Interval must be 1 to 3650 days"))]
    pub interval_days: i32,
    /// Bearing outer diameter (mm), used to suggest a quantity when none is given
    pub bearing_diameter_mm: Option<f64>,
    /// Bearing width (mm), used to suggest a quantity when none is given
    pub bearing_width_mm: Option<f64>,
}

fn default_interval_days() -> i32 {
    30
}

/// Update equipment request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 150, message = "Name must be 1 to 150 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 150))]
    pub component: Option<String>,
    pub criticality: Option<Criticality>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub bearing_model: Option<String>,
    #[validate(length(max = 100))]
    pub lubricant_type: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be positive"))]
    pub quantity_grams: Option<f64>,
    #[validate(range(min = 1, max = 3650, message = "Interval must be 1 to 3650 days"))]
    pub interval_days: Option<i32>,
    pub status: Option<EquipmentStatus>,
}

/// Equipment list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Filter by status (defaults to active)
    pub status: Option<EquipmentStatus>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Equipment count per criticality class (dashboard)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CriticalityCount {
    pub criticality: Criticality,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let data: CreateEquipment = serde_json::from_str(r#"{"name": "Pump P-101"}"#).unwrap();
        assert_eq!(data.interval_days, 30);
        assert_eq!(data.criticality, Criticality::Low);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_values() {
        let data: CreateEquipment =
            serde_json::from_str(r#"{"name": "", "interval_days": 0, "quantity_grams": -1.0}"#).unwrap();
        let errors = data.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("interval_days"));
        assert!(fields.contains_key("quantity_grams"));
    }

    #[test]
    fn test_interval_upper_bound() {
        let data: CreateEquipment =
            serde_json::from_str(r#"{"name": "Pump P-102", "interval_days": 2000000000}"#).unwrap();
        assert!(data.validate().unwrap_err().field_errors().contains_key("interval_days"));

        let update = UpdateEquipment { interval_days: Some(3651), ..Default::default() };
        assert!(update.validate().is_err());
    }
}
