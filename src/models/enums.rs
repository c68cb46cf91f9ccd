//! Shared domain enums, stored as constrained text columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements `as_str`, `FromStr`, `Display` and text-backed SQLx conversions
macro_rules! text_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($text => Ok($ty::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($ty), s)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Criticality
// ---------------------------------------------------------------------------

/// Equipment criticality class (A/B/C in plant terminology)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    #[serde(alias = "A")]
    Critical,
    #[serde(alias = "B")]
    Medium,
    #[serde(alias = "C")]
    #[default]
    Low,
}

text_enum!(Criticality {
    Critical => "critical",
    Medium => "medium",
    Low => "low",
});

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Operational state of an equipment unit. Only active units are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

text_enum!(EquipmentStatus {
    Active => "active",
    Inactive => "inactive",
    Maintenance => "maintenance",
});

impl EquipmentStatus {
    pub fn is_schedulable(&self) -> bool {
        matches!(self, EquipmentStatus::Active)
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Supervisor,
    #[default]
    Technician,
}

text_enum!(UserRole {
    Admin => "admin",
    Supervisor => "supervisor",
    Technician => "technician",
});

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Due-status classification, derived at read time and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Overdue,
    DueNow,
    Upcoming,
}

impl Urgency {
    /// Classify a signed whole-day distance to the due date
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        match days_remaining {
            d if d < 0 => Urgency::Overdue,
            0 | 1 => Urgency::DueNow,
            _ => Urgency::Upcoming,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "OVERDUE",
            Urgency::DueNow => "DUE_NOW",
            Urgency::Upcoming => "UPCOMING",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_boundaries() {
        assert_eq!(Urgency::from_days_remaining(-30), Urgency::Overdue);
        assert_eq!(Urgency::from_days_remaining(-1), Urgency::Overdue);
        assert_eq!(Urgency::from_days_remaining(0), Urgency::DueNow);
        assert_eq!(Urgency::from_days_remaining(1), Urgency::DueNow);
        assert_eq!(Urgency::from_days_remaining(2), Urgency::Upcoming);
    }

    #[test]
    fn test_urgency_serializes_as_label() {
        let json = serde_json::to_string(&Urgency::DueNow).unwrap();
        assert_eq!(json, "\"DUE_NOW\"");
        assert_eq!(Urgency::Overdue.to_string(), "OVERDUE");
    }

    #[test]
    fn test_criticality_accepts_plant_codes() {
        let c: Criticality = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(c, Criticality::Critical);
        let c: Criticality = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(c, Criticality::Medium);
        assert_eq!(Criticality::default(), Criticality::Low);
    }

    #[test]
    fn test_status_parse_and_schedulable() {
        assert_eq!("Maintenance".parse::<EquipmentStatus>(), Ok(EquipmentStatus::Maintenance));
        assert!("retired".parse::<EquipmentStatus>().is_err());
        assert!(EquipmentStatus::Active.is_schedulable());
        assert!(!EquipmentStatus::Inactive.is_schedulable());
        assert!(!EquipmentStatus::Maintenance.is_schedulable());
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [UserRole::Admin, UserRole::Supervisor, UserRole::Technician] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
    }
}
