//! Data models for Lubritrack

pub mod enums;
pub mod equipment;
pub mod history;
pub mod plan;
pub mod user;

// Re-export commonly used types
pub use enums::{Criticality, EquipmentStatus, Urgency, UserRole};
pub use equipment::Equipment;
pub use history::HistoryEntry;
pub use plan::{LubricationPlan, PlanDetails, UpcomingPlan};
pub use user::{User, UserInfo};
