//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health, lubrication, plans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lubritrack API",
        version = "1.0.0",
        description = "Industrial lubrication maintenance REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::get_equipment_plan,
        equipment::get_equipment_history,
        // Plans
        plans::list_plans,
        plans::get_plan,
        plans::update_plan,
        // Lubrication
        lubrication::list_upcoming,
        lubrication::register_execution,
        lubrication::list_history,
        lubrication::calculate_skf,
        lubrication::get_summary,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentQuery,
            equipment::EquipmentWithPlan,
            equipment::EquipmentHistoryQuery,
            // Plans
            crate::models::plan::LubricationPlan,
            crate::models::plan::PlanDetails,
            crate::models::plan::UpdatePlan,
            crate::models::plan::UpcomingPlan,
            crate::models::plan::UpcomingQuery,
            crate::models::plan::ScheduleSummary,
            // History
            crate::models::history::HistoryEntry,
            crate::models::history::RegisterExecution,
            crate::models::history::HistoryQuery,
            // Lubrication
            lubrication::SkfQuery,
            lubrication::SkfResponse,
            // Enums
            crate::models::enums::Criticality,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::Urgency,
            crate::models::enums::UserRole,
            // Users
            crate::models::user::UserInfo,
            crate::models::user::CreateUser,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment registry"),
        (name = "plans", description = "Lubrication plans"),
        (name = "lubrication", description = "Scheduling, execution registration and history"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_core_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/lubrication/upcoming"));
        assert!(paths.contains_key("/lubrication/plans/{id}/executions"));
        assert!(paths.contains_key("/lubrication/history"));
        assert!(paths.contains_key("/lubrication/skf"));
    }
}
