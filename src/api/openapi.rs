//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, statuses};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Holdings Status API",
        version = "1.0.0",
        description = "Availability summaries for library catalog records",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Statuses
        statuses::get_item_statuses,
        statuses::get_full_statuses,
    ),
    components(
        schemas(
            // Statuses
            statuses::StatusResponse,
            crate::models::status::StatusEntry,
            crate::models::status::ItemStatus,
            crate::models::status::AvailabilityDecision,
            crate::models::status::GroupedAvailability,
            crate::models::status::LocationAvailability,
            crate::models::status::MissingStatus,
            crate::models::enums::PatronOption,
            crate::models::enums::AvailabilityMessage,
            crate::models::enums::ReferenceIndicator,
            crate::models::item_copy::ItemCopy,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "statuses", description = "Holdings availability")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
