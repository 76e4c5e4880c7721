//! Item status endpoints used by the result list and record view

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::status::StatusEntry,
    AppState,
};

/// Requested record ids, as `id[]=...` (front end) or `id=...`
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default, rename = "id[]")]
    pub bracketed: Vec<String>,
    #[serde(default)]
    pub id: Vec<String>,
}

impl StatusQuery {
    fn ids(self) -> AppResult<Vec<String>> {
        let ids: Vec<String> = self
            .bracketed
            .into_iter()
            .chain(self.id)
            .filter(|id| !id.trim().is_empty())
            .collect();
        if ids.is_empty() {
            return Err(AppError::BadRequest("At least one id is required".to_string()));
        }
        Ok(ids)
    }
}

/// AJAX envelope
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub data: Vec<StatusEntry>,
    /// Always "OK"
    pub status: String,
}

fn respond(entries: Vec<StatusEntry>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache, must-revalidate")],
        Json(StatusResponse {
            data: entries,
            status: "OK".to_string(),
        }),
    )
}

/// Backend trouble surfaces as one translated, generic message
fn lookup_failed(state: &AppState, error: AppError) -> AppError {
    tracing::error!("Item status lookup failed: {}", error);
    AppError::Unavailable(state.services.translator.translate_key("An error has occurred"))
}

/// Availability summaries for a batch of records
#[utoipa::path(
    get,
    path = "/item-statuses",
    tag = "statuses",
    params(
        ("id[]" = Vec<String>, Query, description = "Record ids, in display order")
    ),
    responses(
        (status = 200, description = "One entry per requested record", body = StatusResponse),
        (status = 400, description = "No ids given", body = crate::error::ErrorResponse),
        (status = 503, description = "Status backend failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_item_statuses(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<impl IntoResponse> {
    let ids = query.ids()?;

    let entries = state
        .services
        .statuses
        .get_item_statuses(&ids)
        .await
        .map_err(|e| lookup_failed(&state, e))?;

    Ok(respond(entries))
}

/// Grouped availability with per-copy details
#[utoipa::path(
    get,
    path = "/item-statuses/full",
    tag = "statuses",
    params(
        ("id[]" = Vec<String>, Query, description = "Record ids")
    ),
    responses(
        (status = 200, description = "Entries for records with data", body = StatusResponse),
        (status = 400, description = "No ids given", body = crate::error::ErrorResponse),
        (status = 503, description = "Status backend failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_full_statuses(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<impl IntoResponse> {
    let ids = query.ids()?;

    let entries = state
        .services
        .statuses
        .get_full_statuses(&ids)
        .await
        .map_err(|e| lookup_failed(&state, e))?;

    Ok(respond(entries))
}
