//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, warn};

use kennel_core::constants::{REGISTER_SUCCESS_MESSAGE, STATUS_OK, STATUS_VALIDATION_FAILED};
use kennel_core::error::KennelError;
use kennel_core::traits::PetRegistry;
use kennel_core::types::RecordRef;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// POST /api/v1/pets
///
/// Validation failures, including bodies that do not parse, are answered
/// with a non-zero `status_code` rather than the generic error body.
pub async fn register_pet(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let outcome = match payload {
        Ok(Json(req)) => state.service.register(req).await,
        Err(rejection) => Err(KennelError::ValidationError(format!(
            "invalid request body: {}",
            rejection.body_text()
        ))),
    };

    match outcome {
        Ok(record) => Ok((
            StatusCode::OK,
            Json(RegisterResponse {
                status_code: STATUS_OK,
                message: REGISTER_SUCCESS_MESSAGE.into(),
                record: Some(record),
            }),
        )),
        Err(KennelError::ValidationError(message)) => {
            warn!(%message, "Rejected registration");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RegisterResponse {
                    status_code: STATUS_VALIDATION_FAILED,
                    message,
                    record: None,
                }),
            ))
        }
        Err(err) => Err(ApiError::from(err)),
    }
}

/// POST /api/v1/pets/search
pub async fn search_pets(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(rejection = %rejection.body_text(), "Rejected search body");
        ApiError::from(KennelError::MalformedFilter(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    })?;

    let (pets, mode) = state.service.search(req).await.map_err(|err| {
        if err.is_validation_error() {
            warn!(error = %err, "Rejected search");
        }
        ApiError::from(err)
    })?;

    let pets: Vec<PetDto> = pets.iter().map(|pet| PetDto::from(pet.as_ref())).collect();
    debug!(matches = pets.len(), %mode, "Search complete");

    Ok(Json(SearchResponse {
        total: pets.len() as u64,
        pets,
        mode,
    }))
}

/// GET /api/v1/pets/:position
pub async fn get_pet(
    State(state): State<Arc<AppState>>,
    Path(position): Path<usize>,
) -> Result<Json<PetDto>> {
    let record = RecordRef(position);
    let pet = state
        .service
        .get(record)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No pet at position {position}")))?;

    Ok(Json(PetDto::from(pet.as_ref())))
}

/// GET /api/v1/pets/stats
pub async fn get_registry_stats(
    State(state): State<Arc<AppState>>,
) -> Json<RegistryStatsResponse> {
    Json(RegistryStatsResponse::from(state.registry.stats()))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = state.started_at.elapsed().as_secs();

    let count = state.registry.count().await.unwrap_or(0);

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: uptime,
        pets_count: count,
    })
}
