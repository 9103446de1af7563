//! Schedule generation and export handlers

use axum::extract::State;
use tracing::{debug, info, warn};

use crate::api::middleware::SessionKey;
use crate::api::state::AppState;
use crate::api::types::{ApiError, CsvDownload, Json, PdfDownload};
use crate::domain::{generate, DomainError, ScheduleRequest, SessionId, WeeklySchedule};
use crate::infrastructure::export::ExportFormat;
use crate::infrastructure::observability::{
    record_export, record_schedule_generated, record_validation_failure,
};

/// Message returned when a session asks for an export before generating
pub const NO_SCHEDULE_MESSAGE: &str = "No schedule available. Please generate one first.";

const GENERATION_FAILED_PREFIX: &str = "Schedule generation failed: ";

/// POST /api/generate
pub async fn generate_schedule(
    State(state): State<AppState>,
    SessionKey(session): SessionKey,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<WeeklySchedule>, ApiError> {
    debug!(
        session = %session,
        courses = request.courses.len(),
        "Generating schedule"
    );

    let schedule = match generate(&request.profile, &request.courses, &state.settings) {
        Ok(schedule) => schedule,
        Err(DomainError::Validation { message }) => {
            record_validation_failure();
            debug!(session = %session, error = %message, "Rejected schedule request");
            return Err(ApiError::bad_request(format!(
                "{}{}",
                GENERATION_FAILED_PREFIX, message
            )));
        }
        Err(e) => {
            warn!(session = %session, error = %e, "Schedule generation failed");
            return Err(ApiError::from(e));
        }
    };

    record_schedule_generated(request.courses.len(), schedule.total_weekly_hours);

    let stored = state.store.save(&session, schedule).await?;

    info!(
        session = %session,
        weekly_hours = stored.total_weekly_hours,
        "Schedule generated"
    );

    Ok(Json(WeeklySchedule::clone(&stored)))
}

/// GET /api/download/csv
pub async fn download_csv(
    State(state): State<AppState>,
    SessionKey(session): SessionKey,
) -> Result<Json<CsvDownload>, ApiError> {
    let schedule = latest_schedule(&state, &session).await?;
    let download = CsvDownload::from_schedule(&schedule);

    record_export(ExportFormat::Csv.extension(), download.content.len());
    debug!(session = %session, filename = %download.filename, "Serving CSV export");

    Ok(Json(download))
}

/// GET /api/download/pdf
pub async fn download_pdf(
    State(state): State<AppState>,
    SessionKey(session): SessionKey,
) -> Result<Json<PdfDownload>, ApiError> {
    let schedule = latest_schedule(&state, &session).await?;

    let download = tokio::task::spawn_blocking(move || PdfDownload::from_schedule(&schedule))
        .await
        .map_err(|e| ApiError::internal(format!("PDF rendering failed: {}", e)))?;

    record_export(ExportFormat::Pdf.extension(), download.decoded_len());
    debug!(session = %session, filename = %download.filename, "Serving PDF export");

    Ok(Json(download))
}

async fn latest_schedule(
    state: &AppState,
    session: &SessionId,
) -> Result<std::sync::Arc<WeeklySchedule>, ApiError> {
    state
        .store
        .latest(session)
        .await?
        .ok_or_else(|| ApiError::not_found(NO_SCHEDULE_MESSAGE))
}
