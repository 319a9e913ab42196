//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::{AuthUser, require_session},
    models::{
        AppointmentListResponse, AppointmentRequest, AppointmentTypeListResponse, NewAppointment,
        RegisterResponse, SearchField, TokenResponse, WriteResponse, WriteResult,
    },
    validation::{is_valid_date, is_valid_time, required_fields},
};
use auth::models::LoginCredentials;

pub const INCOMPLETE_DETAILS: &str = "Incomplete Appointment Details";
pub const INVALID_TYPE: &str = "Invalid Appointment Type";
pub const INVALID_DATE: &str = "Invalid Date Given";
pub const INVALID_TIME: &str = "Invalid Time Given";
pub const ID_NOT_FOUND: &str = "ID not found";

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/appointments", post(create_appointment))
        .route(
            "/api/appointments/:id",
            put(update_appointment).delete(delete_appointment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/appointments", get(list_appointments))
        .route("/api/appointment-types", get(list_appointment_types))
        .route("/api/search/doctor/:name", get(search_by_doctor))
        .route("/api/search/clinic/:name", get(search_by_clinic))
        .route("/api/search/appointments/:type", get(search_by_type))
        .route("/user", post(register))
        .route("/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "clinic-api"
    }))
}

/// List every appointment
pub async fn list_appointments(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let appointments = state.appointments.list().await.map_err(|e| {
        error!("Failed to list appointments: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(AppointmentListResponse { appointments }))
}

/// List the appointment type catalog
pub async fn list_appointment_types(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let appointment_types = state.appointment_types.list_types().await.map_err(|e| {
        error!("Failed to list appointment types: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(AppointmentTypeListResponse { appointment_types }))
}

/// Create an appointment
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<AppointmentRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let appointment = validate_appointment(&state, &payload).await?;

    let created = state.appointments.create(&appointment).await.map_err(|e| {
        error!("Failed to create appointment: {}", e);
        ApiError::from(e)
    })?;

    info!("Appointment {} created by user {}", created.id, user.id);
    Ok(Json(WriteResponse {
        message: "Appointment created successfully",
        result: WriteResult::inserted(created.id),
    }))
}

/// Overwrite an appointment
pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<AppointmentRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let appointment = validate_appointment(&state, &payload).await?;
    let id = parse_id(&id)?;

    let updated = state
        .appointments
        .update(id, &appointment)
        .await
        .map_err(|e| {
            error!("Failed to update appointment {}: {}", id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound(ID_NOT_FOUND.to_string()))?;

    info!("Appointment {} updated by user {}", updated.id, user.id);
    Ok(Json(WriteResponse {
        message: "Appointment has been updated successfully",
        result: WriteResult::updated(1),
    }))
}

/// Delete an appointment
pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;

    let deleted = state.appointments.delete(id).await.map_err(|e| {
        error!("Failed to delete appointment {}: {}", id, e);
        ApiError::from(e)
    })?;

    if !deleted {
        return Err(ApiError::NotFound(ID_NOT_FOUND.to_string()));
    }

    info!("Appointment {} deleted by user {}", id, user.id);
    Ok(Json(WriteResponse {
        message: "Appointment has been deleted",
        result: WriteResult::deleted(1),
    }))
}

/// Appointments whose doctor contains the given text
pub async fn search_by_doctor(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    search_by_field(&state, SearchField::Doctor, &name).await
}

/// Appointments whose clinic contains the given text
pub async fn search_by_clinic(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    search_by_field(&state, SearchField::Clinic, &name).await
}

/// Appointments of the named appointment type
pub async fn search_by_type(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let appointment_type = state
        .appointment_types
        .find_type_by_name(&type_name)
        .await
        .map_err(|e| {
            error!("Failed to resolve appointment type {}: {}", type_name, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::Validation(INVALID_TYPE.to_string()))?;

    let appointments = state
        .appointments
        .find_by_type(appointment_type.id)
        .await
        .map_err(|e| {
            error!("Failed to search appointments by type: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(AppointmentListResponse { appointments }))
}

/// Register a user
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginCredentials>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = state.credentials.register(&email, &password).await?;

    Ok(Json(RegisterResponse {
        result: WriteResult::inserted(user.id),
    }))
}

/// Exchange an email and password for a session token
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginCredentials>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let token = state.credentials.login(&email, &password).await?;

    Ok(Json(TokenResponse { token }))
}

async fn search_by_field(
    state: &AppState,
    field: SearchField,
    needle: &str,
) -> ApiResult<Json<AppointmentListResponse>> {
    let appointments = state
        .appointments
        .find_by_field(field, needle)
        .await
        .map_err(|e| {
            error!("Failed to search appointments by {}: {}", field.column(), e);
            ApiError::from(e)
        })?;

    Ok(Json(AppointmentListResponse { appointments }))
}

/// Check a create or update body in order: presence, type, date, time
async fn validate_appointment(
    state: &AppState,
    request: &AppointmentRequest,
) -> ApiResult<NewAppointment> {
    let fields = required_fields(request)
        .ok_or_else(|| ApiError::Validation(INCOMPLETE_DETAILS.to_string()))?;

    let appointment_type = state
        .appointment_types
        .find_type_by_name(fields.appttype)
        .await
        .map_err(|e| {
            error!("Failed to resolve appointment type {}: {}", fields.appttype, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::Validation(INVALID_TYPE.to_string()))?;

    if !is_valid_date(fields.date) {
        return Err(ApiError::Validation(INVALID_DATE.to_string()));
    }

    if !is_valid_time(fields.time) {
        return Err(ApiError::Validation(INVALID_TIME.to_string()));
    }

    Ok(NewAppointment {
        clinic: fields.clinic.to_string(),
        doctor: fields.doctor.to_string(),
        appttype: appointment_type.id,
        datetime: fields.datetime(),
    })
}

/// An id that is not a UUID cannot name a stored appointment
fn parse_id(id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(ID_NOT_FOUND.to_string()))
}
