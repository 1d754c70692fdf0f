//! Patient HTTP Routes
//!
//! Endpoints for listing, sorting, creating, editing and deleting
//! patients, plus the two static informational routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::patient::{NewPatient, PatientPatch, PatientView};
use crate::store::{PatientListing, PatientStore, SortOrder};

use super::errors::{ApiError, ApiResult};

/// Message returned by `/`
pub const WELCOME_MESSAGE: &str = "Patient Management System API";

/// Message returned by `/about`
pub const ABOUT_MESSAGE: &str = "This is a Patient Management System API. \
It allows you to manage patient records: create, view, sort, edit and delete \
patients, with BMI and a health verdict computed for every record.";

// ==================
// Shared State
// ==================

/// Application context handed to every handler
#[derive(Debug)]
pub struct AppState {
    pub store: PatientStore,
}

impl AppState {
    pub fn new(store: PatientStore) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
}

// ==================
// Patient Routes
// ==================

/// Create patient routes
pub fn patient_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route("/view", get(view_handler))
        .route("/patient/:id", get(get_patient_handler))
        .route("/sort", get(sort_handler))
        .route("/create", post(create_handler))
        .route("/edit/:id", put(edit_handler))
        .route("/delete/:id", delete(delete_handler))
        .with_state(state)
}

async fn home_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new(WELCOME_MESSAGE))
}

async fn about_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new(ABOUT_MESSAGE))
}

async fn view_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<PatientListing>> {
    Ok(Json(state.store.list_all()?))
}

async fn get_patient_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PatientView>> {
    Ok(Json(state.store.get(&id)?))
}

async fn sort_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<PatientView>>> {
    // Absent is a missing required parameter (422); a bad value is 400
    let sort_by = query.sort_by.ok_or_else(|| ApiError::Body {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "sort_by is required".to_string(),
    })?;
    let order = query
        .order_by
        .unwrap_or_else(|| SortOrder::default().as_str().to_string());

    Ok(Json(state.store.list_sorted(&sort_by, &order)?))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(patient) = payload?;
    state.store.create(patient)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Patient created successfully")),
    ))
}

async fn edit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PatientPatch>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(patch) = payload?;
    state.store.update(&id, patch)?;
    Ok(Json(MessageResponse::new("Patient updated successfully")))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete(&id)?;
    Ok(Json(MessageResponse::new("Patient deleted successfully")))
}
