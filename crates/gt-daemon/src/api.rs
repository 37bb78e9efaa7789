// api.rs — HTTP routes for the goal API.
//
// Handlers only translate between HTTP and GoalService. Validation and
// search matching happen in the service, never here.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use gt_goal::{option_entries, Goal, GoalError, GoalService, NewGoal, OptionEntry, Recurrence, Tag};

use crate::error::DaemonError;

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GoalService>,
}

impl AppState {
    pub fn new(service: GoalService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the API router. CORS is layered on by the server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/options", get(goal_options))
        .route("/goals/{id}", get(get_goal))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser frontend. `"*"` in `origins` allows any origin.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, DaemonError> {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| DaemonError::InvalidOrigin(o.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Errors returned from handlers.
#[derive(Debug)]
pub enum ApiError {
    Goal(GoalError),
    /// The request body was not a JSON goal.
    Body(String),
}

impl From<GoalError> for ApiError {
    fn from(e: GoalError) -> Self {
        ApiError::Goal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Body(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid_body", "message": message }),
            ),
            ApiError::Goal(e) => {
                let (status, kind) = match &e {
                    GoalError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
                    GoalError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                    e if e.is_storage() => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
                };
                if status.is_server_error() {
                    tracing::error!("goal request failed: {}", e);
                }
                let mut body = json!({ "error": kind, "message": e.to_string() });
                if let GoalError::Validation { field, .. } = &e {
                    body["field"] = json!(field);
                }
                (status, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub recurrence: Vec<OptionEntry>,
    pub tag: Vec<OptionEntry>,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn create_goal(
    State(state): State<AppState>,
    payload: Result<Json<NewGoal>, JsonRejection>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let Json(input) = payload.map_err(|rejection| ApiError::Body(rejection.body_text()))?;
    let goal = state.service.create(input)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn list_goals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let goals = match query.search {
        Some(term) => state.service.search(&term)?,
        None => state.service.list()?,
    };
    Ok(Json(goals))
}

async fn get_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Goal>, ApiError> {
    Ok(Json(state.service.get(id)?))
}

async fn goal_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        recurrence: option_entries::<Recurrence>(),
        tag: option_entries::<Tag>(),
    })
}
