//! HTTP request handlers for the Working Time Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::TimeSpanCalculator;
use crate::error::EngineResult;
use crate::models::{TimeEntry, User, WorkingTimeResult};
use crate::source::InMemoryEntrySource;

use super::request::{CalculationRequest, WorkingTimeQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/users/:user_id/working-time/:year", get(working_time_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Calculates working time from the entries carried in the request body.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's description of the problem
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }
            .into_response();
        }
    };

    let user: User = request.user.into();
    let year = request.year;
    let entries: Vec<TimeEntry> = request.entries.into_iter().map(Into::into).collect();
    let entries_count = entries.len();

    let calculator = TimeSpanCalculator::new(
        InMemoryEntrySource::for_user(user.id.clone(), entries),
        state.config().settings_for(user.tenant.as_deref()),
    );

    let start_time = Instant::now();
    let result = calculator.calculate_with_trace(&user, year);
    respond(correlation_id, &user, year, entries_count, start_time, result)
}

/// Handler for GET /users/:user_id/working-time/:year endpoint.
///
/// Calculates working time from the entries held by the shared entry source.
async fn working_time_handler(
    State(state): State<AppState>,
    Path((user_id, year)): Path<(String, i32)>,
    Query(query): Query<WorkingTimeQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        user_id = %user_id,
        year,
        "Processing working time request"
    );

    let user = User {
        id: user_id,
        tenant: query.tenant,
    };
    let calculator = state.calculator_for(&user);

    let start_time = Instant::now();
    // The entry source may block on I/O
    let task_user = user.clone();
    let result = tokio::task::spawn_blocking(move || {
        calculator.calculate_with_trace(&task_user, year)
    })
    .await;

    match result {
        Ok(result) => respond(correlation_id, &user, year, 0, start_time, result),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation task failed"
            );
            ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CALCULATION_ERROR", "Calculation failed"),
            }
            .into_response()
        }
    }
}

fn respond(
    correlation_id: Uuid,
    user: &User,
    year: i32,
    entries_count: usize,
    start_time: Instant,
    result: EngineResult<WorkingTimeResult>,
) -> Response {
    match result {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                user_id = %user.id,
                year,
                entries_count,
                days = result.days.len(),
                total_seconds = result.total_seconds,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                user_id = %user.id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
