//! HTTP API module for the Working Time Engine.
//!
//! This module provides the REST API endpoints for calculating per-day
//! working time, either from entries posted with the request or from the
//! shared entry source.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EntryRequest, UserRequest, WorkingTimeQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
