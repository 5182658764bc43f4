//! Request types for the Working Time Engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint and the query parameters of the per-user endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{TimeEntry, User};

/// Request body for the `/calculate` endpoint.
///
/// Carries the entries inline instead of reading them from the shared
/// entry source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The user the entries belong to.
    pub user: UserRequest,
    /// The calendar year to calculate.
    pub year: i32,
    /// Candidate entries, including those on the days around the year.
    #[serde(default)]
    pub entries: Vec<EntryRequest>,
}

/// User information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    /// Unique identifier for the user.
    pub id: String,
    /// Tenant whose settings apply.
    #[serde(default)]
    pub tenant: Option<String>,
}

/// Time entry in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    /// Unique identifier for the entry.
    pub id: String,
    /// Local begin of the entry.
    pub begin: NaiveDateTime,
    /// Local end of the entry.
    pub end: NaiveDateTime,
    /// Unworked seconds within the entry.
    #[serde(default)]
    pub break_seconds: i64,
}

/// Query parameters of `GET /users/:user_id/working-time/:year`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkingTimeQuery {
    /// Tenant whose settings apply.
    #[serde(default)]
    pub tenant: Option<String>,
}

impl From<UserRequest> for User {
    fn from(req: UserRequest) -> Self {
        User {
            id: req.id,
            tenant: req.tenant,
        }
    }
}

impl From<EntryRequest> for TimeEntry {
    fn from(req: EntryRequest) -> Self {
        TimeEntry {
            id: req.id,
            begin: req.begin,
            end: req.end,
            break_seconds: req.break_seconds,
        }
    }
}
