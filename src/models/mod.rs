//! Core data models for the Working Time Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod entry;
mod user;
mod working_time;

pub use entry::TimeEntry;
pub use user::User;
pub use working_time::{
    AuditStep, AuditTrace, AuditWarning, SegmentAttribution, SpanAttribution, WorkingTimeResult,
    seconds_to_hours,
};
