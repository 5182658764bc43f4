//! Working Time Engine
//!
//! This crate derives, per calendar day, the effective time a user worked from
//! raw recorded time entries: overlapping and near-adjacent entries are merged
//! into continuous spans, entries from forgotten timers are discarded, and
//! spans running past midnight or a year boundary are attributed to the
//! correct day.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
