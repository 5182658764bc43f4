//! Application state for the Working Time Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::TimeSpanCalculator;
use crate::config::ConfigLoader;
use crate::models::User;
use crate::source::EntrySource;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded calculator configuration and the entry source backing the
/// per-user endpoint.
#[derive(Clone)]
pub struct AppState {
    /// The loaded calculator configuration.
    config: Arc<ConfigLoader>,
    /// Source of stored entries.
    source: Arc<dyn EntrySource>,
}

impl AppState {
    /// Creates a new application state with the given configuration and entry source.
    pub fn new<S: EntrySource + 'static>(config: ConfigLoader, source: S) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Builds a calculator over the shared entry source with the user's tenant settings.
    pub fn calculator_for(&self, user: &User) -> TimeSpanCalculator<Arc<dyn EntrySource>> {
        TimeSpanCalculator::new(
            Arc::clone(&self.source),
            self.config.settings_for(user.tenant.as_deref()),
        )
    }
}
