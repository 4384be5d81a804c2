//! Optional instrumentation hooks for index writes.
//!
//! Telemetry is modeled as an observer so it can be swapped or disabled
//! without touching protocol logic. Every hook has an empty default body and
//! `()` is the no-op observer.

use crate::error::WriteError;

/// Receives notifications about create/update outcomes.
pub trait IndexObserver {
    fn on_create_succeeded(&self, _record_id: &str) {}
    fn on_create_failed(&self, _error: &WriteError) {}
    fn on_update_succeeded(&self, _record_id: &str) {}
    fn on_update_failed(&self, _error: &WriteError) {}
}

/// The no-op observer.
impl IndexObserver for () {}
