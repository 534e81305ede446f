//! Application state for the attendance API.
//!
//! The store sits behind a single mutex so check events are applied one at a
//! time and the `(employee_id, date)` key stays unique.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{EngineError, EngineResult};
use crate::store::AttendanceStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<AttendanceStore>>,
}

impl AppState {
    /// Creates a new application state owning the store.
    pub fn new(store: AttendanceStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for the duration of one operation.
    ///
    /// A poisoned lock is reported as a persistence failure.
    pub fn store(&self) -> EngineResult<MutexGuard<'_, AttendanceStore>> {
        self.store.lock().map_err(|_| EngineError::Persistence {
            key: "store".to_string(),
            message: "attendance store lock poisoned".to_string(),
        })
    }
}
