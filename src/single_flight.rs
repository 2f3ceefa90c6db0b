//! Per-key in-flight guard.
//!
//! A key stays claimed for as long as the returned [`InFlightGuard`] lives.
//! A second claim on the same key fails immediately instead of queueing.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::app_error::AppError;

#[derive(Debug, Default)]
pub struct SingleFlight {
    keys: Mutex<HashSet<String>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, key: impl Into<String>) -> Result<InFlightGuard<'_>, AppError> {
        let key = key.into();
        let mut keys = self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !keys.insert(key.clone()) {
            return Err(AppError::Busy(key));
        }
        Ok(InFlightGuard { owner: self, key })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(key)
    }
}

#[must_use = "the key is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a SingleFlight,
    key: String,
}

impl InFlightGuard<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.key);
    }
}
