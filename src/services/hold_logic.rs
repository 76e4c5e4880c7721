//! Hold logic configuration: locations whose copies are never shown

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{error::AppResult, models::item_copy::ItemCopy};

pub trait HoldLogic: Send + Sync {
    fn suppressed_locations(&self) -> AppResult<HashSet<String>>;
}

/// Suppressed locations from the `[holds]` configuration section
#[derive(Debug, Clone, Default)]
pub struct ConfigHoldLogic {
    locations: Vec<String>,
}

impl ConfigHoldLogic {
    pub fn new(locations: Vec<String>) -> Self {
        Self { locations }
    }
}

impl HoldLogic for ConfigHoldLogic {
    fn suppressed_locations(&self) -> AppResult<HashSet<String>> {
        Ok(self.locations.iter().cloned().collect())
    }
}

/// Loads the suppressed locations once, on first use, and keeps them for
/// the lifetime of the process
pub struct SuppressedLocations {
    logic: Arc<dyn HoldLogic>,
    cache: OnceCell<HashSet<String>>,
}

impl SuppressedLocations {
    pub fn new(logic: Arc<dyn HoldLogic>) -> Self {
        Self {
            logic,
            cache: OnceCell::new(),
        }
    }

    /// The cached set. A failed load is not cached; it is retried on the
    /// next call and suppresses nothing in the meantime.
    pub fn get(&self) -> Option<&HashSet<String>> {
        match self.cache.get_or_try_init(|| self.logic.suppressed_locations()) {
            Ok(locations) => Some(locations),
            Err(e) => {
                tracing::warn!("Failed to load suppressed locations: {}", e);
                None
            }
        }
    }

    /// Drop copies shelved at a suppressed location
    pub fn filter(&self, copies: Vec<ItemCopy>) -> Vec<ItemCopy> {
        match self.get() {
            Some(hidden) if !hidden.is_empty() => copies
                .into_iter()
                .filter(|copy| !hidden.contains(&copy.location))
                .collect(),
            _ => copies,
        }
    }
}
