//! Business logic services and their collaborators

pub mod full_status;
pub mod hold_logic;
pub mod status_lookup;
pub mod statuses;
pub mod translator;

use std::sync::Arc;

use crate::config::AppConfig;

use self::{
    full_status::PlainFullStatusRenderer,
    hold_logic::{ConfigHoldLogic, SuppressedLocations},
    status_lookup::StatusLookup,
    translator::{MapTranslator, Translator},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub statuses: statuses::ItemStatusService,
    pub translator: Arc<dyn Translator>,
}

impl Services {
    /// Wire the services around the given status backend
    pub fn new(config: &AppConfig, lookup: Arc<dyn StatusLookup>) -> Self {
        let translator: Arc<dyn Translator> =
            Arc::new(MapTranslator::new(config.translations.clone()));
        let suppressed = Arc::new(SuppressedLocations::new(Arc::new(ConfigHoldLogic::new(
            config.holds.suppressed_locations.clone(),
        ))));

        Self {
            statuses: statuses::ItemStatusService::new(
                lookup,
                suppressed,
                translator.clone(),
                Arc::new(PlainFullStatusRenderer),
                config.item_status.clone(),
            ),
            translator,
        }
    }
}
