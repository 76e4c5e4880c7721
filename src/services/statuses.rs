//! Item status service: batch availability lookups for the result list

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    config::ItemStatusConfig,
    error::AppResult,
    holdings::{HoldingsResolver, LocationGroupResolver},
    models::{
        enums::{AvailabilityMessage, LocationMode, PatronOption},
        item_copy::ItemCopy,
        status::{ItemStatus, MissingStatus, StatusEntry},
    },
};

use super::{
    full_status::FullStatusRenderer, hold_logic::SuppressedLocations, status_lookup::StatusLookup,
    translator::Translator,
};

#[derive(Clone)]
pub struct ItemStatusService {
    lookup: Arc<dyn StatusLookup>,
    suppressed: Arc<SuppressedLocations>,
    translator: Arc<dyn Translator>,
    renderer: Arc<dyn FullStatusRenderer>,
    settings: ItemStatusConfig,
}

impl ItemStatusService {
    pub fn new(
        lookup: Arc<dyn StatusLookup>,
        suppressed: Arc<SuppressedLocations>,
        translator: Arc<dyn Translator>,
        renderer: Arc<dyn FullStatusRenderer>,
        settings: ItemStatusConfig,
    ) -> Self {
        Self {
            lookup,
            suppressed,
            translator,
            renderer,
            settings,
        }
    }

    /// Statuses for the result list: one entry per requested id, using the
    /// configured summary mode
    pub async fn get_item_statuses(&self, ids: &[String]) -> AppResult<Vec<StatusEntry>> {
        self.resolve_batch(
            ids,
            self.settings.multiple_locations,
            self.settings.show_full_status,
            true,
        )
        .await
    }

    /// Grouped statuses with the per-copy block, for the record view.
    /// Ids without data are left out.
    pub async fn get_full_statuses(&self, ids: &[String]) -> AppResult<Vec<StatusEntry>> {
        self.resolve_batch(ids, LocationMode::Group, true, false).await
    }

    /// Real entries come first, in backend order, followed by placeholders
    /// for the ids without data, in request order.
    async fn resolve_batch(
        &self,
        ids: &[String],
        location_mode: LocationMode,
        show_full_status: bool,
        pad_missing: bool,
    ) -> AppResult<Vec<StatusEntry>> {
        let results = self.lookup.get_statuses(ids).await?;

        // Placeholders take the last index of a repeated id
        let mut missing: IndexMap<&str, usize> = IndexMap::new();
        for (index, id) in ids.iter().enumerate() {
            missing.insert(id.as_str(), index);
        }

        let mut entries = Vec::with_capacity(ids.len());
        for (id, copies) in results {
            let mut copies = self.suppressed.filter(copies);
            if copies.is_empty() {
                continue;
            }
            for copy in copies.iter_mut().filter(|c| c.record_id.is_empty()) {
                copy.record_id = id.clone();
            }

            let status = self.resolve_title(&copies, location_mode)?;
            let record_number = ids.iter().position(|requested| requested == status.record_id());
            missing.shift_remove(status.record_id());

            entries.push(StatusEntry {
                full_status: show_full_status.then(|| self.renderer.render(&copies)),
                status,
                record_number,
            });
        }

        let resolved = entries.len();
        if pad_missing {
            for (id, index) in missing {
                entries.push(StatusEntry {
                    status: ItemStatus::Missing(self.placeholder(id)),
                    record_number: Some(index),
                    full_status: None,
                });
            }
        }

        tracing::debug!(
            requested = ids.len(),
            resolved,
            missing = entries.len() - resolved,
            "Item statuses resolved"
        );

        Ok(entries)
    }

    fn resolve_title(&self, copies: &[ItemCopy], location_mode: LocationMode) -> AppResult<ItemStatus> {
        let translator = self.translator.as_ref();
        let call_number_mode = self.settings.multiple_call_nos;
        Ok(match location_mode {
            LocationMode::Group => ItemStatus::Grouped(
                LocationGroupResolver::new(call_number_mode, translator).resolve(copies)?,
            ),
            _ => ItemStatus::Summary(HoldingsResolver::new(call_number_mode, translator).resolve(copies)?),
        })
    }

    fn placeholder(&self, id: &str) -> MissingStatus {
        MissingStatus {
            record_id: id.to_string(),
            best_option: PatronOption::None,
            available: false,
            availability_message: AvailabilityMessage::Unavailable,
            location: self.translator.translate_key("Unknown"),
            reserve: false,
            reserve_message: self.translator.translate_key("Not On Reserve"),
            call_number: String::new(),
            missing_data: true,
        }
    }
}
