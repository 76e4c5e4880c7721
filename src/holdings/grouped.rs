//! Grouped-by-location summary

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{AvailabilityMessage, CallNumberMode},
        item_copy::ItemCopy,
        status::{GroupedAvailability, LocationAvailability},
    },
    services::translator::Translator,
};

use super::pick::pick_value;

const LOCATION_PREFIX: &str = "location_";

#[derive(Default)]
struct LocationGroup<'a> {
    available: bool,
    call_numbers: Vec<&'a str>,
}

/// Lists every location of a title instead of picking the best one
pub struct LocationGroupResolver<'a> {
    call_number_mode: CallNumberMode,
    translator: &'a dyn Translator,
}

impl<'a> LocationGroupResolver<'a> {
    pub fn new(call_number_mode: CallNumberMode, translator: &'a dyn Translator) -> Self {
        Self {
            call_number_mode,
            translator,
        }
    }

    pub fn resolve(&self, copies: &[ItemCopy]) -> AppResult<GroupedAvailability> {
        let first = copies.first().ok_or_else(|| {
            AppError::InvalidArgument("cannot group holdings without copies".to_string())
        })?;

        let mut groups: IndexMap<&str, LocationGroup> = IndexMap::new();
        let mut available = false;
        let mut use_unknown_message = false;

        for copy in copies {
            let group = groups.entry(copy.location.as_str()).or_default();
            if copy.availability {
                available = true;
                group.available = true;
            }
            if copy.use_unknown_message {
                use_unknown_message = true;
            }
            group.call_numbers.push(copy.call_number.as_str());
        }

        let location_list = groups
            .into_iter()
            .map(|(location, group)| LocationAvailability {
                location: self
                    .translator
                    .translate_or(&format!("{LOCATION_PREFIX}{location}"), location),
                available: group.available,
                call_numbers: pick_value(
                    &group.call_numbers,
                    self.call_number_mode,
                    "Multiple Call Numbers",
                    None,
                    self.translator,
                ),
            })
            .collect();

        let availability_message = if use_unknown_message {
            AvailabilityMessage::Unknown
        } else if available {
            AvailabilityMessage::Available
        } else {
            AvailabilityMessage::Unavailable
        };

        let reserve = first.is_on_reserve();
        let reserve_message = if reserve {
            self.translator.translate_key("on_reserve")
        } else {
            self.translator.translate_key("Not On Reserve")
        };

        Ok(GroupedAvailability {
            record_id: first.record_id.clone(),
            available,
            availability_message,
            location_list,
            reserve,
            reserve_message,
        })
    }
}
