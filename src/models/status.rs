//! Per-title availability summaries returned to the catalog front end

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::{AvailabilityMessage, PatronOption, ReferenceIndicator};

/// Best-option summary for one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDecision {
    pub record_id: String,
    /// The option offered to the patron
    pub best_option: PatronOption,
    /// Reference-ratio note raised next to the primary option, if any
    pub secondary_option: Option<PatronOption>,
    /// Action URL (place a hold / recall)
    pub best_option_href: Option<String>,
    pub best_option_location: Option<String>,
    pub available: bool,
    pub availability_message: AvailabilityMessage,
    /// `missing` / `lost` annotation for unavailable copies
    pub additional_message: Option<String>,
    pub call_number: String,
    /// Earliest due date among recallable copies
    pub due_date: Option<String>,
    pub reference_indicator: ReferenceIndicator,
    pub is_electronic: bool,
    pub reference_call_number: Option<String>,
    pub reference_location: Option<String>,
    pub location_href: Option<String>,
}

/// Availability at one location, used by the grouped summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationAvailability {
    pub location: String,
    pub available: bool,
    pub call_numbers: String,
}

/// Grouped-by-location summary for one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupedAvailability {
    pub record_id: String,
    pub available: bool,
    pub availability_message: AvailabilityMessage,
    pub location_list: Vec<LocationAvailability>,
    pub reserve: bool,
    pub reserve_message: String,
}

/// Placeholder for a requested title the backend had nothing for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissingStatus {
    pub record_id: String,
    pub best_option: PatronOption,
    pub available: bool,
    pub availability_message: AvailabilityMessage,
    pub location: String,
    pub reserve: bool,
    pub reserve_message: String,
    pub call_number: String,
    pub missing_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ItemStatus {
    Summary(AvailabilityDecision),
    Grouped(GroupedAvailability),
    Missing(MissingStatus),
}

impl ItemStatus {
    pub fn record_id(&self) -> &str {
        match self {
            ItemStatus::Summary(s) => &s.record_id,
            ItemStatus::Grouped(g) => &g.record_id,
            ItemStatus::Missing(m) => &m.record_id,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ItemStatus::Missing(_))
    }
}

/// One entry of a batch response
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    #[serde(flatten)]
    pub status: ItemStatus,
    /// Position of the title in the request
    pub record_number: Option<usize>,
    /// Per-copy block, when full status display is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_status: Option<String>,
}
