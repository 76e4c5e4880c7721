//! Item copy (one physical or electronic instance of a title) as reported
//! by the status backend

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Call number the backend reports for copies without a shelf mark
pub const UNKNOWN_CALL_NUMBER: &str = "Unknown";

/// First item note marking a copy as reference-only
pub const PRESENCE_USE_ONLY: &str = "presence_use_only";

/// Reading-room call numbers are always seven characters long (e.g. `MSB-100`)
const READING_ROOM_CALL_NUMBER_LEN: usize = 7;

/// One copy of a title. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ItemCopy {
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub record_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "callnumber", deserialize_with = "null_as_default")]
    pub call_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub availability: bool,
    #[serde(rename = "duedate")]
    pub due_date: Option<String>,
    #[serde(rename = "ilslink")]
    pub ils_link: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "itemnotes", deserialize_with = "null_as_default")]
    pub item_notes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub use_unknown_message: bool,
    pub reserve: Option<String>,
    #[serde(rename = "locationhref")]
    pub location_href: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ItemCopy {
    /// Due date, if the copy is on loan
    pub fn due_date(&self) -> Option<&str> {
        non_empty(&self.due_date)
    }

    /// Hold/recall action link
    pub fn ils_link(&self) -> Option<&str> {
        non_empty(&self.ils_link)
    }

    pub fn location_href(&self) -> Option<&str> {
        non_empty(&self.location_href)
    }

    pub fn is_on_loan(&self) -> bool {
        self.due_date().is_some()
    }

    pub fn is_reference_only(&self) -> bool {
        self.item_notes.first().map(String::as_str) == Some(PRESENCE_USE_ONLY)
    }

    /// Copies without a shelf mark are electronic
    pub fn is_electronic(&self) -> bool {
        self.call_number == UNKNOWN_CALL_NUMBER
    }

    pub fn has_reading_room_call_number(&self) -> bool {
        self.call_number.len() == READING_ROOM_CALL_NUMBER_LEN && !self.is_electronic()
    }

    /// Staff reserve shelf ("Dienstapparat"): seven character call number
    /// starting with `D`
    pub fn is_on_staff_shelf(&self) -> bool {
        self.call_number.len() == READING_ROOM_CALL_NUMBER_LEN && self.call_number.starts_with('D')
    }

    pub fn is_on_reserve(&self) -> bool {
        self.reserve.as_deref() == Some("Y")
    }

    /// Parsed due date, used to find the copy that comes back first
    pub fn due_timestamp(&self) -> Option<NaiveDateTime> {
        self.due_date().and_then(parse_due_date)
    }
}

/// Parse the date formats the status backends emit
pub fn parse_due_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    ["%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
