//! Shared domain enums for availability resolution

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// PatronOption
// ---------------------------------------------------------------------------

/// What the patron can do with a title. Serialized to the values the
/// catalog front end switches on.
///
/// Declaration order is the resolution order: when several options are
/// raised for a title, the first one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum PatronOption {
    /// Only electronic copies exist
    #[serde(rename = "e_only")]
    EOnly,
    /// Take it from an open shelf
    #[serde(rename = "shelf")]
    Shelf,
    /// Order it from the closed stacks
    #[serde(rename = "order")]
    Order,
    /// Recall a loaned copy, or use a reference-only copy on site
    #[serde(rename = "reserve_or_local")]
    ReserveOrLocal,
    /// Recall a loaned copy
    #[serde(rename = "reserve")]
    Reserve,
    /// Use a reference-only copy on site
    #[serde(rename = "local")]
    Local,
    /// Bought, not yet shelved
    #[serde(rename = "acquired")]
    Acquired,
    /// Nothing automatable, ask at the service desk
    #[serde(rename = "service_desk")]
    ServiceDesk,
    #[serde(rename = "false")]
    None,
}

impl PatronOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatronOption::EOnly => "e_only",
            PatronOption::Shelf => "shelf",
            PatronOption::Order => "order",
            PatronOption::ReserveOrLocal => "reserve_or_local",
            PatronOption::Reserve => "reserve",
            PatronOption::Local => "local",
            PatronOption::Acquired => "acquired",
            PatronOption::ServiceDesk => "service_desk",
            PatronOption::None => "false",
        }
    }
}

impl std::fmt::Display for PatronOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AvailabilityMessage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum AvailabilityMessage {
    Available,
    Unavailable,
    Unknown,
    NotForLoan,
}

// ---------------------------------------------------------------------------
// ReferenceIndicator
// ---------------------------------------------------------------------------

/// Ratio of reference-only copies to the rest of the holdings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum ReferenceIndicator {
    /// No reference-only copies (or only electronic ones)
    #[default]
    #[serde(rename = "0")]
    NoReference,
    /// Every copy is available and reference-only
    #[serde(rename = "1")]
    AllReference,
    /// Reference-only copies next to borrowable ones
    #[serde(rename = "2")]
    Mixed,
    /// Reference-only copies while every borrowable copy is out
    #[serde(rename = "3")]
    ReferenceOrLoaned,
}

// ---------------------------------------------------------------------------
// CallNumberMode / LocationMode
// ---------------------------------------------------------------------------

/// `multiple_call_nos` setting. Unrecognized values behave like `msg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum CallNumberMode {
    First,
    All,
    #[default]
    Msg,
}

impl From<&str> for CallNumberMode {
    fn from(v: &str) -> Self {
        match v.trim().to_ascii_lowercase().as_str() {
            "first" => CallNumberMode::First,
            "all" => CallNumberMode::All,
            _ => CallNumberMode::Msg,
        }
    }
}

impl From<String> for CallNumberMode {
    fn from(v: String) -> Self {
        CallNumberMode::from(v.as_str())
    }
}

/// `multiple_locations` setting. `group` switches the whole batch to the
/// grouped-by-location summary; anything else is a best-option summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum LocationMode {
    Group,
    First,
    All,
    #[default]
    Msg,
}

impl From<&str> for LocationMode {
    fn from(v: &str) -> Self {
        match v.trim().to_ascii_lowercase().as_str() {
            "group" => LocationMode::Group,
            "first" => LocationMode::First,
            "all" => LocationMode::All,
            _ => LocationMode::Msg,
        }
    }
}

impl From<String> for LocationMode {
    fn from(v: String) -> Self {
        LocationMode::from(v.as_str())
    }
}

// ---------------------------------------------------------------------------
// LocationTier
// ---------------------------------------------------------------------------

/// Tiers competing for the displayed location. Lower tiers win, so a
/// reading-room shelf beats the generic "some available copy" location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocationTier {
    /// Available copy with a seven character reading-room call number
    ReadingRoom,
    /// Any available copy
    Generic,
    /// Available copy to be ordered from the stacks, or reference-only
    OrderOrReference,
    /// Copy on loan
    Loaned,
    /// Electronic copy, or a copy on a staff reserve shelf
    ElectronicOrServiceDesk,
}

impl LocationTier {
    pub const ALL: [LocationTier; 5] = [
        LocationTier::ReadingRoom,
        LocationTier::Generic,
        LocationTier::OrderOrReference,
        LocationTier::Loaned,
        LocationTier::ElectronicOrServiceDesk,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_modes_fall_back_to_msg() {
        assert_eq!(CallNumberMode::from("first"), CallNumberMode::First);
        assert_eq!(CallNumberMode::from("ALL"), CallNumberMode::All);
        assert_eq!(CallNumberMode::from("whatever"), CallNumberMode::Msg);
        assert_eq!(LocationMode::from("group"), LocationMode::Group);
        assert_eq!(LocationMode::from(""), LocationMode::Msg);
    }

    #[test]
    fn test_patron_option_wire_values() {
        assert_eq!(serde_json::to_value(PatronOption::EOnly).unwrap(), "e_only");
        assert_eq!(serde_json::to_value(PatronOption::ServiceDesk).unwrap(), "service_desk");
        assert_eq!(serde_json::to_value(PatronOption::None).unwrap(), "false");
        assert_eq!(serde_json::to_value(ReferenceIndicator::Mixed).unwrap(), "2");
        assert_eq!(
            serde_json::to_value(AvailabilityMessage::NotForLoan).unwrap(),
            "notForLoan"
        );
    }

    #[test]
    fn test_option_order() {
        assert!(PatronOption::Order < PatronOption::ReserveOrLocal);
        assert!(PatronOption::Reserve < PatronOption::Local);
        assert!(LocationTier::ReadingRoom < LocationTier::Generic);
    }
}
