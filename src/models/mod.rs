//! Data models for the holdings status service

pub mod enums;
pub mod item_copy;
pub mod status;

// Re-export commonly used types
pub use enums::{AvailabilityMessage, CallNumberMode, LocationMode, PatronOption, ReferenceIndicator};
pub use item_copy::ItemCopy;
pub use status::{
    AvailabilityDecision, GroupedAvailability, ItemStatus, LocationAvailability, MissingStatus,
    StatusEntry,
};
