//! Holdings availability resolution
//!
//! Pure functions over the copies of one title; no I/O.

pub mod grouped;
pub mod pick;
pub mod resolver;

pub use grouped::LocationGroupResolver;
pub use pick::pick_value;
pub use resolver::{CopyTallies, HoldingsResolver};
