//! Best-option resolution
//!
//! Reduces every copy of a title to the one option that serves the patron
//! best (take from shelf, order from stacks, recall, use on site, ...) plus
//! the location and action link to show with it.

use std::collections::BTreeMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{AvailabilityMessage, CallNumberMode, LocationTier, PatronOption, ReferenceIndicator},
        item_copy::ItemCopy,
        status::AvailabilityDecision,
    },
    services::translator::Translator,
};

use super::pick::pick_value;

const MULTIPLE_CALL_NUMBERS: &str = "Multiple Call Numbers";
const ON_ORDER_MARKER: &str = "bestellt";
const SHIPPING_LOCATION: &str = "Shipping";
const STAFF_SHELF_LOCATION: &str = "Sonderstandort: Dienstapparat";
const COURSE_RESERVE_LOCATION: &str = "Sonderstandort: Semesterapparat";
const UNKNOWN_LOCATION: &str = "Unknown";

/// Counts over the copies of one title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyTallies {
    pub total: usize,
    pub available: usize,
    /// Available, reference-only
    pub reference: usize,
    /// On loan, regardless of availability
    pub lent: usize,
    /// Available, has to be ordered from the closed stacks
    pub stack_order: usize,
    /// Available, no shelf mark
    pub electronic: usize,
    /// Unavailable, on a staff reserve shelf
    pub staff_shelf: usize,
}

impl CopyTallies {
    /// Copies a patron could take away, including stack orders. May go
    /// negative when reference-only copies are also on loan.
    pub fn borrowable(&self) -> i64 {
        self.total as i64 - (self.reference + self.lent + self.staff_shelf) as i64
    }
}

/// Everything collected in one pass over the copies
#[derive(Debug, Default)]
struct Tally<'a> {
    tallies: CopyTallies,
    available: bool,
    use_unknown_message: bool,
    status_note: Option<&'a str>,
    locations: BTreeMap<LocationTier, &'a str>,
    place_hold_href: Option<&'a str>,
    reference_copy: Option<&'a ItemCopy>,
    call_numbers: Vec<&'a str>,
    location_href: Option<&'a str>,
}

impl<'a> Tally<'a> {
    fn collect(copies: &'a [ItemCopy]) -> Self {
        let mut tally = Tally::default();
        for copy in copies {
            tally.add(copy);
        }
        tally
    }

    fn add(&mut self, copy: &'a ItemCopy) {
        let location = copy.location.as_str();
        self.tallies.total += 1;

        if copy.availability {
            self.available = true;
            self.tallies.available += 1;
            self.locations.insert(LocationTier::Generic, location);

            if let Some(link) = copy.ils_link() {
                if !copy.is_on_loan() {
                    self.tallies.stack_order += 1;
                }
                self.place_hold_href = Some(link);
                self.claim(LocationTier::OrderOrReference, location);
            }

            if copy.is_reference_only() {
                self.tallies.reference += 1;
                self.reference_copy = Some(copy);
                // keeps the generic slot
                self.locations.insert(LocationTier::OrderOrReference, location);
            }

            if copy.is_electronic() {
                self.tallies.electronic += 1;
                self.claim(LocationTier::ElectronicOrServiceDesk, location);
            } else if copy.has_reading_room_call_number() {
                self.claim(LocationTier::ReadingRoom, location);
            }
        } else if copy.is_on_staff_shelf() {
            self.tallies.staff_shelf += 1;
            self.claim(LocationTier::ElectronicOrServiceDesk, location);
        }

        if copy.is_on_loan() {
            self.tallies.lent += 1;
            self.claim(LocationTier::Loaned, location);
        }

        if let Some(note @ ("missing" | "lost")) = copy.status.as_deref() {
            self.status_note = Some(note);
        }

        if copy.use_unknown_message {
            self.use_unknown_message = true;
        }

        if self.location_href.is_none() {
            self.location_href = copy.location_href();
        }

        self.call_numbers.push(copy.call_number.as_str());
    }

    /// Move `location` out of the generic slot into a more specific tier
    fn claim(&mut self, tier: LocationTier, location: &'a str) {
        if self.locations.get(&LocationTier::Generic) == Some(&location) {
            self.locations.remove(&LocationTier::Generic);
        }
        self.locations.insert(tier, location);
    }

    fn best_location(&self) -> Option<&'a str> {
        LocationTier::ALL
            .iter()
            .filter_map(|tier| self.locations.get(tier).copied())
            .find(|location| !location.is_empty())
    }
}

/// Copy to recall: the loaned copy with a recall link that is due first
fn first_due_recall(copies: &[ItemCopy]) -> Option<&ItemCopy> {
    copies
        .iter()
        .filter(|c| c.is_on_loan() && c.ils_link().is_some())
        .min_by_key(|c| {
            let due = c.due_timestamp();
            (due.is_none(), due)
        })
}

/// Resolves the copies of one title into an [`AvailabilityDecision`]
pub struct HoldingsResolver<'a> {
    call_number_mode: CallNumberMode,
    translator: &'a dyn Translator,
}

impl<'a> HoldingsResolver<'a> {
    pub fn new(call_number_mode: CallNumberMode, translator: &'a dyn Translator) -> Self {
        Self {
            call_number_mode,
            translator,
        }
    }

    /// Summarize all copies of one title. All copies must belong to the
    /// same title and there must be at least one.
    pub fn resolve(&self, copies: &[ItemCopy]) -> AppResult<AvailabilityDecision> {
        let first = copies.first().ok_or_else(|| {
            AppError::InvalidArgument("cannot resolve holdings without copies".to_string())
        })?;

        let tally = Tally::collect(copies);
        let counts = tally.tallies;
        let borrowable = counts.borrowable();
        let recall = first_due_recall(copies);

        tracing::debug!(
            record_id = %first.record_id,
            total = counts.total,
            available = counts.available,
            borrowable,
            reference = counts.reference,
            lent = counts.lent,
            stack_order = counts.stack_order,
            electronic = counts.electronic,
            staff_shelf = counts.staff_shelf,
            "Holdings tallied"
        );

        let mut best_option_href = None;
        let mut reference_copy = None;

        // Reference-only copies; electronic copies carry the same note and
        // do not count as reference when they are the only ones.
        let (reference_indicator, secondary_option) =
            if counts.reference > 0 && counts.reference != counts.electronic {
                if counts.reference == counts.available && counts.available == counts.total {
                    (ReferenceIndicator::AllReference, Some(PatronOption::Local))
                } else if counts.reference != counts.available
                    && ((borrowable != 0 && counts.lent > 0) || (borrowable > 0 && counts.lent == 0))
                {
                    (ReferenceIndicator::Mixed, None)
                } else {
                    reference_copy = tally.reference_copy;
                    best_option_href = tally.place_hold_href;
                    (ReferenceIndicator::ReferenceOrLoaned, Some(PatronOption::ReserveOrLocal))
                }
            } else {
                (ReferenceIndicator::NoReference, None)
            };

        let stack_order = counts.stack_order as i64;
        let primary_option = if counts.electronic > 0 && counts.electronic == counts.total {
            PatronOption::EOnly
        } else if borrowable > 0 && borrowable - stack_order > 0 {
            PatronOption::Shelf
        } else if borrowable > 0 && borrowable == stack_order {
            best_option_href = tally.place_hold_href;
            PatronOption::Order
        } else if counts.lent > 0 {
            best_option_href = recall.and_then(ItemCopy::ils_link);
            PatronOption::Reserve
        } else if !tally.available {
            PatronOption::ServiceDesk
        } else {
            PatronOption::None
        };

        // Options are ranked by declaration order; the best raised one wins.
        let mut best_option = match secondary_option {
            Some(secondary) => primary_option.min(secondary),
            None => primary_option,
        };

        let call_number = pick_value(
            &tally.call_numbers,
            self.call_number_mode,
            MULTIPLE_CALL_NUMBERS,
            None,
            self.translator,
        );

        let mut best_option_location = tally.best_location().map(str::to_string);
        if best_option != PatronOption::EOnly {
            if call_number.to_lowercase().contains(ON_ORDER_MARKER) {
                best_option = PatronOption::Acquired;
                best_option_location = Some(SHIPPING_LOCATION.to_string());
            } else if best_option_location.is_none() {
                best_option_location = Some(STAFF_SHELF_LOCATION.to_string());
            } else if best_option_location.as_deref() == Some(UNKNOWN_LOCATION) {
                best_option_location = Some(COURSE_RESERVE_LOCATION.to_string());
            }
        }

        let due_date = recall.and_then(ItemCopy::due_date).map(str::to_string);

        let mut availability_message = if tally.use_unknown_message {
            AvailabilityMessage::Unknown
        } else if tally.available {
            AvailabilityMessage::Available
        } else {
            AvailabilityMessage::Unavailable
        };
        let mut additional_message = None;
        if !tally.available {
            if due_date.is_none() {
                availability_message = AvailabilityMessage::NotForLoan;
            } else {
                additional_message = tally.status_note.map(str::to_string);
            }
        }

        Ok(AvailabilityDecision {
            record_id: first.record_id.clone(),
            best_option,
            secondary_option,
            best_option_href: best_option_href.map(str::to_string),
            best_option_location,
            available: tally.available,
            availability_message,
            additional_message,
            call_number,
            due_date,
            reference_indicator,
            is_electronic: counts.electronic > 0,
            reference_call_number: reference_copy.map(|c| c.call_number.clone()),
            reference_location: reference_copy.map(|c| c.location.clone()),
            location_href: tally.location_href.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item_copy::{PRESENCE_USE_ONLY, UNKNOWN_CALL_NUMBER};
    use crate::services::translator::MapTranslator;

    fn copy(location: &str, call_number: &str, available: bool) -> ItemCopy {
        ItemCopy {
            record_id: "268707642".to_string(),
            location: location.to_string(),
            call_number: call_number.to_string(),
            availability: available,
            ..Default::default()
        }
    }

    fn with_link(mut c: ItemCopy, link: &str) -> ItemCopy {
        c.ils_link = Some(link.to_string());
        c
    }

    fn on_loan(mut c: ItemCopy, due: &str) -> ItemCopy {
        c.due_date = Some(due.to_string());
        c
    }

    fn reference_only(mut c: ItemCopy) -> ItemCopy {
        c.item_notes = vec![PRESENCE_USE_ONLY.to_string()];
        c
    }

    fn resolve_with(copies: &[ItemCopy], mode: CallNumberMode) -> AvailabilityDecision {
        let translator = MapTranslator::default();
        HoldingsResolver::new(mode, &translator).resolve(copies).unwrap()
    }

    fn resolve(copies: &[ItemCopy]) -> AvailabilityDecision {
        resolve_with(copies, CallNumberMode::First)
    }

    #[test]
    fn test_empty_copies_is_invalid() {
        let translator = MapTranslator::default();
        let result = HoldingsResolver::new(CallNumberMode::Msg, &translator).resolve(&[]);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_reading_room_copies_go_to_shelf() {
        let copies = vec![
            copy("Lesesaal 1", "LS1-001", true),
            copy("Lesesaal 1", "LS1-001", true),
            copy("Lesesaal 1", "LS1-001", true),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::Shelf);
        assert_eq!(decision.best_option_location.as_deref(), Some("Lesesaal 1"));
        assert_eq!(decision.reference_indicator, ReferenceIndicator::NoReference);
        assert_eq!(decision.call_number, "LS1-001");
        assert_eq!(decision.availability_message, AvailabilityMessage::Available);
        assert_eq!(decision.best_option_href, None);
    }

    #[test]
    fn test_closed_stack_copies_are_ordered() {
        let copies = vec![
            with_link(copy("Magazin", "MAG-001", true), "https://ils/hold/1"),
            with_link(copy("Magazin", "MAG-002", true), "https://ils/hold/2"),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::Order);
        assert_eq!(decision.best_option_href.as_deref(), Some("https://ils/hold/2"));
        assert_eq!(decision.best_option_location.as_deref(), Some("Magazin"));
    }

    #[test]
    fn test_loaned_copy_is_recalled() {
        let copies = vec![on_loan(
            with_link(copy("Lehrbuchsammlung", "LBS-123", false), "https://ils/recall/1"),
            "2024-01-01",
        )];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::Reserve);
        assert_eq!(decision.due_date.as_deref(), Some("2024-01-01"));
        assert_eq!(decision.best_option_href.as_deref(), Some("https://ils/recall/1"));
        assert_eq!(decision.best_option_location.as_deref(), Some("Lehrbuchsammlung"));
        assert_eq!(decision.availability_message, AvailabilityMessage::Unavailable);
        assert_eq!(decision.additional_message, None);
    }

    #[test]
    fn test_recall_picks_earliest_due_date() {
        let copies = vec![
            on_loan(with_link(copy("LBS", "LBS-001", false), "https://ils/recall/late"), "15.03.2024"),
            on_loan(copy("LBS", "LBS-001", false), "2024-01-01"),
            on_loan(with_link(copy("LBS", "LBS-001", false), "https://ils/recall/early"), "2024-02-01"),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::Reserve);
        assert_eq!(decision.best_option_href.as_deref(), Some("https://ils/recall/early"));
        assert_eq!(decision.due_date.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn test_all_reference_copies_are_local() {
        let copies = vec![
            reference_only(copy("Lesesaal 2", "LS2-100", true)),
            reference_only(copy("Lesesaal 2", "LS2-100", true)),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.reference_indicator, ReferenceIndicator::AllReference);
        assert_eq!(decision.best_option, PatronOption::Local);
        assert_eq!(decision.secondary_option, Some(PatronOption::Local));
        assert_eq!(decision.reference_location, None);
    }

    #[test]
    fn test_reference_next_to_borrowable_is_mixed() {
        let copies = vec![
            reference_only(copy("Lesesaal 1", "LS1-001", true)),
            copy("Lesesaal 1", "LS1-001", true),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.reference_indicator, ReferenceIndicator::Mixed);
        assert_eq!(decision.best_option, PatronOption::Shelf);
        assert_eq!(decision.secondary_option, None);
    }

    #[test]
    fn test_reference_copy_with_some_loaned_is_mixed() {
        let copies = vec![
            reference_only(copy("Lesesaal 1", "LS1-REF", true)),
            on_loan(
                with_link(copy("Lehrbuchsammlung", "LBS-123", false), "https://ils/recall/3"),
                "2024-03-01",
            ),
            copy("Lesesaal 1", "LS1-001", true),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.reference_indicator, ReferenceIndicator::Mixed);
        assert_eq!(decision.secondary_option, None);
        assert_eq!(decision.best_option, PatronOption::Shelf);
        assert_eq!(decision.reference_call_number, None);
    }

    #[test]
    fn test_reference_copy_while_others_are_loaned() {
        let copies = vec![
            reference_only(copy("Lesesaal 1", "LS1-REF", true)),
            on_loan(
                with_link(copy("Lehrbuchsammlung", "LBS-123", false), "https://ils/recall/9"),
                "2024-03-01",
            ),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.reference_indicator, ReferenceIndicator::ReferenceOrLoaned);
        assert_eq!(decision.best_option, PatronOption::ReserveOrLocal);
        assert_eq!(decision.best_option_href.as_deref(), Some("https://ils/recall/9"));
        assert_eq!(decision.reference_call_number.as_deref(), Some("LS1-REF"));
        assert_eq!(decision.reference_location.as_deref(), Some("Lesesaal 1"));
        assert_eq!(decision.best_option_location.as_deref(), Some("Lesesaal 1"));
        assert_eq!(decision.due_date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_all_electronic_is_e_only() {
        let copies = vec![
            reference_only(copy("Online", UNKNOWN_CALL_NUMBER, true)),
            copy("", UNKNOWN_CALL_NUMBER, true),
        ];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::EOnly);
        assert!(decision.is_electronic);
        assert_eq!(decision.best_option_location.as_deref(), Some("Online"));
    }

    #[test]
    fn test_e_only_keeps_missing_location() {
        let copies = vec![copy("", UNKNOWN_CALL_NUMBER, true)];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::EOnly);
        assert_eq!(decision.best_option_location, None);
    }

    #[test]
    fn test_reading_room_location_wins_regardless_of_order() {
        let magazine = copy("Magazin", "2010 A 1234", true);
        let reading_room = copy("Lesesaal 1", "LS1-001", true);

        let forward = resolve(&[magazine.clone(), reading_room.clone()]);
        let backward = resolve(&[reading_room, magazine]);

        assert_eq!(forward.best_option_location.as_deref(), Some("Lesesaal 1"));
        assert_eq!(backward.best_option_location.as_deref(), Some("Lesesaal 1"));
    }

    #[test]
    fn test_tallies_ignore_copy_order() {
        let copies = vec![
            reference_only(copy("Lesesaal 1", "LS1-001", true)),
            with_link(copy("Magazin", "MAG-001", true), "https://ils/hold/1"),
            on_loan(with_link(copy("LBS", "LBS-001", false), "https://ils/recall/1"), "2024-01-01"),
            copy("Dienstapparat", "DAC-372", false),
            copy("Online", UNKNOWN_CALL_NUMBER, true),
        ];
        let expected_tallies = Tally::collect(&copies).tallies;
        let expected = resolve(&copies);

        for shift in 1..copies.len() {
            let mut rotated = copies.clone();
            rotated.rotate_left(shift);
            rotated.swap(0, 1);

            let decision = resolve(&rotated);
            assert_eq!(Tally::collect(&rotated).tallies, expected_tallies);
            assert_eq!(decision.best_option, expected.best_option);
            assert_eq!(decision.reference_indicator, expected.reference_indicator);
        }
        assert_eq!(
            expected_tallies,
            CopyTallies {
                total: 5,
                available: 3,
                reference: 1,
                lent: 1,
                stack_order: 1,
                electronic: 1,
                staff_shelf: 1,
            }
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let copies = vec![
            on_loan(with_link(copy("LBS", "LBS-001", false), "https://ils/recall/1"), "2024-01-01"),
            copy("Magazin", "MAG-001", true),
        ];
        assert_eq!(resolve(&copies), resolve(&copies));
    }

    #[test]
    fn test_on_order_copy_is_acquired() {
        let copies = vec![reference_only(copy("Unknown", "bestellt Ref. 5", true))];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::Acquired);
        assert_eq!(decision.best_option_location.as_deref(), Some("Shipping"));
    }

    #[test]
    fn test_staff_shelf_without_location() {
        let copies = vec![copy("", "DAC-372", false)];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::ServiceDesk);
        assert_eq!(
            decision.best_option_location.as_deref(),
            Some("Sonderstandort: Dienstapparat")
        );
        assert_eq!(decision.availability_message, AvailabilityMessage::NotForLoan);
    }

    #[test]
    fn test_unknown_location_is_course_reserve() {
        let copies = vec![copy("Unknown", "SEM 12 / 4711", true)];
        let decision = resolve(&copies);

        assert_eq!(decision.best_option, PatronOption::Shelf);
        assert_eq!(
            decision.best_option_location.as_deref(),
            Some("Sonderstandort: Semesterapparat")
        );
    }

    #[test]
    fn test_missing_status_is_reported_for_loaned_copies() {
        let mut lost = on_loan(
            with_link(copy("LBS", "LBS-001", false), "https://ils/recall/1"),
            "2024-05-01",
        );
        lost.status = Some("missing".to_string());
        let decision = resolve(&[lost]);

        assert_eq!(decision.availability_message, AvailabilityMessage::Unavailable);
        assert_eq!(decision.additional_message.as_deref(), Some("missing"));
    }

    #[test]
    fn test_last_missing_or_lost_note_wins() {
        let mut missing = on_loan(
            with_link(copy("LBS", "LBS-001", false), "https://ils/recall/1"),
            "2024-05-01",
        );
        missing.status = Some("missing".to_string());
        let mut lost = on_loan(
            with_link(copy("LBS", "LBS-002", false), "https://ils/recall/2"),
            "2024-06-01",
        );
        lost.status = Some("lost".to_string());

        let decision = resolve(&[missing.clone(), lost.clone()]);
        assert_eq!(decision.additional_message.as_deref(), Some("lost"));

        let decision = resolve(&[lost, missing]);
        assert_eq!(decision.additional_message.as_deref(), Some("missing"));
    }

    #[test]
    fn test_unknown_message_flag() {
        let mut c = copy("Lesesaal 1", "LS1-001", true);
        c.use_unknown_message = true;
        let decision = resolve(&[c]);

        assert_eq!(decision.availability_message, AvailabilityMessage::Unknown);
        assert!(decision.available);
    }

    #[test]
    fn test_multiple_call_numbers_message() {
        let copies = vec![copy("Magazin", "MAG-001", true), copy("Magazin", "MAG-002", true)];
        let decision = resolve_with(&copies, CallNumberMode::Msg);
        assert_eq!(decision.call_number, "Multiple Call Numbers");

        let decision = resolve_with(&copies, CallNumberMode::All);
        assert_eq!(decision.call_number, "MAG-001, MAG-002");
    }

    #[test]
    fn test_best_option_is_always_set() {
        let samples = vec![
            vec![copy("", "", false)],
            vec![copy("", "", true)],
            vec![reference_only(on_loan(copy("X", "X", true), "2024-01-01"))],
        ];
        for copies in samples {
            let decision = resolve(&copies);
            assert!(!decision.best_option.as_str().is_empty());
        }
    }
}
