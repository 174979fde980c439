//! Pure event queries: tradition filtering, span membership, range overlap.
//!
//! Nothing here has side effects; the calendar views call these with the
//! catalog and the active personal events and sort the results themselves.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::event::{CalendarEvent, PersonalEvent, ReligiousEvent, Tradition};

/// Catalog entries whose tradition is in the selected set.
///
/// Filtering is opt-in per tradition: an empty selection yields no events,
/// not all of them.
pub fn filter_by_traditions(
    catalog: &[ReligiousEvent],
    selected: &HashSet<Tradition>,
) -> Vec<ReligiousEvent> {
    catalog
        .iter()
        .filter(|event| selected.contains(&event.tradition))
        .cloned()
        .collect()
}

/// True iff `date` falls within the event's span, boundaries included.
/// Single-day events have a span of exactly their start date.
pub fn is_date_in_span(date: NaiveDate, event: &ReligiousEvent) -> bool {
    event.start_date <= date && date <= event.span_end()
}

/// Inclusive day count of the event's span. Always at least 1.
pub fn span_length_days(event: &ReligiousEvent) -> i64 {
    (event.span_end() - event.start_date).num_days() + 1
}

/// Merge the tradition-filtered catalog with the supplied personal events,
/// keeping entries whose span intersects the closed range `[from, to]`.
///
/// Order of the result is unspecified; callers sort for display.
pub fn events_overlapping_range(
    from: NaiveDate,
    to: NaiveDate,
    catalog: &[ReligiousEvent],
    selected: &HashSet<Tradition>,
    personal: &[PersonalEvent],
) -> Vec<CalendarEvent> {
    let religious = filter_by_traditions(catalog, selected)
        .into_iter()
        .map(CalendarEvent::Religious);
    let personal = personal.iter().cloned().map(CalendarEvent::Personal);

    religious
        .chain(personal)
        .filter(|event| event.start() <= to && event.end() >= from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::event::EventKind;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn religious(id: &str, start: NaiveDate, end: Option<NaiveDate>) -> ReligiousEvent {
        ReligiousEvent {
            id: id.to_string(),
            title: id.to_string(),
            start_date: start,
            end_date: end,
            tradition: Tradition::Hinduism,
            kind: EventKind::Celebration,
            description: None,
            significance: None,
            customs: Vec::new(),
        }
    }

    fn personal(id: &str, date: NaiveDate) -> PersonalEvent {
        PersonalEvent::new(id.to_string(), id.to_string(), date, None)
    }

    // --- is_date_in_span ---

    #[test]
    fn span_membership_multi_day() {
        let event = religious("e", d(2025, 11, 1), Some(d(2025, 11, 5)));
        assert!(is_date_in_span(d(2025, 11, 1), &event));
        assert!(is_date_in_span(d(2025, 11, 3), &event));
        assert!(is_date_in_span(d(2025, 11, 5), &event));
        assert!(!is_date_in_span(d(2025, 10, 31), &event));
        assert!(!is_date_in_span(d(2025, 11, 6), &event));
    }

    #[test]
    fn span_membership_single_day() {
        let event = religious("e", d(2025, 11, 1), None);
        assert!(is_date_in_span(d(2025, 11, 1), &event));
        assert!(!is_date_in_span(d(2025, 11, 2), &event));
    }

    // --- span_length_days ---

    #[test]
    fn span_length_single_day_is_one() {
        assert_eq!(span_length_days(&religious("e", d(2025, 6, 1), None)), 1);
        assert_eq!(
            span_length_days(&religious("e", d(2025, 6, 1), Some(d(2025, 6, 1)))),
            1
        );
    }

    #[test]
    fn span_length_counts_both_endpoints() {
        let event = religious("e", d(2025, 6, 1), Some(d(2025, 6, 5)));
        assert_eq!(span_length_days(&event), 5);
    }

    // --- filter_by_traditions ---

    #[test]
    fn empty_selection_yields_no_events() {
        let catalog = Catalog::for_year(2024);
        let filtered = filter_by_traditions(catalog.events(), &HashSet::new());
        assert!(filtered.is_empty());
    }

    #[test]
    fn selection_is_opt_in_per_tradition() {
        let catalog = Catalog::for_year(2024);
        let selected = HashSet::from([Tradition::Islam, Tradition::Judaism]);
        let filtered = filter_by_traditions(catalog.events(), &selected);
        assert!(!filtered.is_empty());
        assert!(
            filtered
                .iter()
                .all(|e| e.tradition == Tradition::Islam || e.tradition == Tradition::Judaism)
        );
    }

    // --- events_overlapping_range ---

    #[test]
    fn no_traditions_selected_returns_only_personal_events_in_range() {
        let catalog = Catalog::for_year(2025);
        let inside = personal("in", d(2025, 6, 10));
        let outside = personal("out", d(2025, 8, 1));

        let result = events_overlapping_range(
            d(2025, 6, 1),
            d(2025, 6, 30),
            catalog.events(),
            &HashSet::new(),
            &[inside.clone(), outside],
        );

        assert_eq!(result, vec![CalendarEvent::Personal(inside)]);
    }

    #[test]
    fn diwali_overlaps_a_day_inside_its_span() {
        let catalog = Catalog::for_year(2024);
        let selected = HashSet::from([Tradition::Hinduism]);

        let hit = events_overlapping_range(
            d(2024, 11, 3),
            d(2024, 11, 3),
            catalog.events(),
            &selected,
            &[],
        );
        assert!(hit.iter().any(|e| e.id() == "diwali-2024"));

        let miss = events_overlapping_range(
            d(2024, 11, 6),
            d(2024, 11, 10),
            catalog.events(),
            &selected,
            &[],
        );
        assert!(!miss.iter().any(|e| e.id() == "diwali-2024"));
    }

    #[test]
    fn overlap_is_inclusive_on_both_boundaries() {
        let spans_range = religious("contains", d(2025, 5, 1), Some(d(2025, 7, 31)));
        let ends_on_start = religious("left-edge", d(2025, 5, 20), Some(d(2025, 6, 1)));
        let starts_on_end = religious("right-edge", d(2025, 6, 30), Some(d(2025, 7, 4)));
        let single_on_edge = religious("single", d(2025, 6, 30), None);
        let before = religious("before", d(2025, 5, 1), Some(d(2025, 5, 31)));

        let catalog = vec![spans_range, ends_on_start, starts_on_end, single_on_edge, before];
        let selected = HashSet::from([Tradition::Hinduism]);

        let result =
            events_overlapping_range(d(2025, 6, 1), d(2025, 6, 30), &catalog, &selected, &[]);

        let ids: Vec<_> = result.iter().map(|e| e.id()).collect();
        assert!(ids.contains(&"contains"));
        assert!(ids.contains(&"left-edge"));
        assert!(ids.contains(&"right-edge"));
        assert!(ids.contains(&"single"));
        assert!(!ids.contains(&"before"));
    }
}
