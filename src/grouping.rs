//! Chronological grouping of reservations into per-day sections.
//!
//! The report lays out one section per calendar day.  This module produces
//! that partition as an explicit two-stage transformation: a stable sort by
//! event start, then a split into maximal same-date runs.  Keeping the stages
//! separate keeps the ordering guarantees easy to state and test.

use chrono::{NaiveDate, NaiveDateTime};
use genpdf::error::{Error, ErrorKind};

use crate::model::ReservationSummary;

/// Reservations sharing one calendar event-start date, in ascending start
/// order.
///
/// Groups borrow from the caller's slice; they are derived fresh for every
/// render and never outlive it.  A group is never empty.
#[derive(Clone, Debug)]
pub struct DayGroup<'a> {
    date: NaiveDate,
    reservations: Vec<&'a ReservationSummary>,
}

impl<'a> DayGroup<'a> {
    /// Returns the calendar date shared by every reservation in the group.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the group's reservations, ordered by event start ascending.
    pub fn reservations(&self) -> &[&'a ReservationSummary] {
        &self.reservations
    }
}

fn required_event_start(reservation: &ReservationSummary) -> Result<NaiveDateTime, Error> {
    reservation.event_start().ok_or_else(|| {
        Error::new(
            format!(
                "reservation {} has no event start and cannot be grouped",
                reservation.id()
            ),
            ErrorKind::InvalidData,
        )
    })
}

/// Sorts reservations by event start and partitions them into per-day groups.
///
/// The sort is stable, so reservations starting at the same instant keep
/// their input order.  A reservation without an event start fails the whole
/// call; the report is all-or-nothing and never drops or misplaces a record.
/// Empty input yields an empty vector.
pub fn group_by_day(reservations: &[ReservationSummary]) -> Result<Vec<DayGroup<'_>>, Error> {
    let mut dated = Vec::with_capacity(reservations.len());
    for reservation in reservations {
        dated.push((required_event_start(reservation)?, reservation));
    }
    dated.sort_by_key(|(start, _)| *start);

    let mut groups: Vec<DayGroup<'_>> = Vec::new();
    for (start, reservation) in dated {
        match groups.last_mut() {
            Some(group) if group.date == start.date() => group.reservations.push(reservation),
            _ => groups.push(DayGroup {
                date: start.date(),
                reservations: vec![reservation],
            }),
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApprovalState;
    use chrono::NaiveDate;

    fn summary(id: i64, start: Option<NaiveDateTime>) -> ReservationSummary {
        ReservationSummary::new(id, format!("Reservation {}", id), ApprovalState::Approved)
            .with_event_start(start)
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = group_by_day(&[]).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn one_group_per_distinct_date() {
        let input = vec![
            summary(1, Some(at(2024, 3, 6, 9, 0))),
            summary(2, Some(at(2024, 3, 5, 14, 0))),
            summary(3, Some(at(2024, 3, 5, 9, 0))),
            summary(4, Some(at(2024, 3, 7, 8, 0))),
        ];

        let groups = group_by_day(&input).unwrap();
        let dates: Vec<NaiveDate> = groups.iter().map(DayGroup::date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            ]
        );
    }

    #[test]
    fn groups_cover_input_exactly() {
        let input = vec![
            summary(1, Some(at(2024, 3, 6, 9, 0))),
            summary(2, Some(at(2024, 3, 5, 14, 0))),
            summary(3, Some(at(2024, 3, 6, 7, 30))),
        ];

        let groups = group_by_day(&input).unwrap();
        let mut ids: Vec<i64> = groups
            .iter()
            .flat_map(|group| group.reservations().iter().map(|r| r.id()))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(groups.iter().all(|group| !group.reservations().is_empty()));
    }

    #[test]
    fn reservations_within_a_group_ascend_by_start() {
        let input = vec![
            summary(1, Some(at(2024, 3, 5, 16, 0))),
            summary(2, Some(at(2024, 3, 5, 9, 0))),
            summary(3, Some(at(2024, 3, 5, 12, 0))),
        ];

        let groups = group_by_day(&input).unwrap();
        assert_eq!(groups.len(), 1);
        let ids: Vec<i64> = groups[0].reservations().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let start = at(2024, 3, 5, 9, 0);
        let input = vec![
            summary(10, Some(start)),
            summary(11, Some(start)),
            summary(12, Some(start)),
        ];

        let groups = group_by_day(&input).unwrap();
        let ids: Vec<i64> = groups[0].reservations().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn missing_event_start_is_rejected() {
        let input = vec![summary(1, Some(at(2024, 3, 5, 9, 0))), summary(2, None)];

        let err = group_by_day(&input).unwrap_err();
        assert!(err.to_string().contains("reservation 2"));
    }
}
