//! Composition of the report document: title block, day sections, rows.
//!
//! The builder draws one [`DayGroup`] at a time into an already-open
//! document.  All styling is fixed per role; the font family itself comes
//! from the document the caller hands in.

use chrono::{Months, NaiveDate};
use genpdf::elements::{Break, PaddedElement, Paragraph, TableLayout, UnorderedList};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{Document, Element, Margins};
use log::debug;

use crate::elements::{mm_from_f64, scaled_logo, Rule};
use crate::grouping::DayGroup;
use crate::model::{ApprovalState, ImageSource, ReservationSummary};

/// Uniform page margin applied on all four sides, in document units.
pub const PAGE_MARGIN: f64 = 25.0;

/// Horizontal inset applied to note blocks, split evenly across both sides.
const NOTE_INSET: f64 = 50.0;

const RULE_THICKNESS: f64 = 0.3;
const BULLET: &str = "\u{2022}";
const CHECK_MARK: &str = "\u{2713}";

const COLUMN_LABELS: [&str; 7] = [
    "Name",
    "Event Time",
    "Reservation Time",
    "Locations",
    "Resources",
    "Has Layout?",
    "Status",
];

const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
const GRAY: Color = Color::Rgb(128, 128, 128);
const ACCENT: Color = Color::Rgb(255, 0, 255);

/// The fixed text styles used by the report, one per role.
pub struct ReportStyles {
    title: Style,
    day_header: Style,
    column_header: Style,
    body: Style,
    unapproved: Style,
    note: Style,
}

impl ReportStyles {
    pub fn new() -> Self {
        Self {
            title: Style::new().bold().with_font_size(16),
            day_header: Style::new().bold().with_font_size(12).with_color(DARK_GRAY),
            column_header: Style::new().bold().with_font_size(10).with_color(DARK_GRAY),
            body: Style::new().with_font_size(8),
            unapproved: Style::new().italic().with_font_size(8).with_color(ACCENT),
            note: Style::new().with_font_size(8).with_color(GRAY),
        }
    }

    /// Style for the status cell: highlighted only while unapproved.
    fn status(&self, state: ApprovalState) -> Style {
        if state == ApprovalState::Unapproved {
            self.unapproved
        } else {
            self.body
        }
    }
}

impl Default for ReportStyles {
    fn default() -> Self {
        Self::new()
    }
}

/// Effective date range shown in the report title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    /// Resolves the caller's optional filter dates against `today`: the
    /// start defaults to today, the end to one month later.
    ///
    /// The window only affects the title line; it never filters which
    /// reservations are rendered.
    pub fn effective(
        filter_start: Option<NaiveDate>,
        filter_end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, Error> {
        let start = filter_start.unwrap_or(today);
        let end = match filter_end {
            Some(end) => end,
            None => today.checked_add_months(Months::new(1)).ok_or_else(|| {
                Error::new("report window end date is out of range", ErrorKind::InvalidData)
            })?,
        };
        Ok(Self { start, end })
    }

    /// Returns the first date of the display window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last date of the display window.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    fn title(&self) -> String {
        format!(
            "Reservations for: {} - {}",
            self.start.format("%B %-d"),
            self.end.format("%B %-d")
        )
    }
}

/// Composes the full report into `document`: optional logo, title line, then
/// one section per day group.
pub fn compose(
    document: &mut Document,
    groups: &[DayGroup<'_>],
    logo: Option<&ImageSource>,
    window: ReportWindow,
) -> Result<(), Error> {
    let styles = ReportStyles::new();

    if let Some(source) = logo {
        match scaled_logo(source) {
            Ok(logo) => document.push(logo),
            // Best-effort branding: an unresolvable logo never aborts the
            // report.
            Err(err) => debug!("omitting report logo: {}", err),
        }
    }

    document.push(Paragraph::new(StyledString::new(window.title(), styles.title)));

    for group in groups {
        push_day_section(document, group, &styles)?;
    }

    Ok(())
}

fn push_day_section(
    document: &mut Document,
    group: &DayGroup<'_>,
    styles: &ReportStyles,
) -> Result<(), Error> {
    document.push(Break::new(1.0));
    document.push(Paragraph::new(StyledString::new(
        day_header_label(group.date()),
        styles.day_header,
    )));
    document.push(column_header_row(styles)?);
    document.push(Rule::new(mm_from_f64(RULE_THICKNESS), DARK_GRAY));

    for &reservation in group.reservations() {
        document.push(reservation_row(reservation, styles)?);
        if let Some(note) = nonblank_note(reservation) {
            document.push(note_block(note, styles));
        }
    }

    Ok(())
}

fn day_header_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn column_header_row(styles: &ReportStyles) -> Result<TableLayout, Error> {
    let mut table = TableLayout::new(vec![1; COLUMN_LABELS.len()]);
    let mut row = table.row();
    for label in COLUMN_LABELS {
        row = row.element(Paragraph::new(StyledString::new(
            label.to_owned(),
            styles.column_header,
        )));
    }
    row.push()?;
    Ok(table)
}

fn reservation_row(
    reservation: &ReservationSummary,
    styles: &ReportStyles,
) -> Result<TableLayout, Error> {
    let mut table = TableLayout::new(vec![1; COLUMN_LABELS.len()]);
    table
        .row()
        .element(body_paragraph(reservation.name(), styles))
        .element(body_paragraph(reservation.event_time_description(), styles))
        .element(body_paragraph(
            reservation.reservation_time_description(),
            styles,
        ))
        .element(location_list(reservation, styles))
        .element(resource_list(reservation, styles))
        .element(body_paragraph(
            yes_no(reservation.setup_photo_id().is_some()),
            styles,
        ))
        .element(Paragraph::new(StyledString::new(
            reservation.approval_state().label().to_owned(),
            styles.status(reservation.approval_state()),
        )))
        .push()?;
    Ok(table)
}

fn body_paragraph(text: &str, styles: &ReportStyles) -> Paragraph {
    Paragraph::new(StyledString::new(text.to_owned(), styles.body))
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "Yes"
    } else {
        "No"
    }
}

fn bullet_label(name: &str, approved: bool) -> String {
    if approved {
        format!("{} {}", name, CHECK_MARK)
    } else {
        name.to_owned()
    }
}

fn location_list(reservation: &ReservationSummary, styles: &ReportStyles) -> UnorderedList {
    let mut list = UnorderedList::with_bullet(BULLET);
    for location in reservation.locations() {
        let label = bullet_label(
            location.name(),
            location.approval_state() == ApprovalState::Approved,
        );
        list.push(Paragraph::new(StyledString::new(label, styles.body)));
    }
    list
}

fn resource_list(reservation: &ReservationSummary, styles: &ReportStyles) -> UnorderedList {
    let mut list = UnorderedList::with_bullet(BULLET);
    for resource in reservation.resources() {
        let name = format!("{}({})", resource.name(), resource.quantity());
        let label = bullet_label(&name, resource.approval_state() == ApprovalState::Approved);
        list.push(Paragraph::new(StyledString::new(label, styles.body)));
    }
    list
}

fn nonblank_note(reservation: &ReservationSummary) -> Option<&str> {
    reservation.note().filter(|note| !note.trim().is_empty())
}

fn note_block(note: &str, styles: &ReportStyles) -> PaddedElement<Paragraph> {
    let inset = mm_from_f64(NOTE_INSET / 2.0);
    Paragraph::new(StyledString::new(note.to_owned(), styles.note))
        .padded(Margins::trbl(0, inset, 1, inset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocationAssignment, ResourceAssignment};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_uses_explicit_filter_dates() {
        let window = ReportWindow::effective(
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 31)),
            date(2024, 6, 15),
        )
        .unwrap();
        assert_eq!(window.title(), "Reservations for: January 1 - January 31");
    }

    #[test]
    fn window_defaults_to_one_month_from_today() {
        let window = ReportWindow::effective(None, None, date(2024, 3, 5)).unwrap();
        assert_eq!(window.start(), date(2024, 3, 5));
        assert_eq!(window.end(), date(2024, 4, 5));
        assert_eq!(window.title(), "Reservations for: March 5 - April 5");
    }

    #[test]
    fn window_mixes_defaults_with_explicit_dates() {
        let window =
            ReportWindow::effective(None, Some(date(2024, 12, 24)), date(2024, 11, 30)).unwrap();
        assert_eq!(window.start(), date(2024, 11, 30));
        assert_eq!(window.end(), date(2024, 12, 24));
    }

    #[test]
    fn day_header_uses_long_form_date() {
        assert_eq!(day_header_label(date(2024, 3, 5)), "Tuesday, March 5, 2024");
    }

    #[test]
    fn unapproved_status_is_highlighted() {
        let styles = ReportStyles::new();
        let highlighted = styles.status(ApprovalState::Unapproved);
        assert!(highlighted.is_italic());
        assert_eq!(highlighted.color(), Some(ACCENT));
    }

    #[test]
    fn other_statuses_render_plain() {
        let styles = ReportStyles::new();
        for state in [
            ApprovalState::Approved,
            ApprovalState::ChangesNeeded,
            ApprovalState::Denied,
        ] {
            let style = styles.status(state);
            assert!(!style.is_italic());
            assert_eq!(style.color(), None);
        }
    }

    #[test]
    fn approved_assignments_carry_the_checkmark() {
        assert_eq!(bullet_label("Main Hall", true), "Main Hall \u{2713}");
        assert_eq!(bullet_label("Projector(2)", false), "Projector(2)");
    }

    #[test]
    fn setup_photo_presence_is_a_yes_no_label() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }

    #[test]
    fn blank_notes_are_suppressed() {
        let base = ReservationSummary::new(1, "Rehearsal", ApprovalState::Approved);
        assert!(nonblank_note(&base).is_none());
        assert!(nonblank_note(&base.clone().with_note(Some("   \t".to_string()))).is_none());
        assert_eq!(
            nonblank_note(&base.with_note(Some("Needs risers".to_string()))),
            Some("Needs risers")
        );
    }

    #[test]
    fn row_builders_accept_full_summaries() {
        let styles = ReportStyles::new();
        let summary = ReservationSummary::new(3, "Town Hall", ApprovalState::Unapproved)
            .with_event_time_description("9:00 AM - 10:00 AM")
            .with_reservation_time_description("8:30 AM - 10:15 AM")
            .with_location(LocationAssignment::new("Main Hall", ApprovalState::Approved))
            .with_resource(ResourceAssignment::new(
                "Projector",
                2,
                ApprovalState::Unapproved,
            ));

        assert!(reservation_row(&summary, &styles).is_ok());
        assert!(column_header_row(&styles).is_ok());
    }
}
