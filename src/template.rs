//! Report generation entry points and the host-facing template contract.
//!
//! The hosting application discovers report templates through the
//! [`ReportTemplate`] trait and registers them with a [`TemplateDescriptor`];
//! the mechanics of that registration live entirely on the host's side.

use chrono::{Local, NaiveDate};
use genpdf::error::Error;
use genpdf::{Document, Margins, PaperSize, SimplePageDecorator};

use crate::elements::mm_from_f64;
use crate::fonts;
use crate::grouping;
use crate::layout::{self, ReportWindow, PAGE_MARGIN};
use crate::model::{ImageSource, ReservationSummary};

/// Stable identifier the host registers this template under.
pub const TEMPLATE_ID: &str = "reservation-summary-report";

/// Display name offered when the template is selectable.
pub const TEMPLATE_NAME: &str = "Reservation Summary Report";

/// Registration descriptor handed to the host's template registry.
///
/// The host persists the active flag separately; the descriptor only carries
/// the initial value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateDescriptor {
    id: &'static str,
    name: &'static str,
    active: bool,
}

impl TemplateDescriptor {
    /// Returns the stable identifier.
    pub fn id(&self) -> &str {
        self.id
    }

    /// Returns the human-readable name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns whether the host should offer the template as selectable.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Contract a report template implementation must satisfy to be discoverable
/// by the host.
pub trait ReportTemplate {
    /// Non-fatal problems collected while the template was generating
    /// output, for the host to surface after the fact.
    fn exceptions(&self) -> &[Error];

    /// Renders the reservations into a finished document, returned as the
    /// complete serialized byte content.
    fn generate_report(
        &mut self,
        reservations: &[ReservationSummary],
        logo: Option<&ImageSource>,
        font_family: &str,
        filter_start: Option<NaiveDate>,
        filter_end: Option<NaiveDate>,
    ) -> Result<Vec<u8>, Error>;
}

/// The day-grouped reservation roster template.
#[derive(Default)]
pub struct ReservationReportTemplate {
    exceptions: Vec<Error>,
}

impl ReservationReportTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for host-side registration; active by default.
    pub fn descriptor() -> TemplateDescriptor {
        TemplateDescriptor {
            id: TEMPLATE_ID,
            name: TEMPLATE_NAME,
            active: true,
        }
    }
}

impl ReportTemplate for ReservationReportTemplate {
    fn exceptions(&self) -> &[Error] {
        &self.exceptions
    }

    fn generate_report(
        &mut self,
        reservations: &[ReservationSummary],
        logo: Option<&ImageSource>,
        font_family: &str,
        filter_start: Option<NaiveDate>,
        filter_end: Option<NaiveDate>,
    ) -> Result<Vec<u8>, Error> {
        generate_report(reservations, logo, font_family, filter_start, filter_end)
    }
}

/// Renders the full report and returns the serialized PDF bytes.
///
/// Grouping runs before any document is opened, so malformed input fails
/// without touching the renderer.  The returned buffer is the complete file;
/// no partial output is ever produced.  The filter dates bound the title's
/// display range only and never restrict which reservations are rendered.
pub fn generate_report(
    reservations: &[ReservationSummary],
    logo: Option<&ImageSource>,
    font_family: &str,
    filter_start: Option<NaiveDate>,
    filter_end: Option<NaiveDate>,
) -> Result<Vec<u8>, Error> {
    let groups = grouping::group_by_day(reservations)?;
    let window = ReportWindow::effective(filter_start, filter_end, Local::now().date_naive())?;

    let family = fonts::load_font_family(font_family)?;
    let mut document = Document::new(family);
    document.set_title(TEMPLATE_NAME);
    document.set_paper_size(PaperSize::A4);

    let margin = mm_from_f64(PAGE_MARGIN);
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(margin, margin, margin, margin));
    document.set_page_decorator(decorator);

    layout::compose(&mut document, &groups, logo, window)?;

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApprovalState;

    #[test]
    fn descriptor_is_active_with_stable_identity() {
        let descriptor = ReservationReportTemplate::descriptor();
        assert_eq!(descriptor.id(), TEMPLATE_ID);
        assert_eq!(descriptor.name(), TEMPLATE_NAME);
        assert!(descriptor.is_active());
    }

    #[test]
    fn template_starts_with_no_exceptions() {
        let template = ReservationReportTemplate::new();
        assert!(template.exceptions().is_empty());
    }

    #[test]
    fn malformed_input_fails_before_rendering() {
        // No event start: the error must surface from grouping, well before
        // fonts or the renderer are involved.
        let mut template = ReservationReportTemplate::new();
        let input = vec![ReservationSummary::new(
            42,
            "Orphaned",
            ApprovalState::Approved,
        )];

        let err = template
            .generate_report(&input, None, "Roboto", None, None)
            .unwrap_err();
        assert!(err.to_string().contains("reservation 42"));
    }
}
