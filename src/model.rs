//! Data structures describing the reservation records consumed by the report.
//!
//! The types in this module form a read-only view of the data the hosting
//! application hands over for a single render.  They intentionally avoid
//! referencing the rendering machinery so values can be assembled by callers
//! (or mapped from the host's own entities) without pulling in layout
//! concerns.  Nothing here is persisted; every value is built fresh per
//! report-generation call and discarded afterwards.

use chrono::NaiveDateTime;
use std::fmt;

/// Approval status of a reservation or of an individual location/resource
/// assignment within it.
///
/// The set mirrors the states the hosting application tracks.  The layout
/// layer only ever compares against [`ApprovalState::Approved`] (checkmark
/// glyphs on assignments) and [`ApprovalState::Unapproved`] (status
/// highlighting); every other state renders with its plain label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApprovalState {
    /// Fully approved.
    Approved,
    /// Submitted but not yet approved.
    Unapproved,
    /// Sent back to the requester for changes.
    ChangesNeeded,
    /// Rejected.
    Denied,
}

impl ApprovalState {
    /// Returns the human-readable label shown in the status column.
    pub fn label(self) -> &'static str {
        match self {
            ApprovalState::Approved => "Approved",
            ApprovalState::Unapproved => "Unapproved",
            ApprovalState::ChangesNeeded => "Changes Needed",
            ApprovalState::Denied => "Denied",
        }
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Representation of image sources accepted for the header logo.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// Image loaded from raw bytes.
    Bytes(Vec<u8>),
    /// Image referenced by a file path.
    Path(String),
}

impl ImageSource {
    /// Creates a new in-memory image from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Creates an image sourced from a file path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }
}

/// A location assigned to a reservation, carrying its own approval state
/// independent of the parent reservation's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationAssignment {
    name: String,
    approval_state: ApprovalState,
}

impl LocationAssignment {
    /// Creates a new location assignment.
    pub fn new(name: impl Into<String>, approval_state: ApprovalState) -> Self {
        Self {
            name: name.into(),
            approval_state,
        }
    }

    /// Returns the location's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the approval state of this assignment.
    pub fn approval_state(&self) -> ApprovalState {
        self.approval_state
    }
}

/// A resource assigned to a reservation together with the requested quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceAssignment {
    name: String,
    quantity: u32,
    approval_state: ApprovalState,
}

impl ResourceAssignment {
    /// Creates a new resource assignment.
    pub fn new(name: impl Into<String>, quantity: u32, approval_state: ApprovalState) -> Self {
        Self {
            name: name.into(),
            quantity,
            approval_state,
        }
    }

    /// Returns the resource's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the requested quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the approval state of this assignment.
    pub fn approval_state(&self) -> ApprovalState {
        self.approval_state
    }
}

/// Read-only view of one reservation and its nested assignments.
///
/// The event start drives grouping and therefore must be present for the
/// report to render; it is kept optional here so a missing value can be
/// rejected explicitly instead of silently defaulted.  The time description
/// strings are precomputed by the host and rendered verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservationSummary {
    id: i64,
    name: String,
    reservation_type: String,
    approval_state: ApprovalState,
    event_start: Option<NaiveDateTime>,
    event_end: Option<NaiveDateTime>,
    reservation_start: Option<NaiveDateTime>,
    reservation_end: Option<NaiveDateTime>,
    event_time_description: String,
    reservation_time_description: String,
    locations: Vec<LocationAssignment>,
    resources: Vec<ResourceAssignment>,
    note: Option<String>,
    setup_photo_id: Option<i64>,
}

impl ReservationSummary {
    /// Creates a new summary with the given identity and approval state.
    ///
    /// Scheduling fields, assignments and the note are filled in through the
    /// `with_*` builder methods.
    pub fn new(id: i64, name: impl Into<String>, approval_state: ApprovalState) -> Self {
        Self {
            id,
            name: name.into(),
            reservation_type: String::new(),
            approval_state,
            event_start: None,
            event_end: None,
            reservation_start: None,
            reservation_end: None,
            event_time_description: String::new(),
            reservation_time_description: String::new(),
            locations: Vec::new(),
            resources: Vec::new(),
            note: None,
            setup_photo_id: None,
        }
    }

    /// Returns the opaque identifier assigned by the host.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the reservation's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the reservation type label.
    pub fn reservation_type(&self) -> &str {
        &self.reservation_type
    }

    /// Returns the reservation's own approval state.
    pub fn approval_state(&self) -> ApprovalState {
        self.approval_state
    }

    /// Returns the event start timestamp, if the host supplied one.
    pub fn event_start(&self) -> Option<NaiveDateTime> {
        self.event_start
    }

    /// Returns the event end timestamp, if any.
    pub fn event_end(&self) -> Option<NaiveDateTime> {
        self.event_end
    }

    /// Returns the reservation start timestamp, if any.
    pub fn reservation_start(&self) -> Option<NaiveDateTime> {
        self.reservation_start
    }

    /// Returns the reservation end timestamp, if any.
    pub fn reservation_end(&self) -> Option<NaiveDateTime> {
        self.reservation_end
    }

    /// Returns the precomputed description of the event time range.
    pub fn event_time_description(&self) -> &str {
        &self.event_time_description
    }

    /// Returns the precomputed description of the reservation time range.
    pub fn reservation_time_description(&self) -> &str {
        &self.reservation_time_description
    }

    /// Returns the assigned locations in the host's order.
    pub fn locations(&self) -> &[LocationAssignment] {
        &self.locations
    }

    /// Returns the assigned resources in the host's order.
    pub fn resources(&self) -> &[ResourceAssignment] {
        &self.resources
    }

    /// Returns the note text, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the setup-photo reference, if any.  Only its presence is
    /// meaningful to the report.
    pub fn setup_photo_id(&self) -> Option<i64> {
        self.setup_photo_id
    }

    /// Sets the reservation type label and returns the updated summary.
    pub fn with_reservation_type(mut self, reservation_type: impl Into<String>) -> Self {
        self.reservation_type = reservation_type.into();
        self
    }

    /// Sets the event start timestamp and returns the updated summary.
    pub fn with_event_start(mut self, event_start: impl Into<Option<NaiveDateTime>>) -> Self {
        self.event_start = event_start.into();
        self
    }

    /// Sets the event end timestamp and returns the updated summary.
    pub fn with_event_end(mut self, event_end: impl Into<Option<NaiveDateTime>>) -> Self {
        self.event_end = event_end.into();
        self
    }

    /// Sets the reservation start timestamp and returns the updated summary.
    pub fn with_reservation_start(
        mut self,
        reservation_start: impl Into<Option<NaiveDateTime>>,
    ) -> Self {
        self.reservation_start = reservation_start.into();
        self
    }

    /// Sets the reservation end timestamp and returns the updated summary.
    pub fn with_reservation_end(
        mut self,
        reservation_end: impl Into<Option<NaiveDateTime>>,
    ) -> Self {
        self.reservation_end = reservation_end.into();
        self
    }

    /// Sets the event time description and returns the updated summary.
    pub fn with_event_time_description(mut self, description: impl Into<String>) -> Self {
        self.event_time_description = description.into();
        self
    }

    /// Sets the reservation time description and returns the updated summary.
    pub fn with_reservation_time_description(mut self, description: impl Into<String>) -> Self {
        self.reservation_time_description = description.into();
        self
    }

    /// Appends a location assignment and returns the updated summary.
    pub fn with_location(mut self, location: LocationAssignment) -> Self {
        self.locations.push(location);
        self
    }

    /// Extends the summary with multiple location assignments.
    pub fn with_locations<I>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = LocationAssignment>,
    {
        self.locations.extend(locations);
        self
    }

    /// Appends a resource assignment and returns the updated summary.
    pub fn with_resource(mut self, resource: ResourceAssignment) -> Self {
        self.resources.push(resource);
        self
    }

    /// Extends the summary with multiple resource assignments.
    pub fn with_resources<I>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = ResourceAssignment>,
    {
        self.resources.extend(resources);
        self
    }

    /// Sets the note text and returns the updated summary.
    pub fn with_note(mut self, note: impl Into<Option<String>>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the setup-photo reference and returns the updated summary.
    pub fn with_setup_photo_id(mut self, setup_photo_id: impl Into<Option<i64>>) -> Self {
        self.setup_photo_id = setup_photo_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn approval_state_labels() {
        assert_eq!(ApprovalState::Approved.label(), "Approved");
        assert_eq!(ApprovalState::Unapproved.to_string(), "Unapproved");
        assert_eq!(ApprovalState::ChangesNeeded.label(), "Changes Needed");
    }

    #[test]
    fn builder_accumulates_assignments() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let summary = ReservationSummary::new(7, "Town Hall", ApprovalState::Approved)
            .with_event_start(start)
            .with_location(LocationAssignment::new("Main Hall", ApprovalState::Approved))
            .with_resources(vec![
                ResourceAssignment::new("Projector", 2, ApprovalState::Unapproved),
                ResourceAssignment::new("Chairs", 40, ApprovalState::Approved),
            ]);

        assert_eq!(summary.id(), 7);
        assert_eq!(summary.event_start(), Some(start));
        assert_eq!(summary.locations().len(), 1);
        assert_eq!(summary.resources().len(), 2);
        assert_eq!(summary.resources()[0].quantity(), 2);
        assert!(summary.note().is_none());
        assert!(summary.setup_photo_id().is_none());
    }

    #[test]
    fn note_accessor_borrows() {
        let summary = ReservationSummary::new(1, "Rehearsal", ApprovalState::Unapproved)
            .with_note(Some("Stage left entrance".to_string()));
        assert_eq!(summary.note(), Some("Stage left entrance"));
    }
}
