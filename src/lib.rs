//! Day-grouped PDF reports for room and resource reservations.

pub mod elements;
pub mod fonts;
pub mod grouping;
pub mod layout;
pub mod model;
pub mod template;
