//! examkit-report: Text and JSON rendering of report cards and grade listings.

pub mod json;
pub mod text;
