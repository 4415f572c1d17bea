//! Export collaborators consuming the filtered record set.
//!
//! Currently CSV export and a plain-text report.

pub mod csv;
pub mod report;

pub use self::csv::{export_to_file, to_csv_string, write_csv};
pub use report::generate_report;
