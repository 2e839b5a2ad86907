pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{format_dms, parse_decimal_field, parse_dms, parse_dms_field, Axis};
pub use filename::default_output_filename;
pub use progress::ProgressReporter;
