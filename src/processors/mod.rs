pub mod coordinate_processor;
pub mod report;

pub use coordinate_processor::{process, CoordinateProcessor};
pub use report::{ProcessingReport, RowFailure};
