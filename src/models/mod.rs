pub mod datum;
pub mod enriched;
pub mod point;
pub mod record;

pub use datum::{parse_zone, Datum, DatumSpec, Hemisphere, InputRepresentation};
pub use enriched::{EnrichedRecord, EnrichedRecordBuilder, UtmCoordinate, COMPUTED_COLUMNS};
pub use point::CanonicalPoint;
pub use record::{FieldValue, RawRecord, X_FIELD, Y_FIELD};
