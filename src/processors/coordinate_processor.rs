use crate::error::{ProcessingError, Result};
use crate::models::{
    CanonicalPoint, Datum, DatumSpec, EnrichedRecord, EnrichedRecordBuilder, InputRepresentation,
    RawRecord,
};
use crate::processors::report::{ProcessingReport, RowFailure};
use crate::projection::{geographic_to_auto_utm, projected_to_geographic, resolve_spec, ProjectedCrs};
use crate::utils::coordinates::{format_dms, parse_decimal_field, parse_dms_field, Axis};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// How Stage 1 turns a row's `x` / `y` into a canonical point.
#[derive(Debug, Clone, Copy)]
enum CanonicalSource {
    DecimalDegrees,
    Dms,
    Projected(ProjectedCrs),
}

/// Per-row result: the enriched record and whether its UTM fan-out failed.
type RowOutcome = std::result::Result<(EnrichedRecord, bool), RowFailure>;

/// Drives a table of raw rows through parsing, projection and fan-out.
pub struct CoordinateProcessor {
    representation: InputRepresentation,
    datum_spec: Option<DatumSpec>,
    datum: Option<Datum>,
    max_workers: usize,
    keep_failures: bool,
}

impl CoordinateProcessor {
    pub fn new(representation: InputRepresentation) -> Self {
        Self {
            representation,
            datum_spec: None,
            datum: None,
            max_workers: 1,
            keep_failures: true,
        }
    }

    pub fn with_datum_spec(mut self, datum_spec: Option<DatumSpec>) -> Self {
        self.datum_spec = datum_spec;
        self
    }

    /// Datum selected without a zone. Only UTM input uses a datum, so for
    /// DD/DMS input a non-WGS84 choice is reported as ignored.
    pub fn with_datum(mut self, datum: Option<Datum>) -> Self {
        self.datum = datum;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn with_keep_failures(mut self, keep_failures: bool) -> Self {
        self.keep_failures = keep_failures;
        self
    }

    /// Convert every row; unparsable rows are dropped and counted.
    ///
    /// Fails before touching any row when the datum/zone selection is invalid,
    /// and after Stage 1 when no row survives.
    pub fn process(
        &self,
        rows: &[RawRecord],
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<EnrichedRecord>, ProcessingReport)> {
        let mut report = ProcessingReport::new(self.representation, rows.len());
        let source = self.resolve_source(&mut report)?;

        info!(
            rows = rows.len(),
            representation = %self.representation,
            workers = self.max_workers,
            "Converting coordinates"
        );

        if let Some(p) = progress {
            p.set_message(&format!("Converting {} rows...", rows.len()));
        }

        let outcomes = self.run_rows(rows, &source, progress)?;

        let mut records = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok((record, utm_failed)) => {
                    if utm_failed {
                        report.auto_projection_failures += 1;
                    }
                    records.push(record);
                }
                Err(failure) => {
                    debug!(row = failure.row_index, reason = %failure.reason, "Dropping row");
                    report.dropped_rows += 1;
                    if self.keep_failures {
                        report.failures.push(failure);
                    }
                }
            }
        }
        report.kept_rows = records.len();

        if report.has_drops() {
            warn!(
                dropped = report.dropped_rows,
                total = report.total_rows,
                "Some rows could not be parsed and were dropped"
            );
        }

        if records.is_empty() {
            return Err(ProcessingError::EmptyBatch {
                dropped: report.dropped_rows,
            });
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Converted {} rows", records.len()));
        }

        info!(
            kept = report.kept_rows,
            dropped = report.dropped_rows,
            without_utm = report.auto_projection_failures,
            "Conversion complete"
        );

        Ok((records, report))
    }

    /// Decide the Stage-1 branch. For UTM input the CRS is resolved once here.
    fn resolve_source(&self, report: &mut ProcessingReport) -> Result<CanonicalSource> {
        match self.representation {
            InputRepresentation::DecimalDegrees | InputRepresentation::Dms => {
                let ignored = self
                    .datum_spec
                    .map(|s| s.datum)
                    .or(self.datum)
                    .filter(|d| *d != Datum::Wgs84);
                if let Some(datum) = ignored {
                    let message = format!(
                        "{} input is always read as WGS84; datum {} was ignored",
                        self.representation, datum
                    );
                    warn!("{}", message);
                    report.warnings.push(message);
                }

                Ok(match self.representation {
                    InputRepresentation::DecimalDegrees => CanonicalSource::DecimalDegrees,
                    _ => CanonicalSource::Dms,
                })
            }
            InputRepresentation::Utm => {
                let spec = self.datum_spec.ok_or_else(|| {
                    ProcessingError::Configuration(
                        "UTM input requires a datum and zone selection".to_string(),
                    )
                })?;

                let id = resolve_spec(&spec)?;
                let crs = id.definition()?;
                debug!(crs = %id, datum = %spec.datum, zone = %spec.zone_label(), "Resolved source CRS");

                report.crs = Some(id);
                Ok(CanonicalSource::Projected(crs))
            }
        }
    }

    fn run_rows(
        &self,
        rows: &[RawRecord],
        source: &CanonicalSource,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<RowOutcome>> {
        let processed_count = AtomicUsize::new(0);
        let convert = |(index, row): (usize, &RawRecord)| {
            let outcome = convert_row(index, row, source);

            let count = processed_count.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(p) = progress {
                p.update(count as u64);
            }

            outcome
        };

        if self.max_workers <= 1 {
            return Ok(rows.iter().enumerate().map(convert).collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Configuration(e.to_string()))?;

        // Indexed collect keeps input order.
        Ok(pool.install(|| rows.par_iter().enumerate().map(convert).collect()))
    }
}

/// Convenience wrapper for a sequential run without progress output.
pub fn process(
    rows: &[RawRecord],
    representation: InputRepresentation,
    datum_spec: Option<DatumSpec>,
) -> Result<(Vec<EnrichedRecord>, ProcessingReport)> {
    CoordinateProcessor::new(representation)
        .with_datum_spec(datum_spec)
        .process(rows, None)
}

fn convert_row(index: usize, row: &RawRecord, source: &CanonicalSource) -> RowOutcome {
    let failure = |e: ProcessingError| RowFailure {
        row_index: index,
        reason: e.to_string(),
    };

    let point = to_canonical(row, source).map_err(failure)?;
    enrich(index, row, point).map_err(failure)
}

/// Stage 1: bring a row to a WGS84 point.
fn to_canonical(row: &RawRecord, source: &CanonicalSource) -> Result<CanonicalPoint> {
    let (x, y) = row.require_coordinates()?;

    match source {
        CanonicalSource::DecimalDegrees => {
            CanonicalPoint::new(parse_decimal_field(x)?, parse_decimal_field(y)?)
        }
        CanonicalSource::Dms => CanonicalPoint::new(parse_dms_field(x)?, parse_dms_field(y)?),
        CanonicalSource::Projected(crs) => {
            projected_to_geographic(crs, parse_decimal_field(x)?, parse_decimal_field(y)?)
        }
    }
}

/// Stage 2: fan a canonical point out to DMS strings and the auto-UTM triple.
fn enrich(index: usize, row: &RawRecord, point: CanonicalPoint) -> Result<(EnrichedRecord, bool)> {
    let utm = match geographic_to_auto_utm(&point) {
        Ok(utm) => Some(utm),
        Err(e) => {
            debug!(row = index, error = %e, "UTM output undefined for row");
            None
        }
    };
    let utm_failed = utm.is_none();

    let record = EnrichedRecordBuilder::new()
        .row_index(index)
        .metadata(row.metadata())
        .point(point)
        .dms(
            format_dms(point.lat_dd, Axis::Lat),
            format_dms(point.lon_dd, Axis::Lon),
        )
        .utm(utm)
        .build()?;

    Ok((record, utm_failed))
}
