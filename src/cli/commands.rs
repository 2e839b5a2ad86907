use crate::cli::args::{Cli, Commands};
use crate::cli::logging::{init_logging, LogConfig};
use crate::cli::settings::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::{Datum, DatumSpec, InputRepresentation};
use crate::processors::CoordinateProcessor;
use crate::projection::resolve_spec;
use crate::readers::read_input;
use crate::utils::progress::ProgressReporter;
use crate::utils::{default_output_filename, format_dms, parse_dms, Axis};
use crate::writers::{CsvWriter, GeoJsonWriter, OutputFormat, ParquetWriter};
use std::path::Path;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    let log_config = LogConfig::from_verbose(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(cli.log_file.clone());
    init_logging(&log_config)?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            representation,
            datum,
            zone,
            format,
            compression,
            max_workers,
            no_progress,
            show_failures,
        } => {
            let settings = Settings::load(cli.config.as_deref())?;

            let representation: InputRepresentation = representation
                .unwrap_or_else(|| settings.representation.clone())
                .parse()?;
            let datum = datum
                .or(settings.datum.clone())
                .map(|d| d.parse::<Datum>())
                .transpose()?;
            let datum_spec = build_datum_spec(
                representation,
                datum,
                zone.or(settings.zone.clone()).as_deref(),
            )?;
            let format = select_format(format.as_deref(), output.as_deref(), &settings)?;
            let compression = compression.unwrap_or_else(|| settings.compression.clone());
            let max_workers = max_workers.unwrap_or(settings.max_workers);
            let silent = no_progress || !settings.progress;

            let output_file = output.unwrap_or_else(|| default_output_filename(format.extension()));

            println!("Converting coordinates...");
            println!("Input file: {}", input.display());
            println!("Output file: {}", output_file.display());
            println!("Representation: {}", representation);
            if let Some(spec) = datum_spec {
                println!("Source: {}", spec);
            }

            let processor = CoordinateProcessor::new(representation)
                .with_datum_spec(datum_spec)
                .with_datum(datum)
                .with_max_workers(max_workers)
                .with_keep_failures(show_failures);

            let (records, report) = tokio::task::spawn_blocking(move || -> Result<_> {
                let rows = read_input(&input)?;
                info!(rows = rows.len(), file = %input.display(), "Loaded input table");

                let progress =
                    ProgressReporter::new(rows.len() as u64, "Converting coordinates...", silent);
                processor.process(&rows, Some(&progress))
            })
            .await??;

            println!("\n{}", report.summary());

            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            println!("Writing {} records as {}...", records.len(), format);
            let write_path = output_file.clone();
            tokio::task::spawn_blocking(move || -> Result<()> {
                let spinner = ProgressReporter::new_spinner("Writing output...", silent);
                let written = match format {
                    OutputFormat::Csv => CsvWriter::new().write_records(&records, &write_path),
                    OutputFormat::GeoJson => {
                        GeoJsonWriter::new().write_records(&records, &write_path)
                    }
                    OutputFormat::Parquet => {
                        let writer = ParquetWriter::new().with_compression(&compression)?;
                        writer.write_records(&records, &write_path)?;
                        spinner.println(&writer.get_file_info(&write_path)?.summary());
                        Ok(())
                    }
                };
                spinner.finish_with_message("Output written");
                written
            })
            .await??;

            println!("Conversion complete: {}", output_file.display());
        }

        Commands::Resolve { datum, zone } => {
            let datum: Datum = datum.parse()?;
            let spec = DatumSpec::from_zone_str(datum, &zone)?;
            let id = resolve_spec(&spec)?;
            let crs = id.definition()?;

            println!("{} -> {}", spec, id);
            println!("{}", crs.summary());
        }

        Commands::Parse { text, axis } => {
            let axis = Axis::from(axis);
            let decimal = parse_dms(&text)?;

            println!("Decimal degrees: {}", decimal);
            println!("DMS: {}", format_dms(decimal, axis));
        }
    }

    Ok(())
}

/// Combine datum and zone selections into the source definition of a run.
fn build_datum_spec(
    representation: InputRepresentation,
    datum: Option<Datum>,
    zone: Option<&str>,
) -> Result<Option<DatumSpec>> {
    match (zone, representation) {
        (Some(zone), _) => Ok(Some(DatumSpec::from_zone_str(
            datum.unwrap_or(Datum::Wgs84),
            zone,
        )?)),
        (None, InputRepresentation::Utm) => Err(ProcessingError::Configuration(
            "UTM input requires --zone (e.g. 48S)".to_string(),
        )),
        (None, _) => Ok(None),
    }
}

/// Flag first, then the output file extension, then settings.
fn select_format(
    flag: Option<&str>,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<OutputFormat> {
    if let Some(flag) = flag {
        return flag.parse();
    }

    let from_extension = output
        .and_then(Path::extension)
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse::<OutputFormat>().ok());

    match from_extension {
        Some(format) => Ok(format),
        None => settings.output_format.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hemisphere;

    fn settings() -> Settings {
        Settings {
            representation: "dd".to_string(),
            datum: None,
            zone: None,
            output_format: "csv".to_string(),
            compression: "snappy".to_string(),
            max_workers: 1,
            progress: false,
        }
    }

    #[test]
    fn test_build_datum_spec() {
        let spec = build_datum_spec(InputRepresentation::Utm, Some(Datum::Dgn95), Some("50S"))
            .unwrap()
            .unwrap();
        assert_eq!(spec.datum, Datum::Dgn95);
        assert_eq!(spec.zone, 50);
        assert_eq!(spec.hemisphere, Hemisphere::South);

        let spec = build_datum_spec(InputRepresentation::Utm, None, Some("48S"))
            .unwrap()
            .unwrap();
        assert_eq!(spec.datum, Datum::Wgs84);

        let err =
            build_datum_spec(InputRepresentation::Utm, Some(Datum::Dgn95), None).unwrap_err();
        assert!(err.is_configuration());

        assert!(build_datum_spec(InputRepresentation::Dms, Some(Datum::Dgn95), None)
            .unwrap()
            .is_none());
        assert!(
            build_datum_spec(InputRepresentation::Utm, Some(Datum::Wgs84), Some("61N")).is_err()
        );
        assert!("NAD27".parse::<Datum>().is_err());
    }

    #[test]
    fn test_select_format() {
        let settings = settings();
        assert_eq!(
            select_format(Some("parquet"), None, &settings).unwrap(),
            OutputFormat::Parquet
        );
        assert_eq!(
            select_format(None, Some(Path::new("out/points.geojson")), &settings).unwrap(),
            OutputFormat::GeoJson
        );
        assert_eq!(
            select_format(None, Some(Path::new("out/points.txt")), &settings).unwrap(),
            OutputFormat::Csv
        );
        assert!(select_format(Some("xlsx"), None, &settings).is_err());
    }
}
