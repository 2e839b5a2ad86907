use crate::cli::logging::LogFormat;
use crate::utils::Axis;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coordinate-processor")]
#[command(about = "Convert coordinate tables between Decimal Degrees, DMS and UTM (WGS84 / DGN95)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: coordinate-processor.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CSV or JSON table of coordinates
    Convert {
        #[arg(short, long, help = "Input .csv or .json file with x and y columns")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output file path [default: output/konversi-koordinat-{YYMMDD}.{ext}]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Input representation: dd, dms or utm")]
        representation: Option<String>,

        #[arg(short, long, help = "Datum of UTM input: WGS84 or DGN95")]
        datum: Option<String>,

        #[arg(short, long, help = "UTM zone of the input, e.g. 48S")]
        zone: Option<String>,

        #[arg(short, long, help = "Output format: csv, geojson or parquet")]
        format: Option<String>,

        #[arg(short, long, help = "Parquet compression: snappy, gzip, lz4, zstd or none")]
        compression: Option<String>,

        #[arg(long)]
        max_workers: Option<usize>,

        #[arg(long, help = "Hide the progress bar")]
        no_progress: bool,

        #[arg(long, help = "List the first dropped rows with their reasons")]
        show_failures: bool,
    },

    /// Print the EPSG code and parameters for a datum and zone
    Resolve {
        #[arg(short, long)]
        datum: String,

        #[arg(short, long)]
        zone: String,
    },

    /// Parse a DMS string and print its decimal and canonical DMS forms
    Parse {
        text: String,

        #[arg(short, long, value_enum, default_value_t = AxisArg::Lat)]
        axis: AxisArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    Lat,
    Lon,
}

impl From<AxisArg> for Axis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::Lat => Axis::Lat,
            AxisArg::Lon => Axis::Lon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from([
            "coordinate-processor",
            "--verbose",
            "convert",
            "--input",
            "points.csv",
            "--representation",
            "utm",
            "--datum",
            "DGN95",
            "--zone",
            "50S",
            "--show-failures",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Convert {
                input,
                representation,
                datum,
                zone,
                show_failures,
                output,
                ..
            } => {
                assert_eq!(input, PathBuf::from("points.csv"));
                assert_eq!(representation.as_deref(), Some("utm"));
                assert_eq!(datum.as_deref(), Some("DGN95"));
                assert_eq!(zone.as_deref(), Some("50S"));
                assert!(show_failures);
                assert!(output.is_none());
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_command_axis() {
        let cli = Cli::try_parse_from([
            "coordinate-processor",
            "parse",
            "106 49 37 BT",
            "--axis",
            "lon",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { text, axis } => {
                assert_eq!(text, "106 49 37 BT");
                assert_eq!(axis, AxisArg::Lon);
            }
            _ => panic!("expected parse"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
