pub mod report;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for mlcexplorer
#[derive(Parser, Debug)]
#[command(name = "mlcexplorer")]
#[command(about = "Explore MLC and jaw positions of a DICOM RT Plan")]
#[command(version)]
pub struct Cli {
    /// Path to RT Plan DICOM file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize the plan: beams, metersets and visualizable segments
    Summary {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the visualizable segments of one beam
    Segments {
        /// Beam number (1-based)
        #[arg(short, long)]
        beam: usize,
    },

    /// Project one control point into a beam's-eye view
    View(ViewArgs),

    /// Export leaf, jaw and meterset data of every beam
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Beam number (1-based)
    #[arg(short, long)]
    pub beam: usize,

    /// Segment number (1-based); defaults to the only segment when there is one
    #[arg(short, long, conflicts_with = "control_point")]
    pub segment: Option<usize>,

    /// Raw control point index (0-based)
    #[arg(short, long)]
    pub control_point: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, default_value = "xlsx")]
    pub format: ExportFormat,

    /// Device serial written into every column
    #[arg(long)]
    pub serial: Option<String>,

    /// Leaf width value written into every column
    #[arg(long)]
    pub leaf_width: Option<f64>,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One Beam_Data.xlsx workbook with a sheet per beam
    Xlsx,
    /// One CSV file per beam
    Csv,
    /// One JSON document with every beam
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_view() {
        let cli = Cli::parse_from(["mlcexplorer", "plan.dcm", "view", "--beam", "2", "--segment", "3"]);
        match cli.command {
            Command::View(args) => {
                assert_eq!(args.beam, 2);
                assert_eq!(args.segment, Some(3));
                assert!(args.control_point.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_segment_conflicts_with_control_point() {
        let result = Cli::try_parse_from([
            "mlcexplorer",
            "plan.dcm",
            "view",
            "--beam",
            "1",
            "--segment",
            "1",
            "--control-point",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::parse_from(["mlcexplorer", "plan.dcm", "-v", "export"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.output, PathBuf::from("."));
                assert!(matches!(args.format, ExportFormat::Xlsx));
                assert!(args.serial.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
