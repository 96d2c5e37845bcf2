use clap::Parser;
use log::{info, warn};
use mlcexplorer_core::cli::{Cli, Command, ExportArgs, ExportFormat, OutputFormat, ViewArgs};
use mlcexplorer_core::export::{write_tables, CsvSheetWriter, XlsxSheetWriter};
use mlcexplorer_core::{ExplorerError, ExportConfig, PlanExplorer, PlanReport, Result};
use std::fs;
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("Processing file: {}", cli.file.display());
    let explorer = PlanExplorer::open(&cli.file)?;

    match cli.command {
        Command::Summary { format } => match format {
            OutputFormat::Text => println!("{}", PlanReport::new(explorer.plan())),
            OutputFormat::Json => println!("{}", to_json(explorer.plan())?),
        },
        Command::Segments { beam } => {
            let segments = explorer.segments(beam_index(&explorer, beam)?)?;
            for (&cp, segment) in segments
                .control_points()
                .iter()
                .zip(segments.segment_numbers())
            {
                println!("Segment {} (control point {})", segment, cp);
            }
        }
        Command::View(args) => view(&explorer, args)?,
        Command::Export(args) => export(&explorer, args)?,
    }

    Ok(())
}

/// Converts a 1-based beam number from the command line
fn beam_index(explorer: &PlanExplorer, beam: usize) -> Result<usize> {
    beam.checked_sub(1).ok_or(ExplorerError::IndexOutOfRange {
        kind: "Beam",
        index: beam,
        available: explorer.plan().beams.len(),
    })
}

fn view(explorer: &PlanExplorer, args: ViewArgs) -> Result<()> {
    let beam = beam_index(explorer, args.beam)?;
    let view = match (args.segment, args.control_point) {
        (Some(segment), _) => explorer.beam_view_for_segment(beam, segment)?,
        (None, Some(control_point)) => explorer.beam_view(beam, control_point)?,
        (None, None) => {
            let segments = explorer.segments(beam)?;
            let control_point = segments.single().ok_or_else(|| {
                ExplorerError::InvalidValue(format!(
                    "Beam {} has {} segments; choose one with --segment",
                    args.beam,
                    segments.len()
                ))
            })?;
            explorer.beam_view(beam, control_point)?
        }
    };

    let rendered = match args.format {
        OutputFormat::Text => view.to_string(),
        OutputFormat::Json => to_json(&view)?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, rendered)?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn export(explorer: &PlanExplorer, args: ExportArgs) -> Result<()> {
    let mut config = ExportConfig::default();
    if let Some(serial) = args.serial {
        config = config.with_device_serial(serial);
    }
    if let Some(width) = args.leaf_width {
        config = config.with_leaf_width(width);
    }

    let report = explorer.export(&config);
    if report.column_count() == 0 {
        warn!("No control points with complete jaw and MLC data; nothing exported");
    }

    match args.format {
        ExportFormat::Xlsx => {
            let mut writer = XlsxSheetWriter::new(&args.output)?;
            write_tables(&mut writer, &report.tables)?;
        }
        ExportFormat::Csv => {
            let mut writer = CsvSheetWriter::new(&args.output)?;
            write_tables(&mut writer, &report.tables)?;
        }
        ExportFormat::Json => write_json_export(&args.output, &report.tables)?,
    }

    info!(
        "Exported {} columns across {} beams ({} control points skipped)",
        report.column_count(),
        report.tables.len(),
        report.skipped.len()
    );
    Ok(())
}

#[cfg(feature = "json")]
fn write_json_export(
    directory: &std::path::Path,
    tables: &[mlcexplorer_core::BeamTable],
) -> Result<()> {
    use mlcexplorer_core::export::{json_path, write_json};

    fs::create_dir_all(directory)?;
    write_json(&json_path(directory), tables)
}

#[cfg(not(feature = "json"))]
fn write_json_export(
    _directory: &std::path::Path,
    _tables: &[mlcexplorer_core::BeamTable],
) -> Result<()> {
    Err(json_unavailable())
}

#[cfg(feature = "json")]
fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ExplorerError::InvalidValue(e.to_string()))
}

#[cfg(not(feature = "json"))]
fn to_json<T>(_value: &T) -> Result<String> {
    Err(json_unavailable())
}

#[cfg(not(feature = "json"))]
fn json_unavailable() -> ExplorerError {
    ExplorerError::InvalidValue(
        "JSON output requires the 'json' feature; rebuild with: cargo build --features json"
            .to_string(),
    )
}
