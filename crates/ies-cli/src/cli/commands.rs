use super::CliError;
use super::helpers::{parse_vector, render_grid_summary, render_summary};
use anyhow::Context;
use globset::GlobBuilder;
use ies_core::{
    FixturePose, Orientation, calculate_point_illuminance, evaluate_grid, load_layout,
    read_ies_file, write_ies_file,
};
use std::fs;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct InspectArgs {
    /// LM-63 file to read
    file: PathBuf,

    /// Print the full parsed record as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct ExportArgs {
    /// LM-63 file to read
    file: PathBuf,

    /// Destination of the normalized file
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct IlluminanceArgs {
    /// LM-63 file to read
    file: PathBuf,

    /// Luminaire position as x,y,z
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    fixture: [f64; 3],

    /// Receiving point as x,y,z
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    point: [f64; 3],

    /// Rotation about z in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    yaw: f64,

    /// Rotation about y in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pitch: f64,

    /// Rotation about x in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    roll: f64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct GridArgs {
    /// Layout JSON describing fixtures and the working plane
    #[arg(long)]
    layout: PathBuf,

    /// Write every grid point to this JSON file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct BatchArgs {
    /// Directory to scan (not recursive)
    dir: PathBuf,

    /// File name glob, matched case-insensitively
    #[arg(long, default_value = "*.ies")]
    pattern: String,
}

pub(super) fn run_inspect_command(args: InspectArgs) -> Result<i32, CliError> {
    let data = read_ies_file(&args.file)?;
    if args.json {
        let json = serde_json::to_string_pretty(&data).context("serializing IES record")?;
        println!("{json}");
    } else {
        println!("{}", render_summary(&args.file, &data));
    }
    Ok(0)
}

pub(super) fn run_export_command(args: ExportArgs) -> Result<i32, CliError> {
    let data = read_ies_file(&args.file)?;
    write_ies_file(&args.output, &data)?;
    println!("Wrote {}", args.output.display());
    Ok(0)
}

pub(super) fn run_illuminance_command(args: IlluminanceArgs) -> Result<i32, CliError> {
    let data = read_ies_file(&args.file)?;
    let pose = FixturePose {
        position: args.fixture,
        orientation: Orientation {
            yaw: args.yaw,
            pitch: args.pitch,
            roll: args.roll,
        },
    };
    let result = calculate_point_illuminance(&data, &pose, args.point);

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("serializing illuminance")?;
        println!("{json}");
    } else {
        println!("Illuminance: {:.3} lx", result.illuminance);
        println!("Incident angle: {:.2} deg", result.incident_angle);
        let [x, y, z] = result.direction_to_source;
        println!("Direction to source: {x:.4},{y:.4},{z:.4}");
    }
    Ok(0)
}

pub(super) fn run_grid_command(args: GridArgs) -> Result<i32, CliError> {
    let layout = load_layout(&args.layout)?;
    let grid = evaluate_grid(&layout.placed_fixtures(), layout.grid());
    println!("{}", render_grid_summary(&grid));

    if let Some(report) = &args.report {
        if let Some(parent) = report.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&grid).context("serializing grid report")?;
        fs::write(report, json + "\n")
            .with_context(|| format!("writing grid report '{}'", report.display()))?;
        println!("Report: {}", report.display());
    }
    Ok(0)
}

pub(super) fn run_batch_command(args: BatchArgs) -> Result<i32, CliError> {
    let matcher = GlobBuilder::new(&args.pattern)
        .case_insensitive(true)
        .build()
        .map_err(|error| CliError::Usage(format!("invalid pattern '{}': {error}", args.pattern)))?
        .compile_matcher();

    let entries = fs::read_dir(&args.dir)
        .with_context(|| format!("reading directory '{}'", args.dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading directory '{}'", args.dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.file_name().is_some_and(|name| matcher.is_match(name)) {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(CliError::Usage(format!(
            "no files in '{}' match '{}'",
            args.dir.display(),
            args.pattern
        )));
    }

    let mut exit_code = 0;
    let mut failed = 0;
    for path in &files {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match read_ies_file(path) {
            Ok(data) => {
                let derived = data.derived();
                println!(
                    "OK\t{name}\t{:.1} lm\t{:.1} lm/W\tbeam {:.1} deg",
                    derived.total_lumens, derived.efficacy, derived.beam_angle
                );
            }
            Err(error) => {
                tracing::warn!(file = %path.display(), "failed to parse");
                println!("FAILED\t{name}\t{}", error.diagnostic_line());
                failed += 1;
                exit_code = exit_code.max(error.exit_code());
            }
        }
    }

    println!("{} file(s), {failed} failed", files.len());
    Ok(exit_code)
}
