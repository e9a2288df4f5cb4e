use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use terrapatch::config::FileConfig;
use terrapatch::geometry::{BoundsReport, ViewBox, check_bounds};
use terrapatch::store::{load_updates, read_document, write_document_atomic};
use terrapatch::{PatchOptions, PatchReport, PatchStatus, Patcher};

/// Merge generated territory geometry into a territory data file
///
/// Examples:
///   # Patch src/data/territories.js from scripts/generated-polygons.json
///   terrapatch apply
///
///   # Preview what would change without writing
///   terrapatch apply --dry-run -v
///
///   # Patch an older file that stores outlines under `polygon:`
///   terrapatch apply --outline-key polygon -d legacy/territories.js
///
///   # Fail if the territory file is out of date (for CI)
///   terrapatch apply --check
///
///   # Check generated geometry fits the map view box
///   terrapatch bounds --width 1400 --height 920
#[derive(Parser, Debug)]
#[command(name = "terrapatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches terrapatch.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite territory geometry fields from the generated polygon data
    Apply(ApplyArgs),
    /// Report the extent of the generated geometry against the map view box
    Bounds(BoundsArgs),
}

#[derive(clap::Args, Debug)]
struct ApplyArgs {
    /// Generated polygon JSON (defaults to scripts/generated-polygons.json)
    #[arg(short = 'u', long)]
    updates: Option<PathBuf>,

    /// Territory data file to patch (defaults to src/data/territories.js)
    #[arg(short = 'd', long)]
    document: Option<PathBuf>,

    /// Write the result here instead of back over the document
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Key of the wrapper that holds the outline path string
    #[arg(long)]
    outline_key: Option<String>,

    /// Patch in memory and report, but do not write
    #[arg(long)]
    dry_run: bool,

    /// Exit with an error if any territory would change; never writes
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,
}

#[derive(clap::Args, Debug)]
struct BoundsArgs {
    /// Generated polygon JSON (defaults to scripts/generated-polygons.json)
    #[arg(short = 'u', long)]
    updates: Option<PathBuf>,

    /// View box width
    #[arg(long)]
    width: Option<f64>,

    /// View box height
    #[arg(long)]
    height: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;
    init_logging(verbose);

    match args.command {
        Command::Apply(apply) => run_apply(apply, file_config, verbose),
        Command::Bounds(bounds) => run_bounds(bounds, file_config),
    }
}

fn run_apply(args: ApplyArgs, file_config: FileConfig, verbose: bool) -> Result<()> {
    let total_start = Instant::now();

    let updates_path = args.updates.unwrap_or(file_config.updates);
    let document_path = args.document.unwrap_or(file_config.document);
    let outline_key = args.outline_key.unwrap_or(file_config.outline_key);
    let output_path = args.output.unwrap_or_else(|| document_path.clone());

    println!("terrapatch - Territory Geometry Patcher");
    println!("=======================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Polygon data: {}", updates_path.display());
        println!("  Territory file: {}", document_path.display());
        println!("  Output: {}", output_path.display());
        println!("  Outline key: {}", outline_key);
        if args.dry_run {
            println!("  Dry run: nothing will be written");
        }
        println!();
    }

    let spinner = create_spinner("Loading polygon data...");
    let start = Instant::now();
    let updates = load_updates(&updates_path)?;
    let document = read_document(&document_path).context("Failed to read territory file")?;
    spinner.finish_with_message(format!(
        "Loaded {} territories, {:.1} KB territory file [{:.1}s]",
        updates.len(),
        document.len() as f64 / 1024.0,
        start.elapsed().as_secs_f32()
    ));

    let options = PatchOptions::default().with_outline_key(outline_key);
    let patcher = Patcher::new(&options).context("Failed to build territory matchers")?;
    let patched = patcher
        .patch(&document, &updates)
        .with_context(|| format!("Failed to patch {}", document_path.display()))?;

    println!();
    println!("Territory results:");
    println!();
    print_report(&patched.report, &options, verbose);
    println!();
    println!("{}", patched.report.summary());

    if args.check {
        if patched.has_changes() {
            bail!(
                "{} territories in {} are out of date",
                patched.report.changed_count(),
                document_path.display()
            );
        }
        println!("{} is up to date", document_path.display());
        return Ok(());
    }

    if args.dry_run {
        println!("Dry run: {} not written", output_path.display());
        return Ok(());
    }

    if !patched.has_changes() && output_path == document_path {
        println!("No changes; {} left untouched", document_path.display());
        return Ok(());
    }

    write_document_atomic(&output_path, &patched.document)
        .context("Failed to write territory file")?;

    println!();
    println!(
        "Done! Wrote {} [{:.1}s]",
        output_path.display(),
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn print_report(report: &PatchReport, options: &PatchOptions, verbose: bool) {
    for entry in &report.entries {
        println!("{}:", entry.id);
        match &entry.status {
            PatchStatus::Updated {
                written,
                missing,
                changed,
            } => {
                if *changed {
                    println!("  ✓ Updated");
                } else {
                    println!("  ✓ Already up to date");
                }
                if verbose && !written.is_empty() {
                    let names: Vec<&str> =
                        written.iter().map(|f| options.field_key(*f)).collect();
                    println!("    fields: {}", names.join(", "));
                }
                for field in missing {
                    println!(
                        "  ⚠ No {} field in {}",
                        options.field_key(*field),
                        entry.id
                    );
                }
            }
            PatchStatus::NotFound => {
                println!("  ⚠ Could not find {}", entry.id);
            }
        }
    }
}

fn run_bounds(args: BoundsArgs, file_config: FileConfig) -> Result<()> {
    let updates_path = args.updates.unwrap_or(file_config.updates);
    let view_box = ViewBox::new(
        args.width.unwrap_or(file_config.view_box.width),
        args.height.unwrap_or(file_config.view_box.height),
    );
    if view_box.width <= 0.0 || view_box.height <= 0.0 {
        bail!(
            "View box must have a positive size, got {} x {}",
            view_box.width,
            view_box.height
        );
    }

    let updates = load_updates(&updates_path)?;
    let report = check_bounds(&updates, view_box);
    print_bounds(&report);

    Ok(())
}

fn print_bounds(report: &BoundsReport) {
    let Some(bounds) = &report.bounds else {
        println!("No geometry found in polygon data");
        return;
    };

    println!("Current bounds:");
    println!(
        "  X: {:.2} to {:.2} (range: {:.2})",
        bounds.min_x,
        bounds.max_x,
        bounds.width()
    );
    println!(
        "  Y: {:.2} to {:.2} (range: {:.2})",
        bounds.min_y,
        bounds.max_y,
        bounds.height()
    );
    println!();
    println!(
        "Target view box: {} x {}",
        report.view_box.width, report.view_box.height
    );
    println!();
    if let (Some((dx, dy)), Some(scale)) = (report.offset(), report.scale_factor()) {
        println!("Adjustments needed:");
        println!("  X offset: {:.2}", dx);
        println!("  Y offset: {:.2}", dy);
        println!("  Scale factor: {:.3}", scale);
    }

    println!();
    if report.fits() {
        println!("✓ All territories fit within view box");
    } else {
        println!("⚠ Territories outside view box: {}", report.outside.len());
        for label in &report.outside {
            println!(
                "  {}: ({:.2}, {:.2}) - {}",
                label.id,
                label.position.x,
                label.position.y,
                label.sides.join(", ")
            );
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
