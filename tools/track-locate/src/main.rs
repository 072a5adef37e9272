use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use track_locator::builtin::{coimbatore_region, kerala_main_line};
use track_locator::{
    subscribe, Coordinate, FeatureCatalog, LocatorConfig, MotionEvaluator, MotionReport, PositionFix,
    SimulatedSource, SourceMode, SourceSet, StaticFeatureCatalog, SubscribeOptions,
};

mod input;
mod output;

use input::{latest_timestamp, read_config, read_fixes};
use output::write_reports;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CatalogChoice {
    /// Coimbatore region, Salem division
    Coimbatore,
    /// Kerala main line stations
    Kerala,
}

#[derive(Parser, Debug)]
#[command(
    name = "track-locate",
    author,
    version,
    about = "Resolve GPS fixes to railway stations, landmarks and track kilometres",
    long_about = "Evaluates position fixes against a built-in station and landmark catalog. \
                  Each fix is reported with its lock status, drift, nearest station, \
                  estimated track km, upcoming landmarks and the speed restriction in force.\n\n\
                  Fixes come from --lat/--lon, a JSON file (--input) or a simulated run \
                  along the catalog's stations (--simulate)."
)]
struct Args {
    /// Latitude of a single fix
    #[arg(long, requires = "lon", conflicts_with_all = ["input", "simulate"], allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of a single fix
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// JSON file holding an array of fixes
    #[arg(short, long, conflicts_with = "simulate")]
    input: Option<PathBuf>,

    /// Speed for a single fix (m/s); also the simulated train speed
    #[arg(long, default_value_t = 0.0)]
    speed: f64,

    /// Horizontal accuracy for a single fix (m)
    #[arg(long, default_value_t = 10.0)]
    accuracy: f64,

    /// Timestamp for a single fix (ms since epoch), defaults to now
    #[arg(long)]
    timestamp: Option<i64>,

    /// Evaluation time (ms since epoch) for staleness checks. Defaults to the
    /// newest fix in --input, otherwise to now
    #[arg(long)]
    now: Option<i64>,

    /// Built-in catalog to resolve against
    #[arg(long, value_enum, default_value = "coimbatore")]
    catalog: CatalogChoice,

    /// Locator config as JSON, missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulate this many fixes along the catalog's stations
    #[arg(long)]
    simulate: Option<usize>,

    /// Delay between simulated fixes (ms)
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,

    /// Seed for simulated position noise
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => LocatorConfig::default(),
    };

    let catalog = match args.catalog {
        CatalogChoice::Coimbatore => coimbatore_region(),
        CatalogChoice::Kerala => kerala_main_line(),
    }
    .context("Failed to load built-in catalog")?;
    tracing::info!(
        catalog = ?args.catalog,
        stations = catalog.stations().len(),
        landmarks = catalog.landmarks().len(),
        "catalog loaded"
    );

    let mut evaluator = MotionEvaluator::new(config);

    let reports = if let Some(count) = args.simulate {
        simulate(&catalog, &mut evaluator, &args, count)?
    } else {
        let fixes = collect_fixes(&args)?;
        tracing::info!("evaluating {} fixes", fixes.len());

        let replay_ms = args.input.as_ref().and_then(|_| latest_timestamp(&fixes));
        let now_ms = args
            .now
            .or(replay_ms)
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
        tracing::debug!(now_ms, "staleness reference time");

        fixes
            .iter()
            .map(|fix| evaluator.evaluate(&catalog, fix, now_ms))
            .collect::<track_locator::Result<Vec<_>>>()
            .context("Failed to evaluate fixes")?
    };

    write_reports(std::io::stdout().lock(), &reports)
}

fn collect_fixes(args: &Args) -> Result<Vec<PositionFix>> {
    if let Some(path) = &args.input {
        return read_fixes(path);
    }

    let (Some(lat), Some(lon)) = (args.lat, args.lon) else {
        bail!("Provide --lat/--lon, --input <file> or --simulate <count>");
    };

    let coordinate = Coordinate::validated(lat, lon).context("Invalid --lat/--lon")?;
    let timestamp_ms = args.timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    Ok(vec![PositionFix::new(coordinate, args.accuracy, timestamp_ms).with_speed(args.speed)])
}

/// Run a simulated trip through a subscription and evaluate each fix as it
/// arrives.
fn simulate(
    catalog: &StaticFeatureCatalog,
    evaluator: &mut MotionEvaluator,
    args: &Args,
    count: usize,
) -> Result<Vec<MotionReport>> {
    let waypoints: Vec<Coordinate> = catalog.stations().iter().map(|s| s.location).collect();
    let speed_mps = if args.speed > 0.0 { args.speed } else { 20.0 };
    let step_s = args.interval_ms as f64 / 1000.0;

    let source = SimulatedSource::new(waypoints, speed_mps, step_s, args.seed)
        .context("Failed to build simulated source")?;
    tracing::info!(count, speed_mps, "starting simulated run");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let mut subscription = subscribe(
            SourceSet {
                live: None,
                fallback: Some(Arc::new(source)),
            },
            SubscribeOptions {
                mode: SourceMode::FallbackSimulated,
                interval: Duration::from_millis(args.interval_ms.max(1)),
                ..SubscribeOptions::default()
            },
        )?;

        let mut reports = Vec::with_capacity(count);
        while reports.len() < count {
            let Some(fix) = subscription.next().await else {
                bail!("Simulated source stopped after {} fixes", reports.len());
            };
            let now_ms = chrono::Utc::now().timestamp_millis();
            reports.push(evaluator.evaluate(catalog, &fix, now_ms)?);
        }

        subscription.unsubscribe();
        Ok::<_, anyhow::Error>(reports)
    })
}
