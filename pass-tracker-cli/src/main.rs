//! Pass Tracker CLI Application
//!
//! This is the display driver for the pass tracker. It uses the pass-tracker-core
//! library and adds:
//! - A refresh loop that re-reads the schedule once per tick
//! - Config file loading (config.toml) with command line overrides
//! - Text and JSON rendering of ongoing/upcoming passes and the countdown

use anyhow::Result;
use clap::Parser;
use pass_tracker_core::{ClassifierConfig, PassTracker};
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

mod clock;
mod config;
mod report;

use clock::{Clock, FixedClock, SystemClock};
use config::{AppConfig, OutputFormat};

/// Pass Tracker - Show ongoing and upcoming passes from a schedule file
#[derive(Parser, Debug)]
#[command(name = "pass-tracker")]
#[command(about = "Show ongoing and upcoming passes from a schedule file", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the pass schedule (default: sd1.txt)
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds (default: 1000)
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,

    /// Maximum number of upcoming passes to show (default: 6)
    #[arg(long, value_name = "COUNT")]
    limit: Option<usize>,

    /// Render a single frame and exit
    #[arg(long, conflicts_with = "ticks")]
    once: bool,

    /// Render this many frames and exit
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u64).range(1..))]
    ticks: Option<u64>,

    /// Freeze the clock at this instant (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_name = "INSTANT", value_parser = clock::parse_instant)]
    now: Option<pass_tracker_core::Timestamp>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Settings after merging the config file with command line overrides
#[derive(Debug)]
struct Settings {
    source: PathBuf,
    interval: Duration,
    upcoming_limit: usize,
    format: OutputFormat,
    ticks: Option<u64>,
}

impl Settings {
    fn resolve(args: &Args, config: AppConfig) -> Self {
        Self {
            source: args.source.clone().unwrap_or(config.source.path),
            interval: Duration::from_millis(args.interval_ms.unwrap_or(config.refresh.interval_ms)),
            upcoming_limit: args.limit.unwrap_or(config.display.upcoming_limit),
            format: args.format.unwrap_or(config.display.format),
            ticks: if args.once { Some(1) } else { args.ticks },
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Pass Tracker CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using core library v{}", pass_tracker_core::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    let settings = Settings::resolve(&args, app_config);
    log::debug!("Resolved settings: {:?}", settings);

    let tracker = PassTracker::new(&settings.source)
        .with_config(ClassifierConfig::new().with_upcoming_limit(settings.upcoming_limit));
    report_source_health(&tracker);

    let clock: Box<dyn Clock> = match args.now {
        Some(instant) => Box::new(FixedClock(instant)),
        None => Box::new(SystemClock),
    };

    run(&tracker, clock.as_ref(), &settings)
}

/// Refresh loop: one parse + classify + render per tick, never overlapping
fn run(tracker: &PassTracker, clock: &dyn Clock, settings: &Settings) -> Result<()> {
    let stdout = io::stdout();
    let continuous = settings.ticks != Some(1);
    let mut tick: u64 = 0;

    loop {
        let result = tracker.refresh(clock.now());

        let mut out = stdout.lock();
        // Text frames replace each other on screen; JSON frames accumulate
        if continuous && settings.format == OutputFormat::Text {
            write!(out, "\x1b[2J\x1b[H")?;
        }
        let render_now = clock.now();
        match settings.format {
            OutputFormat::Text => report::render_text(&mut out, render_now, &result)?,
            OutputFormat::Json => report::render_json(&mut out, render_now, &result)?,
        }
        out.flush()?;
        drop(out);

        tick += 1;
        if settings.ticks.is_some_and(|limit| tick >= limit) {
            break;
        }
        thread::sleep(settings.interval);
    }

    Ok(())
}

/// Log why the source yields nothing or fewer passes than it has lines
fn report_source_health(tracker: &PassTracker) {
    match tracker.inspect() {
        Ok(parsed) => {
            log::info!(
                "Loaded {} passes from {:?}",
                parsed.records.len(),
                tracker.source()
            );
            for err in parsed.errors() {
                log::debug!("Skipped {}", err);
            }
        }
        Err(e) => log::warn!(
            "Schedule {:?} is not readable yet ({}); showing no passes",
            tracker.source(),
            e
        ),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // Log to stderr so frames on stdout stay clean
    Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
