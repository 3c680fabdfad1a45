//! brigade: play one full game of the kitchen brigade simulation.
//!
//! A coordinator and a handful of cooks share the standard 12×10 kitchen.
//! Orders arrive every 15–25 ticks; the game is won after ten completed
//! orders and lost after three failed ones.  The event trace is written to
//! `output/brigade/` as CSV, or logged through `tracing` with `--trace`.
//!
//! ```text
//! cargo run -p brigade -- --seed 7 --workers 5
//! RUST_LOG=kitchen=info cargo run -p brigade -- --trace
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kb_core::{KitchenConfig, Tick};
use kb_model::{KitchenEvent, Outcome, TimedEvent, load_catalog_csv};
use kb_output::{CsvEventSink, EventSink, TraceObserver, TracingEventSink};
use kb_sim::{Kitchen, KitchenBuilder, KitchenObserver, TickSummary};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "brigade", about = "Kitchen brigade multi-agent simulation")]
struct Args {
    /// JSON file with `KitchenConfig` fields; missing fields keep defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of cooks (the coordinator is extra).
    #[arg(long)]
    workers: Option<u32>,

    #[arg(long)]
    max_ticks: Option<u64>,

    /// Recipe catalog CSV.  Defaults to the built-in six-dish menu.
    #[arg(long)]
    recipes: Option<PathBuf>,

    /// Directory for `events.csv` and `tick_summaries.csv`.
    #[arg(long, default_value = "output/brigade")]
    out: PathBuf,

    /// Log events through `tracing` instead of writing CSV.
    #[arg(long)]
    trace: bool,
}

impl Args {
    fn kitchen_config(&self) -> Result<KitchenConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => KitchenConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(workers) = self.workers {
            config.worker_count = workers;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        Ok(config)
    }
}

// ── Observer wrapper to tally the run ────────────────────────────────────────

#[derive(Default)]
struct Tally {
    events:  usize,
    awards:  usize,
    washes:  usize,
    served:  Vec<(Tick, String)>,
    summary: TickSummary,
}

struct TallyObserver<S: EventSink> {
    inner: TraceObserver<S>,
    tally: Tally,
}

impl<S: EventSink> TallyObserver<S> {
    fn new(sink: S) -> Self {
        Self { inner: TraceObserver::new(sink), tally: Tally::default() }
    }
}

impl<S: EventSink> KitchenObserver for TallyObserver<S> {
    fn on_events(&mut self, tick: Tick, events: &[TimedEvent]) {
        self.tally.events += events.len();
        for e in events {
            match &e.event {
                KitchenEvent::TaskAwarded { .. } => self.tally.awards += 1,
                KitchenEvent::PlateWashed { .. } => self.tally.washes += 1,
                KitchenEvent::OrderCompleted { recipe, .. } => {
                    self.tally.served.push((e.tick, recipe.clone()));
                }
                _ => {}
            }
        }
        self.inner.on_events(tick, events);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.tally.summary = *summary;
        self.inner.on_tick_end(summary);
    }

    fn on_finish(&mut self, final_tick: Tick, outcome: Option<Outcome>) {
        self.inner.on_finish(final_tick, outcome);
    }
}

fn play<S: EventSink>(kitchen: &mut Kitchen, sink: S) -> Result<(Option<Outcome>, Tally)> {
    let mut obs = TallyObserver::new(sink);
    let outcome = kitchen.run(&mut obs);
    if let Some(e) = obs.inner.take_error() {
        return Err(e).context("writing the event trace");
    }
    Ok((outcome, obs.tally))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = args.kitchen_config()?;

    println!("=== brigade: kitchen brigade simulation ===");
    println!(
        "Cooks: {}  |  Seed: {}  |  Max ticks: {}",
        config.worker_count, config.seed, config.max_ticks
    );
    println!(
        "Win at {} served, lose at {} failed",
        config.win_threshold, config.lose_threshold
    );
    println!();

    // 1. Build the kitchen.
    let mut builder = KitchenBuilder::new(config);
    if let Some(path) = &args.recipes {
        let catalog = load_catalog_csv(path).with_context(|| format!("loading {}", path.display()))?;
        println!("Loaded {} recipes from {}", catalog.len(), path.display());
        builder = builder.catalog(catalog);
    }
    let mut kitchen = builder.build()?;
    info!(stations = kitchen.layout().station_count(), "kitchen ready");

    println!("Starting positions:");
    for line in kitchen.statuses() {
        println!("  {line}");
    }
    println!();

    // 2. Run.
    let t0 = Instant::now();
    let (outcome, tally) = if args.trace {
        play(&mut kitchen, TracingEventSink::new())?
    } else {
        play(&mut kitchen, CsvEventSink::new(&args.out))?
    };
    let elapsed = t0.elapsed();

    // 3. Summary.
    match outcome {
        Some(outcome) => println!("Game over at {}: {}", kitchen.now(), outcome.as_str().to_uppercase()),
        None => println!("Stopped at {} without a result", kitchen.now()),
    }
    println!("Simulated in {:.3} s", elapsed.as_secs_f64());
    if !args.trace {
        println!("  events.csv         : {} rows", tally.events);
        println!("  tick_summaries.csv : {} rows", kitchen.now().0);
        println!("  written to {}", args.out.display());
    }
    println!();

    let s = tally.summary;
    println!("{:<20} {:>6}", "Orders completed", s.completed_orders);
    println!("{:<20} {:>6}", "Orders failed", s.failed_orders);
    println!("{:<20} {:>6}", "Orders open", s.active_orders);
    println!("{:<20} {:>6}", "Tasks awarded", tally.awards);
    println!("{:<20} {:>6}", "Plates washed", tally.washes);
    println!(
        "{:<20} {:>6}",
        "Plates c/u/d",
        format!("{}/{}/{}", s.clean_plates, s.in_use_plates, s.dirty_plates)
    );
    println!();

    if !tally.served.is_empty() {
        println!("{:<8} {:<16}", "Tick", "Served");
        println!("{}", "-".repeat(24));
        for (tick, recipe) in &tally.served {
            println!("{:<8} {:<16}", tick.0, recipe);
        }
        println!();
    }

    println!("Final positions:");
    for line in kitchen.statuses() {
        println!("  {line}");
    }

    Ok(())
}
