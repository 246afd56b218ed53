//! oasis — camel logistics demo for the rust_caravan simulator.
//!
//! Runs the built-in scenario, or a JSON scenario given as the first
//! argument, and writes CSV statistics to `output/oasis` (or the second
//! argument).  Set `RUST_LOG=debug` to watch individual camels.
//!
//! ```text
//! cargo run -p oasis -- [scenario.json] [output-dir]
//! ```

mod scenario;

use std::env::var;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{registry, EnvFilter};

use cv_output::{CsvWriter, StatisticsObserver};
use cv_sim::{RunOutcome, Scenario};

fn main() -> Result<()> {
    registry()
        .with(EnvFilter::builder().parse(format!(
            "oasis=info,cv_sim=info,cv_spatial=info,{}",
            var("RUST_LOG").unwrap_or_default()
        ))?)
        .with(layer())
        .init();

    let mut args = std::env::args().skip(1);
    let scenario: Scenario = match args.next() {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening scenario {path}"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing scenario {path}"))?
        }
        None => scenario::built_in()?,
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "output/oasis".into()));

    println!("=== oasis: rust_caravan logistics demo ===");
    println!(
        "Warehouses: {}  |  Oases: {}  |  Requests: {}  |  Seed: {}",
        scenario.warehouses.len(),
        scenario.oases.len(),
        scenario.requests.len(),
        scenario.config.seed,
    );

    // 1. Build.
    let mut sim = scenario.into_builder().build()?;
    println!(
        "Network: {} nodes, {} edges, strategy {}",
        sim.network.node_count(),
        sim.network.undirected_edge_count(),
        sim.dispatcher().strategy().kind(),
    );

    // 2. Output.
    std::fs::create_dir_all(&out_dir)?;
    let mut obs = StatisticsObserver::new(CsvWriter::new(&out_dir)?);

    // 3. Run.
    let t0 = Instant::now();
    let outcome = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    let summary = match outcome {
        Ok(RunOutcome::Finished(summary)) => summary,
        Ok(other) => {
            obs.flush(&sim.requests)?;
            anyhow::bail!("run stopped before every request completed: {other:?}");
        }
        Err(e) => {
            obs.flush(&sim.requests)?;
            return Err(e).context("simulation failed");
        }
    };
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    info!(elapsed_ms = elapsed.as_millis() as u64, "run complete");

    // 4. Summary.
    println!();
    println!("{summary}");
    let stats = obs.statistics();
    println!(
        "Total rest {:.1}  |  walked {:.1}",
        stats.total_rest(summary.time),
        stats.total_walked(),
    );
    println!();

    println!("{:<10} {:>8} {:>8} {:>8} {:>8}", "Warehouse", "Trips", "Sent", "Refills", "Stock");
    println!("{}", "-".repeat(46));
    for w in &sim.warehouses {
        let s = stats.warehouses.get(&w.id);
        println!(
            "{:<10} {:>8} {:>8} {:>8} {:>8}",
            w.id.0,
            s.map_or(0, |s| s.trips),
            w.total_dispatched,
            s.map_or(0, |s| s.refills.len()),
            w.baskets,
        );
    }
    println!();

    let types = sim.fleet.factory.types();
    for (kind, count) in summary.camels_by_type.iter().enumerate() {
        println!("{:<10} {count} camels", types[kind].name);
    }
    println!("Statistics written to {}", out_dir.display());

    Ok(())
}
