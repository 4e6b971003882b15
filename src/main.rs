//! CLI entry point for the Kraken strategy optimizer

use clap::{Parser, ValueEnum};
use kraken_sim_lib::{config::AnalysisConfig, simulation::run_analysis};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "kraken-sim")]
#[command(version = "1.0")]
#[command(about = "Attack-order optimizer for the Mechanical Kraken encounter", long_about = None)]
struct Args {
    /// Path to the encounter configuration file (YAML or JSON).
    /// Omit to analyze the stock kraken encounter.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of simulated battles per attack order
    #[arg(short, long)]
    num_sims: Option<usize>,

    /// Override the ammo budget used for the win-rate column
    #[arg(short, long)]
    ammo_budget: Option<u32>,

    /// Override how many ranked strategies to show
    #[arg(long)]
    top: Option<usize>,

    /// Use parallel processing
    #[arg(short, long, default_value = "false")]
    parallel: bool,

    /// Fixed RNG seed for a reproducible (sequential) run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Report enumeration progress on stderr
    #[arg(long, default_value = "false")]
    progress: bool,

    /// Show timing information
    #[arg(short, long, default_value = "false")]
    timing: bool,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match AnalysisConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => AnalysisConfig::default_kraken(),
    };

    if let Some(n) = args.num_sims {
        config.run_count = n;
    }
    if let Some(budget) = args.ammo_budget {
        config.ammo_budget = budget;
    }
    if let Some(top) = args.top {
        config.top_n = top;
    }

    let report = |done: usize, total: usize| {
        if done % 10 == 0 || done == total {
            eprint!("\rSimulating... {}/{} orders", done, total);
            if done == total {
                eprintln!();
            }
        }
    };
    let progress = if args.progress {
        Some(&report as &(dyn Fn(usize, usize) + Sync))
    } else {
        None
    };

    let start = Instant::now();
    let rows = match run_analysis(&config, args.parallel, args.seed, progress) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    match args.output {
        OutputFormat::Text => {
            println!("=== Kraken Strategy Results ===");
            println!(
                "Parts: {} | Runs per order: {} | Ammo budget: {}",
                config.parts.len(),
                config.run_count,
                config.ammo_budget
            );
            println!();
            println!(
                "{:<4} {:<55} {:>8} {:>8} {:>8} {:>10} {:>9}",
                "#", "Strategy Path", "Median", "Avg", "Std", "95th Pctl", "Win %"
            );
            for (i, row) in rows.iter().enumerate() {
                println!(
                    "{:<4} {:<55} {:>8.1} {:>8.2} {:>8.2} {:>10} {:>8.1}%",
                    i + 1,
                    row.path.join(" -> "),
                    row.median_hits,
                    row.avg_hits,
                    row.std_dev_hits,
                    row.p95_hits,
                    row.win_rate
                );
            }

            if args.timing {
                let total_orders: usize = (1..=config.parts.len()).product();
                println!();
                println!("--- Performance ---");
                println!("Total time: {:.3}s", elapsed.as_secs_f64());
                println!(
                    "Per order: {:.3}ms",
                    elapsed.as_secs_f64() * 1000.0 / total_orders.max(1) as f64
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "run_count": config.run_count,
                "ammo_budget": config.ammo_budget,
                "parallel": args.parallel,
                "elapsed_seconds": elapsed.as_secs_f64(),
                "strategies": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        }
    }
}
