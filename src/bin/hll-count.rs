use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hll_estimator::{compare, Counter, FieldFeed, DEFAULT_PRECISION};
use tabled::settings::{Settings, Style};
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Count distinct values of one field across a newline-delimited JSON log
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Log file to read, `-` or absent for stdin
    input: Option<PathBuf>,

    /// Record field holding the item to count
    #[arg(short, long, env = "HLL_FIELD", default_value = "remote_addr")]
    field: String,

    /// Number of hash bits used for register index (4..=18)
    #[arg(short, long, env = "HLL_PRECISION", default_value_t = DEFAULT_PRECISION)]
    precision: u8,

    /// Also count distinct items exactly and report both
    #[arg(long)]
    exact: bool,
}

#[derive(Tabled)]
struct Row {
    method: &'static str,
    distinct: String,
    seconds: String,
}

fn open(input: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut counters = vec![Counter::approx(args.precision).context("invalid --precision")?];
    if args.exact {
        counters.insert(0, Counter::exact());
    }

    let mut feed = FieldFeed::new(open(args.input.as_ref())?, args.field.as_str());
    let items = feed
        .by_ref()
        .collect::<io::Result<Vec<String>>>()
        .context("failed to read input")?;
    let stats = feed.stats();
    info!(
        records = stats.records,
        items = stats.items,
        skipped = stats.skipped,
        "input loaded"
    );

    let rows: Vec<Row> = compare(&items, counters)
        .into_iter()
        .map(|m| Row {
            method: m.name,
            distinct: format!("{:.0}", m.count),
            seconds: format!("{:.4}", m.elapsed.as_secs_f64()),
        })
        .collect();

    let table_config = Settings::default().with(Style::markdown());
    println!("{}", Table::new(rows).with(table_config));
    println!(
        "records: {}, items: {}, skipped: {}",
        stats.records, stats.items, stats.skipped
    );

    Ok(())
}
