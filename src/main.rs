use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde_json::Value;
use snel_rollup::engine::storage::MemoryBucketStore;
use snel_rollup::engine::types::{Event, KeyFields};
use snel_rollup::engine::{RollupEngine, RollupError};
use snel_rollup::engine::schema::RollupSchema;
use snel_rollup::logging;
use snel_rollup::shared::config::{CONFIG, Settings, load_settings_from};
use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Records JSON events read from stdin and prints their rollup as JSON.
#[derive(Parser)]
#[command(name = "snel_rollup", about)]
struct Args {
    /// Configuration file. Defaults to $SNEL_ROLLUP_CONFIG, then `config`.
    #[arg(short, long)]
    config: Option<String>,

    /// How far back the report reaches, e.g. `1h` or `7days`.
    #[arg(long, default_value = "1day", value_parser = humantime::parse_duration)]
    lookback: Duration,

    /// Key filter as `field=value`; repeatable. Values are parsed as JSON when possible.
    #[arg(short, long = "filter")]
    filters: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings: Arc<Settings> = match &args.config {
        Some(path) => Arc::new(
            load_settings_from(path).with_context(|| format!("loading config from {path}"))?,
        ),
        None => Arc::clone(&CONFIG),
    };
    logging::init(&settings.logging)?;

    let schema = RollupSchema::from_config(
        &settings.rollup,
        settings.time.clone().unwrap_or_default(),
    )?;
    if let Some(rejected) = schema.rejected_granularity() {
        warn!(
            requested = rejected,
            using = %schema.granularity(),
            "Configured granularity is not supported"
        );
    }
    let key_filter = parse_filters(&args.filters)?;

    let engine = RollupEngine::new(
        schema,
        Arc::new(MemoryBucketStore::new()),
        &settings.storage,
    );

    let (recorded, skipped) = record_stdin(&engine).await?;
    info!(recorded, skipped, "Finished reading events");

    let now = chrono::Utc::now();
    let start = now - chrono::Duration::from_std(args.lookback)?;
    let end = engine
        .schema()
        .bucketer()
        .resolve(now, engine.schema().granularity())
        .end;

    let report = engine.query(start, end, &key_filter).await.map_err(|e| {
        e.log_error();
        anyhow!(e)
    })?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn record_stdin(engine: &RollupEngine) -> Result<(usize, usize)> {
    let mut recorded = 0;
    let mut skipped = 0;

    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = match serde_json::from_str::<Value>(&line) {
            Ok(payload) => Event::new(payload),
            Err(err) => {
                warn!(line = index + 1, error = %err, "Skipping line that is not JSON");
                skipped += 1;
                continue;
            }
        };
        match engine.record(&event).await {
            Ok(_) => recorded += 1,
            Err(err @ RollupError::Validation(_)) => {
                err.log_error();
                skipped += 1;
            }
            Err(err) => {
                err.log_error();
                return Err(err.into());
            }
        }
    }

    Ok((recorded, skipped))
}

fn parse_filters(raw: &[String]) -> Result<KeyFields> {
    let mut filter = KeyFields::new();
    for item in raw {
        let (name, value) = item
            .split_once('=')
            .ok_or_else(|| anyhow!("filter '{item}' is not of the form field=value"))?;
        let value = serde_json::from_str::<Value>(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        filter.insert(name.trim(), value);
    }
    Ok(filter)
}
