use anyhow::{Context, Result};
use clap::Args;

use crate::cli::app::{PageArgs, StorageArgs};
use crate::config::RuntimePaths;
use crate::ledger::encode_ledger;
use crate::store::{SqliteStore, render_cookie};
use crate::tracker::Tracker;
use crate::utils::time::{Clock, ManualClock, SystemClock, parse_timestamp_to_unix_ms};

#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    /// Visit time as RFC 3339 or unix epoch; defaults to the system clock.
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Also print the cookie assignment a browser adapter would perform.
    #[arg(long, default_value_t = false)]
    pub cookie: bool,
}

pub fn run(args: &RecordArgs, runtime_paths: &RuntimePaths) -> Result<()> {
    match &args.now {
        Some(raw) => {
            let now_unix_ms = parse_timestamp_to_unix_ms(raw)
                .with_context(|| format!("invalid --now value: {raw}"))?;
            record_with_clock(args, runtime_paths, ManualClock::at(now_unix_ms))
        }
        None => record_with_clock(args, runtime_paths, SystemClock),
    }
}

fn record_with_clock<C: Clock + Clone>(
    args: &RecordArgs,
    runtime_paths: &RuntimePaths,
    clock: C,
) -> Result<()> {
    let config = args.storage.tracker_config()?;
    let page = args.page.page_context()?;
    let store = SqliteStore::open_with_clock(&runtime_paths.store_path, clock.clone())?;
    eprintln!(
        "record: start hostname={} referrer={} store={}",
        page.hostname,
        if page.referrer.is_empty() { "<none>" } else { page.referrer.as_str() },
        runtime_paths.store_path.display()
    );

    let mut tracker = Tracker::new(store, page)
        .with_clock(clock.clone())
        .with_config(config.clone());
    let ledger = tracker.record_visit();
    let payload = encode_ledger(&ledger).context("failed to serialize visit ledger")?;

    if args.cookie {
        println!(
            "{}",
            render_cookie(
                &config.storage_key,
                &payload,
                config.ttl_days,
                clock.now_unix_ms(),
                &config.cookie_path,
                config.same_site,
            )
        );
    } else {
        println!("{payload}");
    }

    eprintln!(
        "record: complete first_visit={} second_visit={}",
        ledger.first_visit.is_some(),
        ledger.second_visit.is_some()
    );
    Ok(())
}
