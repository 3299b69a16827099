use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{DEFAULT_STORAGE_KEY, RuntimePaths};
use crate::ledger::read_ledger;
use crate::store::{SqliteStore, VisitStore};

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    /// Print the stored payload as-is, without repair.
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

pub fn run(args: &ShowArgs, runtime_paths: &RuntimePaths) -> Result<()> {
    let store = SqliteStore::open(&runtime_paths.store_path)?;
    let purged = store.purge_expired()?;
    debug!(purged, "purged expired store rows");
    let raw = store.get(&args.storage_key)?;

    if args.raw {
        println!("{}", raw.as_deref().unwrap_or_default());
        return Ok(());
    }

    let ledger = read_ledger(raw.as_deref());
    let rendered =
        serde_json::to_string_pretty(&ledger).context("failed to serialize visit ledger")?;
    println!("{rendered}");
    Ok(())
}
