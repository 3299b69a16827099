use anyhow::{Context, Result};
use clap::Args;

use crate::cli::app::PageArgs;
use crate::store::MemoryStore;
use crate::tracker::Tracker;

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ResolveArgs) -> Result<()> {
    let page = args.page.page_context()?;
    let tracker = Tracker::new(MemoryStore::new(), page);
    let tuple = tracker.resolve_current_attribution();

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&tuple).context("failed to serialize attribution")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("utm_source: {}", tuple.utm_source);
    println!("utm_medium: {}", tuple.utm_medium);
    println!("utm_campaign: {}", tuple.utm_campaign);
    println!("utm_term: {}", tuple.utm_term);
    println!("utm_content: {}", tuple.utm_content);
    Ok(())
}
