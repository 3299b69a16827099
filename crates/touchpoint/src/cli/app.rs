use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::commands::{
    record::RecordArgs, resolve::ResolveArgs, schema::SchemaArgs, show::ShowArgs,
};
use crate::config::{DEFAULT_STORAGE_KEY, DEFAULT_TTL_DAYS, TrackerConfig};
use crate::store::SameSite;
use crate::tracker::PageContext;

#[derive(Debug, Parser)]
#[command(name = "touchpoint", version, about = "First and last visit traffic attribution")]
pub struct Cli {
    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct RuntimeArgs {
    #[arg(long, global = true, value_name = "PATH")]
    pub home_dir: Option<PathBuf>,

    #[arg(long, global = true, value_name = "PATH")]
    pub cwd: Option<PathBuf>,

    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Resolve(ResolveArgs),
    Record(RecordArgs),
    Show(ShowArgs),
    Schema(SchemaArgs),
}

/// Page view as seen by the browser adapter.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Full page URL; supplies hostname and query unless those are given.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    #[arg(long, value_name = "HOST")]
    pub hostname: Option<String>,

    #[arg(long, default_value = "")]
    pub referrer: String,
}

impl PageArgs {
    pub fn page_context(&self) -> Result<PageContext> {
        let mut page = match &self.url {
            Some(url) => PageContext::from_page_url(url, self.referrer.clone())?,
            None => PageContext::new("", "", self.referrer.clone()),
        };
        if let Some(query) = &self.query {
            page.query = query.clone();
        }
        if let Some(hostname) = &self.hostname {
            page.hostname = hostname.clone();
        }
        Ok(page)
    }
}

#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    #[arg(long, default_value_t = DEFAULT_TTL_DAYS)]
    pub ttl_days: u32,

    #[arg(long, value_enum, default_value_t = SameSite::Lax)]
    pub same_site: SameSite,
}

impl StorageArgs {
    pub fn tracker_config(&self) -> Result<TrackerConfig> {
        let config = TrackerConfig {
            storage_key: self.storage_key.clone(),
            ttl_days: self.ttl_days,
            same_site: self.same_site,
            ..TrackerConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
