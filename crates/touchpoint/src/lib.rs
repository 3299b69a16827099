#![forbid(unsafe_code)]

pub mod attribution;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;
pub mod tracker;
pub mod utils;

pub use attribution::{QueryParams, resolve_attribution};
pub use cli::app::{Cli, Command};
pub use error::TrackerError;
pub use models::{AttributionTuple, VisitLedger, VisitRecord};
pub use tracker::{PageContext, Tracker};
