//! Harvest flow: sheet iteration, seller URL resolution, and delivery
//!
//! Data moves one direction through this module: sheet identifier →
//! resolved seller URL → scraped records → remote sink. Nothing is read
//! back from the sink within a run.

mod coordinator;
mod dispatcher;
mod resolver;

pub use coordinator::{Coordinator, RunSummary, SheetOutcome, SheetReport};
pub use dispatcher::{dispatch, serialize_rows, DeliveryReport, ROW_WIDTH};
pub use resolver::{parse_seller_response, resolve_seller_url};

use crate::config::Config;
use crate::Result;

/// Runs a complete harvest over every configured sheet
///
/// This is the batch entry point: it builds the production coordinator,
/// walks the sheet list in order, and returns the collected per-sheet
/// outcomes. Per-sheet failures are recorded in the summary, never
/// propagated as errors.
pub async fn run_harvest(config: Config) -> Result<RunSummary> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
