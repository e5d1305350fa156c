//! Harvest coordinator - per-run orchestration over the sheet list
//!
//! Walks the fixed ordered list of sheet identifiers, processing each to
//! completion before advancing. A failure on one sheet is recorded in the
//! run summary and never halts the sequence.

use crate::config::Config;
use crate::harvest::dispatcher::dispatch;
use crate::harvest::resolver::resolve_seller_url;
use crate::scrape::{build_http_client, scrape_seller, HttpFetcher, PageFetcher};
use crate::Result;
use reqwest::Client;

/// Terminal outcome of one sheet's processing
#[derive(Debug, Clone)]
pub enum SheetOutcome {
    /// Records were scraped and the write plus dedup requests were sent
    Delivered {
        rows: usize,
        write_ack: String,
        dedup_ack: String,
    },

    /// The seller URL could not be resolved; no scrape was attempted
    ResolutionFailed,

    /// Navigation or extraction failed; no dispatch was attempted
    ScrapeFailed { message: String },

    /// The write or dedup request failed; delivery may be partial
    DispatchFailed { message: String },
}

impl SheetOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SheetOutcome::Delivered { .. })
    }
}

/// One sheet's identifier paired with its outcome
#[derive(Debug, Clone)]
pub struct SheetReport {
    pub sheet: String,
    pub outcome: SheetOutcome,
}

/// Collected outcomes for a whole run, in sheet-list order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<SheetReport>,
}

impl RunSummary {
    /// Number of sheets whose records were delivered
    pub fn delivered(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.is_delivered())
            .count()
    }

    /// Number of sheets that were skipped or failed
    pub fn failed(&self) -> usize {
        self.reports.len() - self.delivered()
    }

    /// Total rows sent across all delivered sheets
    pub fn total_rows(&self) -> usize {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                SheetOutcome::Delivered { rows, .. } => Some(rows),
                _ => None,
            })
            .sum()
    }
}

/// Main harvest coordinator
///
/// Owns the HTTP client used for service calls and the page-fetch
/// capability used by the scrape loop. All I/O is awaited in strict
/// sequence; sheets never run concurrently.
pub struct Coordinator<F: PageFetcher> {
    config: Config,
    client: Client,
    fetcher: F,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator with the production HTTP-backed fetcher
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.scrape)?;
        let fetcher = HttpFetcher::new(client.clone());
        Ok(Self {
            config,
            client,
            fetcher,
        })
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator with an injected page fetcher
    pub fn with_fetcher(config: Config, client: Client, fetcher: F) -> Self {
        Self {
            config,
            client,
            fetcher,
        }
    }

    /// Processes every configured sheet in listed order
    ///
    /// Errors raised by any step for a sheet are caught, logged with the
    /// offending identifier, and recorded as that sheet's outcome; the
    /// walk then continues with the next sheet.
    pub async fn run(&self) -> RunSummary {
        tracing::info!("Processing {} sheets...", self.config.sheets.len());

        let mut summary = RunSummary::default();

        for sheet in &self.config.sheets {
            tracing::info!("Processing sheet: {}", sheet);

            let outcome = self.process_sheet(sheet).await;
            match &outcome {
                SheetOutcome::Delivered { rows, .. } => {
                    tracing::info!("Sheet {} delivered ({} rows)", sheet, rows);
                }
                SheetOutcome::ResolutionFailed => {
                    tracing::warn!("Seller URL for {} not retrieved. Skipping.", sheet);
                }
                SheetOutcome::ScrapeFailed { message } => {
                    tracing::error!("Error processing sheet {}: {}", sheet, message);
                }
                SheetOutcome::DispatchFailed { message } => {
                    tracing::error!("Error processing sheet {}: {}", sheet, message);
                }
            }

            summary.reports.push(SheetReport {
                sheet: sheet.clone(),
                outcome,
            });
        }

        tracing::info!("All sheets processed.");
        summary
    }

    /// Resolves, scrapes, and dispatches one sheet
    async fn process_sheet(&self, sheet: &str) -> SheetOutcome {
        let Some(seller_url) =
            resolve_seller_url(&self.client, &self.config.service, sheet).await
        else {
            return SheetOutcome::ResolutionFailed;
        };

        tracing::info!("Seller URL for {}: {}", sheet, seller_url);

        let records = match scrape_seller(&self.fetcher, &seller_url).await {
            Ok(records) => records,
            Err(e) => {
                return SheetOutcome::ScrapeFailed {
                    message: e.to_string(),
                }
            }
        };

        tracing::info!("Scraped {} items for {}.", records.len(), sheet);

        match dispatch(&self.client, &self.config.service, sheet, &records).await {
            Ok(report) => SheetOutcome::Delivered {
                rows: report.rows_sent,
                write_ack: report.write_ack,
                dedup_ack: report.dedup_ack,
            },
            Err(e) => SheetOutcome::DispatchFailed {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivered(sheet: &str, rows: usize) -> SheetReport {
        SheetReport {
            sheet: sheet.to_string(),
            outcome: SheetOutcome::Delivered {
                rows,
                write_ack: "OK".to_string(),
                dedup_ack: "0 new rows".to_string(),
            },
        }
    }

    fn skipped(sheet: &str) -> SheetReport {
        SheetReport {
            sheet: sheet.to_string(),
            outcome: SheetOutcome::ResolutionFailed,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            reports: vec![delivered("B11", 8), skipped("B12"), delivered("B13", 3)],
        };

        assert_eq!(summary.delivered(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.total_rows(), 11);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::default();
        assert_eq!(summary.delivered(), 0);
        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.total_rows(), 0);
    }

    #[test]
    fn test_outcome_is_delivered() {
        assert!(delivered("B11", 1).outcome.is_delivered());
        assert!(!skipped("B11").outcome.is_delivered());
        assert!(!SheetOutcome::ScrapeFailed {
            message: "x".to_string()
        }
        .is_delivered());
    }
}
