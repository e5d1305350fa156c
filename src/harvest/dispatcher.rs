//! Record delivery to the external spreadsheet-backed service
//!
//! Each sheet gets one write request carrying the full row set, followed
//! unconditionally by one deduplication trigger. The service's raw
//! acknowledgment bodies are surfaced through logging and the returned
//! report; they are never parsed for a status field.

use crate::config::ServiceConfig;
use crate::record::ListingRecord;
use crate::Result;
use reqwest::Client;
use serde::Serialize;

/// Number of columns in a serialized sink row
pub const ROW_WIDTH: usize = 7;

/// JSON body of the write request
#[derive(Serialize)]
struct WritePayload<'a> {
    #[serde(rename = "sheetName")]
    sheet_name: &'a str,
    items: &'a [[String; ROW_WIDTH]],
}

/// What happened during one sheet's delivery
#[derive(Debug, Clone)]
pub struct DeliveryReport {
    /// Number of rows included in the write request
    pub rows_sent: usize,

    /// Raw acknowledgment body from the write endpoint
    pub write_ack: String,

    /// Raw result body from the deduplication trigger
    pub dedup_ack: String,
}

/// Serializes records into fixed 7-column positional rows
///
/// Columns 4 through 6 are intentionally blank placeholders reserved for
/// the external service to populate; this component never writes them.
pub fn serialize_rows(records: &[ListingRecord]) -> Vec<[String; ROW_WIDTH]> {
    records
        .iter()
        .map(|record| {
            [
                record.start_date.clone(),
                record.title.clone(),
                record.price.clone(),
                String::new(),
                String::new(),
                String::new(),
                record.url.clone(),
            ]
        })
        .collect()
}

/// Delivers one sheet's records and triggers the dedup pass
///
/// The write response is not inspected for success; the deduplication
/// trigger always fires after an attempted write. A transport failure on
/// either step propagates to the caller, so partial delivery (write sent,
/// dedup not triggered) is possible and is not reconciled here.
pub async fn dispatch(
    client: &Client,
    service: &ServiceConfig,
    sheet: &str,
    records: &[ListingRecord],
) -> Result<DeliveryReport> {
    let rows = serialize_rows(records);
    let payload = WritePayload {
        sheet_name: sheet,
        items: &rows,
    };

    tracing::info!("Posting {} rows to sheet {}...", rows.len(), sheet);
    let write_ack = client
        .post(&service.write_url)
        .json(&payload)
        .send()
        .await?
        .text()
        .await?;
    tracing::info!("Sheet {} updated: {}", sheet, write_ack);

    tracing::info!("Triggering deduplication for sheet {}...", sheet);
    let dedup_ack = client
        .get(&service.read_url)
        .query(&[("sheetName", sheet), ("action", "removeDuplicates")])
        .send()
        .await?
        .text()
        .await?;
    tracing::info!("Deduplication result for sheet {}: {}", sheet, dedup_ack);

    Ok(DeliveryReport {
        rows_sent: rows.len(),
        write_ack,
        dedup_ack,
    })
}
