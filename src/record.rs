//! The normalized listing record produced by extraction

/// One scraped listing item, normalized for delivery to the sink.
///
/// Records are held only in memory for the duration of one sheet's
/// processing; ownership transfers to the external service on delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    /// Listing start time in `MM/dd HH:mm` form, or `"N/A"` if the raw
    /// timestamp text did not match the expected pattern
    pub start_date: String,

    /// Listing title, trimmed, with any "new listing" badge removed
    pub title: String,

    /// Price in the site's display format, or `"N/A"` if absent
    pub price: String,

    /// Absolute URL to the listing detail page
    pub url: String,
}

impl ListingRecord {
    /// Sentinel used when a price or timestamp cannot be extracted
    pub const NOT_AVAILABLE: &'static str = "N/A";
}
