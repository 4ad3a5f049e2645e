//! Paginated fetch of the full stock report
//!
//! The loop issues one request at a time and stops on the first of:
//!
//! 1. a failed request (records gathered so far are kept)
//! 2. an empty page
//! 3. a short page (fewer rows than requested)
//! 4. the next offset passing `max_offset`
//!
//! Termination relies on the API reporting the last page as short, with the
//! offset bound as the backstop for a server that keeps returning full pages.
//! With the defaults (1000 rows, 50 000 offset) that is at most 51 requests,
//! so catalogs with more SKU/warehouse rows than that are cut off.

use crate::api::StockSource;
use crate::config::{DEFAULT_MAX_OFFSET, DEFAULT_PAGE_SIZE};
use crate::error::FetchError;
use ozon_stock_common::normalize::normalize;
use ozon_stock_common::{CanonicalRecord, Credentials};
use std::num::NonZeroU32;
use tracing::{info, warn};

/// Page size and offset bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    page_size: NonZeroU32,
    max_offset: u64,
}

impl PaginationConfig {
    pub fn new(page_size: NonZeroU32, max_offset: u64) -> Self {
        Self {
            page_size,
            max_offset,
        }
    }

    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    pub fn max_offset(&self) -> u64 {
        self.max_offset
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            max_offset: DEFAULT_MAX_OFFSET,
        }
    }
}

/// Why the loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The server returned no rows
    EmptyPage,
    /// Fewer rows than requested, i.e. the last page
    ShortPage,
    /// The offset bound was reached while pages were still full
    OffsetLimit { next_offset: u64 },
    /// A request failed
    Failed(FetchError),
}

/// Progress after each non-empty page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    pub page: usize,
    pub offset: u64,
    pub rows: usize,
    pub total: usize,
}

/// Records of one run plus how the run ended
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSession {
    pub records: Vec<CanonicalRecord>,
    /// Number of requests issued, including a failed one
    pub requests: usize,
    pub stop: StopReason,
}

impl FetchSession {
    /// The failure that ended pagination, if any
    pub fn failure(&self) -> Option<&FetchError> {
        match &self.stop {
            StopReason::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// True when the data ran out rather than the loop being cut short
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::EmptyPage | StopReason::ShortPage)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetch and normalize every page
pub async fn fetch_all<S>(source: &S, credentials: &Credentials, config: &PaginationConfig) -> FetchSession
where
    S: StockSource + ?Sized,
{
    fetch_all_with(source, credentials, config, |_| {}).await
}

/// Same as [`fetch_all`], calling `on_page` after each non-empty page
pub async fn fetch_all_with<S, F>(
    source: &S,
    credentials: &Credentials,
    config: &PaginationConfig,
    mut on_page: F,
) -> FetchSession
where
    S: StockSource + ?Sized,
    F: FnMut(PageProgress),
{
    let limit = config.page_size.get();
    let mut offset: u64 = 0;
    let mut records: Vec<CanonicalRecord> = Vec::new();
    let mut requests = 0usize;

    let stop = loop {
        requests += 1;

        let rows = match source.fetch_page(credentials, limit, offset).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, offset, kept = records.len(), "Stock page request failed");
                break StopReason::Failed(err);
            }
        };

        if rows.is_empty() {
            info!(offset, "No more stock rows");
            break StopReason::EmptyPage;
        }

        let count = rows.len();
        records.extend(rows.iter().map(normalize));
        info!(page = requests, offset, rows = count, total = records.len(), "Stock page fetched");
        on_page(PageProgress {
            page: requests,
            offset,
            rows: count,
            total: records.len(),
        });

        if count < limit as usize {
            break StopReason::ShortPage;
        }

        offset += u64::from(limit);
        if offset > config.max_offset {
            warn!(next_offset = offset, max_offset = config.max_offset, "Offset limit reached, stopping");
            break StopReason::OffsetLimit { next_offset: offset };
        }
    };

    FetchSession {
        records,
        requests,
        stop,
    }
}
