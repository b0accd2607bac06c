//! Pager types
//!
//! The wire envelope of one events page and the cursor state kept between
//! fetches.

use crate::types::Record;
use serde::{Deserialize, Serialize};

/// Fixed number of events the server returns per page
pub const PAGE_SIZE: u64 = 50;

/// Number of pages implied by a total record count.
///
/// This is plain floor division. For totals that are not a multiple of
/// [`PAGE_SIZE`] the last, partial page sits at index `page_count_for(total)`
/// and is still fetched, because continuation is tested with `page < count`.
pub fn page_count_for(total_records: u64) -> u64 {
    total_records / PAGE_SIZE
}

/// One page of the events endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Total number of events in the whole result set, as reported.
    ///
    /// Signed on the wire; anything below 1 means an empty result set.
    pub total_events: i64,
    /// Page number this response represents
    pub page: u64,
    /// Events on this page, in server order
    pub events: Vec<Record>,
}

impl PageResponse {
    /// Create a page response
    pub fn new(total_events: i64, page: u64, events: Vec<Record>) -> Self {
        Self {
            total_events,
            page,
            events,
        }
    }
}

/// Mutable cursor state of a pager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerState {
    /// Offset into the currently loaded page
    pub position: usize,
    /// Page number of the loaded page
    pub current_page: u64,
    /// Page to fetch next, `None` once the last page is loaded
    pub next_page: Option<u64>,
    /// Total records, frozen at the first fetch of an epoch
    pub total_records: Option<u64>,
    /// Total pages, derived together with `total_records`
    pub total_pages: Option<u64>,
}

impl PagerState {
    /// Create a fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a page response into the state.
    ///
    /// Totals are only taken from the first response of the epoch. A
    /// negative reported total counts as zero.
    pub fn apply(&mut self, response: &PageResponse) {
        if self.total_records.is_none() {
            let total = u64::try_from(response.total_events).unwrap_or(0);
            self.total_records = Some(total);
            self.total_pages = Some(page_count_for(total));
        }

        self.current_page = response.page;
        self.next_page = match self.total_pages {
            Some(total_pages) if self.current_page < total_pages => Some(self.current_page + 1),
            _ => None,
        };
    }
}

/// Lifecycle of a pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStatus {
    /// Nothing loaded yet
    Fresh,
    /// A page is loaded and more records may follow
    Loaded {
        /// The loaded page
        page: u64,
    },
    /// No record at the position and no further page
    Exhausted,
    /// The most recent fetch failed; the previous state is intact
    Failed,
}
