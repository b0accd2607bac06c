//! Search results cursor
//!
//! The pager moves forward only and can rewind to the first record.

use super::fetcher::{HttpPageFetcher, PageFetcher};
use super::types::{PageResponse, PagerState, PagerStatus};
use crate::error::{Error, Result};
use crate::types::Record;
use futures::Stream;
use tracing::{debug, info, warn};

/// Lazily pages through a search result set.
///
/// Page 0 is fetched on construction. Later pages are fetched by
/// [`current`](Self::current) when the position runs past the loaded
/// records, and the position is rebased onto the new page so the logical
/// sequence continues without holes or repeats.
///
/// The pager holds only the current page. It is meant for a single owner;
/// every operation that may fetch takes `&mut self`, so fetches happen one
/// at a time and in ascending page order.
pub struct SearchResultsPager<F = HttpPageFetcher> {
    fetcher: F,
    state: PagerState,
    records: Vec<Record>,
    failed: bool,
}

impl<F: PageFetcher> SearchResultsPager<F> {
    /// Create a pager and load the first page
    pub async fn new(fetcher: F) -> Result<Self> {
        let mut pager = Self {
            fetcher,
            state: PagerState::new(),
            records: Vec::new(),
            failed: false,
        };
        pager.load_first_page().await?;
        Ok(pager)
    }

    /// Total number of records across all pages, 0 until known
    pub fn count(&self) -> u64 {
        self.state.total_records.unwrap_or(0)
    }

    /// Restart from the first record.
    ///
    /// Page 0 is fetched again and the totals are re-derived from it. If the
    /// fetch fails the pager keeps its previous position and page.
    pub async fn rewind(&mut self) -> Result<()> {
        self.load_first_page().await
    }

    /// Record at the current position, fetching following pages as needed
    pub async fn current(&mut self) -> Result<Option<&Record>> {
        if self.count() == 0 {
            return Ok(None);
        }

        while self.state.position >= self.records.len() {
            let Some(next) = self.state.next_page else {
                return Ok(None);
            };
            self.load_next_page(next).await?;
        }

        Ok(self.records.get(self.state.position))
    }

    /// Position within the loaded page (not a global index)
    pub fn key(&self) -> usize {
        self.state.position
    }

    /// Move to the next record; fetching is deferred to [`current`](Self::current)
    pub fn advance(&mut self) {
        self.state.position += 1;
    }

    /// True while the position holds a record or another page can be fetched
    pub fn valid(&self) -> bool {
        self.state.position < self.records.len() || self.state.next_page.is_some()
    }

    /// Records of the loaded page only
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Page number of the loaded page
    pub fn current_page(&self) -> u64 {
        self.state.current_page
    }

    /// Page that will be fetched next, if any
    pub fn next_page(&self) -> Option<u64> {
        self.state.next_page
    }

    /// Page count derived from the first response of this epoch
    pub fn total_pages(&self) -> u64 {
        self.state.total_pages.unwrap_or(0)
    }

    /// Snapshot of the cursor state
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// Where the pager is in its lifecycle; see [`PagerStatus`]
    pub fn status(&self) -> PagerStatus {
        if self.failed {
            PagerStatus::Failed
        } else if self.state.total_records.is_none() {
            PagerStatus::Fresh
        } else if self.valid() {
            PagerStatus::Loaded {
                page: self.state.current_page,
            }
        } else {
            PagerStatus::Exhausted
        }
    }

    /// Drain up to `limit` records from the current position
    pub async fn collect_records(&mut self, limit: Option<usize>) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        while limit.map_or(true, |limit| records.len() < limit) {
            let Some(record) = self.current().await?.cloned() else {
                break;
            };
            records.push(record);
            self.advance();
        }

        Ok(records)
    }

    /// Turn the pager into a lazy stream of records.
    ///
    /// The stream ends when the result set is exhausted, or after yielding
    /// the first fetch error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record>> {
        futures::stream::try_unfold(self, |mut pager| async move {
            let record = pager.current().await?.cloned();
            Ok::<_, Error>(record.map(|record| {
                pager.advance();
                (record, pager)
            }))
        })
    }

    async fn load_first_page(&mut self) -> Result<()> {
        let response = self.fetch(None).await?;

        let mut state = PagerState::new();
        state.apply(&response);
        info!(
            total_records = response.total_events,
            total_pages = state.total_pages.unwrap_or(0),
            "loaded first page of search results"
        );

        self.state = state;
        self.records = response.events;
        Ok(())
    }

    async fn load_next_page(&mut self, next: u64) -> Result<()> {
        let response = self.fetch(Some(next)).await?;

        if response.page <= self.state.current_page {
            warn!(
                requested = next,
                received = response.page,
                "events page did not advance"
            );
            self.failed = true;
            return Err(Error::invalid_response(format!(
                "requested page {next} but received page {}",
                response.page
            )));
        }

        let superseded = self.records.len();
        self.state.apply(&response);
        self.records = response.events;
        self.state.position -= superseded;

        debug!(
            page = self.state.current_page,
            records = self.records.len(),
            position = self.state.position,
            "crossed page boundary"
        );
        Ok(())
    }

    async fn fetch(&mut self, page: Option<u64>) -> Result<PageResponse> {
        match self.fetcher.fetch(page).await {
            Ok(response) => {
                self.failed = false;
                Ok(response)
            }
            Err(e) => {
                warn!(page = page.unwrap_or(0), error = %e, "page fetch failed");
                self.failed = true;
                Err(e)
            }
        }
    }
}

impl<F> std::fmt::Debug for SearchResultsPager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResultsPager")
            .field("state", &self.state)
            .field("loaded_records", &self.records.len())
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
