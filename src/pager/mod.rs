//! Search result pager
//!
//! Walks a paginated events result set as one forward-only sequence.
//!
//! # Overview
//!
//! A [`PageFetcher`] loads one page at a time. [`SearchResultsPager`] owns
//! the cursor: it loads page 0 on construction, records the totals from
//! that first response, and fetches the following pages lazily when the
//! position runs past the records currently held.

mod cursor;
mod fetcher;
mod types;

pub use cursor::SearchResultsPager;
pub use fetcher::{fetcher_fn, FnFetcher, HttpPageFetcher, PageFetcher, QueryTarget};
pub use types::{page_count_for, PageResponse, PagerState, PagerStatus, PAGE_SIZE};
