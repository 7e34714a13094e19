use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;

/// A page fetch issued by the pager. `ticket` identifies the request
/// generation; only the response carrying the in-flight ticket is applied.
/// `limit` is the page size the request was made with.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub ticket: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The end-reached report was too far from the end, or not a number.
    BelowThreshold,
    InitialLoadPending,
    InFlight,
    Exhausted,
}

/// Incremental pagination over the unfiltered plant list.
///
/// The page size is fixed when a session starts. Offset paging with a
/// different `_limit` on later pages would skip or repeat rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pager {
    page_size: u32,
    current_page: u32,
    in_flight: Option<PageRequest>,
    tickets_issued: u64,
    initial_loading: bool,
    exhausted: bool,
    failed: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            in_flight: None,
            tickets_issued: 0,
            initial_loading: false,
            exhausted: false,
            failed: false,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page 1 is outstanding, either from mount or after it failed.
    #[must_use]
    pub const fn is_initial_loading(&self) -> bool {
        self.initial_loading
    }

    /// A fetch-more page is outstanding.
    #[must_use]
    pub const fn is_page_loading(&self) -> bool {
        self.in_flight.is_some() && !self.initial_loading
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    #[must_use]
    pub fn is_in_flight(&self, request: PageRequest) -> bool {
        self.in_flight == Some(request)
    }

    /// Resets to page 1 with `page_size` rows per page and issues the
    /// initial fetch.
    pub fn start(&mut self, page_size: u32) -> PageRequest {
        let tickets_issued = self.tickets_issued;
        *self = Self {
            page_size,
            tickets_issued,
            ..Self::new()
        };
        self.issue(1)
    }

    /// Handles an end-reached report from the grid.
    ///
    /// Advances to the next page unless the previous page failed, in which
    /// case that same page is requested again.
    pub fn request_next(
        &mut self,
        distance_from_end: f64,
        min_distance: f64,
    ) -> Result<PageRequest, SkipReason> {
        if !distance_from_end.is_finite() || distance_from_end < min_distance {
            return Err(SkipReason::BelowThreshold);
        }
        if self.initial_loading {
            return Err(SkipReason::InitialLoadPending);
        }
        if self.in_flight.is_some() {
            return Err(SkipReason::InFlight);
        }
        if self.exhausted {
            return Err(SkipReason::Exhausted);
        }

        if !self.failed {
            self.current_page += 1;
        }
        Ok(self.issue(self.current_page))
    }

    /// Re-issues the page that last failed. Returns `None` if nothing failed
    /// or a request is already outstanding.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if !self.failed || self.in_flight.is_some() {
            return None;
        }
        Some(self.issue(self.current_page))
    }

    /// Records a successful response with `rows` items. A page shorter than
    /// the request's limit, including an empty one, ends the list.
    pub fn complete(&mut self, request: PageRequest, rows: usize) {
        if !self.is_in_flight(request) {
            return;
        }
        self.in_flight = None;
        self.initial_loading = false;
        self.failed = false;
        if rows < request.limit as usize {
            self.exhausted = true;
        }
    }

    pub fn fail(&mut self, request: PageRequest) {
        if !self.is_in_flight(request) {
            return;
        }
        self.in_flight = None;
        self.initial_loading = false;
        self.failed = true;
    }

    /// Forgets any outstanding request; its response will be treated as stale.
    pub fn cancel(&mut self) {
        self.in_flight = None;
        self.initial_loading = false;
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.tickets_issued += 1;
        let request = PageRequest {
            page,
            limit: self.page_size,
            ticket: self.tickets_issued,
        };
        self.in_flight = Some(request);
        self.initial_loading = page == 1;
        request
    }
}
