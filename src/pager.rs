/// Sequence guard for overlapping requests: responses to anything but the
/// most recently issued request are dropped.
#[derive(Debug, Default)]
pub struct LatestOnly {
    issued: u64,
}

impl LatestOnly {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub page: u32,
    /// Append to the current results instead of replacing them.
    pub append: bool,
}

/// What to do with a finished page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Replace,
    Append,
    Stale,
}

/// Infinite-scroll paging for the search page.
#[derive(Debug)]
pub struct Pager {
    seq: LatestOnly,
    page: u32,
    in_flight: bool,
    has_next: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self { seq: LatestOnly::default(), page: 0, in_flight: false, has_next: true }
    }
}

impl Pager {
    /// New query or filter change: page 1, superseding anything in flight.
    pub fn reset(&mut self) -> PageRequest {
        self.page = 1;
        self.in_flight = true;
        self.has_next = true;
        PageRequest { seq: self.seq.issue(), page: 1, append: false }
    }

    /// Next page for scrolling, unless one is loading or there is none.
    pub fn next(&mut self) -> Option<PageRequest> {
        if self.in_flight || !self.has_next {
            return None;
        }
        self.page += 1;
        self.in_flight = true;
        // Page 1 always replaces whatever is shown.
        let append = self.page > 1;
        Some(PageRequest { seq: self.seq.issue(), page: self.page, append })
    }

    pub fn complete(&mut self, req: PageRequest, has_next: bool) -> Outcome {
        if !self.seq.is_latest(req.seq) {
            return Outcome::Stale;
        }
        self.in_flight = false;
        self.has_next = has_next;
        if req.append { Outcome::Append } else { Outcome::Replace }
    }

    /// A failed request frees the pager so the same page is asked for again;
    /// after a failed first page the next scroll starts over from page 1.
    pub fn fail(&mut self, req: PageRequest) {
        if self.seq.is_latest(req.seq) {
            self.in_flight = false;
            self.page = req.page.saturating_sub(1);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }
}

/// True when the viewport bottom is within `threshold` px of the document end.
pub fn near_bottom(inner_height: f64, scroll_y: f64, body_height: f64, threshold: f64) -> bool {
    inner_height + scroll_y >= body_height - threshold
}
