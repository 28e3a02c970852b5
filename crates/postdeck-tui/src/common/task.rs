//! View-load lifecycle tracking.
//!
//! Every data region (upcoming posts, summaries, best times, accounts)
//! gets a `LoadSlot`. Starting a load stamps the slot with a fresh
//! monotonically increasing `LoadId`; a completion is only applied when
//! its id is still the slot's active id. Rapid navigation therefore never
//! paints stale responses — the latest request wins.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

#[derive(Debug, Default)]
pub struct LoadSeq {
    next: u64,
}

impl LoadSeq {
    pub fn next_id(&mut self) -> LoadId {
        let id = LoadId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Load lifecycle state for one data region (mutated only by the reducer).
#[derive(Debug, Default)]
pub struct LoadSlot {
    active: Option<LoadId>,
}

impl LoadSlot {
    pub fn begin(&mut self, id: LoadId) {
        self.active = Some(id);
    }

    pub fn is_loading(&self) -> bool {
        self.active.is_some()
    }

    /// Marks the slot finished if `id` is still the active load.
    ///
    /// Returns false for stale completions, which callers must discard.
    pub fn finish_if_active(&mut self, id: LoadId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// One slot per data region.
#[derive(Debug, Default)]
pub struct Loads {
    pub posts: LoadSlot,
    pub dashboard_summary: LoadSlot,
    pub analytics_summary: LoadSlot,
    pub best_times: LoadSlot,
    pub accounts: LoadSlot,
}

impl Loads {
    pub fn is_any_loading(&self) -> bool {
        self.posts.is_loading()
            || self.dashboard_summary.is_loading()
            || self.analytics_summary.is_loading()
            || self.best_times.is_loading()
            || self.accounts.is_loading()
    }

    pub fn clear_all(&mut self) {
        self.posts.clear();
        self.dashboard_summary.clear();
        self.analytics_summary.clear();
        self.best_times.clear();
        self.accounts.clear();
    }
}
