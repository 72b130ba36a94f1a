use common::PagerError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::group::PagerId;

/// Items per page when the host supplies no explicit size.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Version tag of the snapshot encoding; bump on layout changes.
const SNAPSHOT_VERSION: u32 = 1;

/// Total number of pages for `count` items at `page_size` per page.
/// Zero items means zero pages.
pub fn compute_page_count(count: u64, page_size: u64) -> Result<u64, PagerError> {
    if page_size == 0 {
        return Err(PagerError::invalid("page size must be >= 1"));
    }
    Ok((count + page_size - 1) / page_size)
}

/// Outcome of a goto-page request. Out-of-range requests are suppressed by
/// policy, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GotoOutcome {
    Accepted { page_index: u64 },
    Ignored,
}

/// Pagination state for one request.
///
/// Seeded from a [`PagerSnapshot`] (or defaults), optionally mutated once by
/// an incoming navigation request during initialization, then read-only
/// while the navigation window is rendered. The instance does not survive
/// past the request boundary.
#[derive(Debug, Clone)]
pub struct Pager {
    count: u64,
    page_size: u64,
    current_page_index: u64,
    use_postback: bool,
    linked_to: Option<PagerId>,
    // set once an in-process navigation was accepted; a later read of the
    // external page parameter must not clobber it
    ignore_page_param: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            count: 0,
            page_size: DEFAULT_PAGE_SIZE,
            current_page_index: 0,
            use_postback: true,
            linked_to: None,
            ignore_page_param: false,
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn set_count(&mut self, count: u64) {
        self.count = count;
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Items per page; a zero size is rejected rather than defaulted.
    pub fn set_page_size(&mut self, page_size: u64) -> Result<(), PagerError> {
        if page_size == 0 {
            return Err(PagerError::invalid("page size must be >= 1"));
        }
        self.page_size = page_size;
        Ok(())
    }

    pub fn current_page_index(&self) -> u64 {
        self.current_page_index
    }

    /// Zero-based active page. No upper clamp here: callers clamp before
    /// accepting a navigation request.
    pub fn set_current_page_index(&mut self, index: u64) {
        self.current_page_index = index;
    }

    pub fn use_postback(&self) -> bool {
        self.use_postback
    }

    pub fn set_use_postback(&mut self, use_postback: bool) {
        self.use_postback = use_postback;
    }

    pub fn linked_to(&self) -> Option<PagerId> {
        self.linked_to
    }

    pub(crate) fn set_linked_to(&mut self, target: Option<PagerId>) {
        self.linked_to = target;
    }

    /// Whether an in-process navigation already fixed the current page.
    pub fn is_locally_overridden(&self) -> bool {
        self.ignore_page_param
    }

    pub fn page_count(&self) -> u64 {
        // page_size is kept >= 1 by the setters
        (self.count + self.page_size - 1) / self.page_size
    }

    /// Offset of the first item on the current page.
    pub fn skip_index(&self) -> u64 {
        self.current_page_index * self.page_size
    }

    /// Apply the external 1-based page parameter (`p`), unless an in-process
    /// navigation already overrode it — local state wins. Returns the
    /// resulting page index. Unparsable input is the caller's error; the
    /// host redirects instead of crashing.
    pub fn initialize_from_request(&mut self, query_page: Option<&str>) -> Result<u64, PagerError> {
        if self.ignore_page_param {
            return Ok(self.current_page_index);
        }
        if let Some(raw) = query_page {
            let page = parse_page_number(raw)?;
            self.current_page_index = page - 1;
        }
        Ok(self.current_page_index)
    }

    /// Jump to a 1-based page from the goto-page sub-form. Out-of-range
    /// requests are silently ignored and keep the current page; the observer
    /// fires only on acceptance.
    pub fn goto_page(&mut self, requested: u64, mut on_page_change: impl FnMut()) -> GotoOutcome {
        if requested == 0 || requested > self.page_count() {
            debug!(
                requested,
                page_count = self.page_count(),
                "goto page out of range, keeping current page"
            );
            return GotoOutcome::Ignored;
        }
        self.current_page_index = requested - 1;
        self.ignore_page_param = true;
        on_page_change();
        GotoOutcome::Accepted {
            page_index: self.current_page_index,
        }
    }

    /// Postback transport entry point; the argument is a 1-based page number
    /// carried as the event payload. Applies no range clamp.
    pub fn raise_postback(
        &mut self,
        argument: &str,
        mut on_page_change: impl FnMut(),
    ) -> Result<(), PagerError> {
        let page = parse_page_number(argument)?;
        self.current_page_index = page - 1;
        self.ignore_page_param = true;
        on_page_change();
        Ok(())
    }

    /// Mirror another pager's paging values onto this one.
    pub(crate) fn copy_settings_from(&mut self, other: &Pager) {
        self.count = other.count;
        self.current_page_index = other.current_page_index;
        self.page_size = other.page_size;
    }

    pub fn snapshot(&self) -> PagerSnapshot {
        PagerSnapshot {
            version: SNAPSHOT_VERSION,
            count: self.count,
            page_size: self.page_size,
            current_page_index: self.current_page_index,
        }
    }

    /// Rebuild a pager from a persisted snapshot. Unknown versions and zero
    /// page sizes are rejected.
    pub fn restore(snapshot: &PagerSnapshot) -> Result<Self, PagerError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PagerError::invalid(format!(
                "unsupported pager snapshot version {}",
                snapshot.version
            )));
        }
        let mut pager = Self::new();
        pager.set_page_size(snapshot.page_size)?;
        pager.set_count(snapshot.count);
        pager.set_current_page_index(snapshot.current_page_index);
        Ok(pager)
    }
}

/// Round-trip encoding of the paging values that survive a request.
/// The transport flag and any link target are host configuration, not state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerSnapshot {
    pub version: u32,
    #[serde(default)]
    pub count: u64,
    #[serde(default = "default_snapshot_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub current_page_index: u64,
}

fn default_snapshot_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PagerSnapshot {
    fn default() -> Self {
        Pager::default().snapshot()
    }
}

fn parse_page_number(raw: &str) -> Result<u64, PagerError> {
    let page: u64 = raw
        .trim()
        .parse()
        .map_err(|_| PagerError::invalid(format!("'{raw}' is not a positive page number")))?;
    if page == 0 {
        return Err(PagerError::invalid("page numbers are 1-based"));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_zero_only_for_zero_items() {
        assert_eq!(compute_page_count(0, 20).unwrap(), 0);
        assert_eq!(compute_page_count(1, 20).unwrap(), 1);
        assert_eq!(compute_page_count(20, 20).unwrap(), 1);
        assert_eq!(compute_page_count(21, 20).unwrap(), 2);
        assert_eq!(compute_page_count(95, 20).unwrap(), 5);
        assert_eq!(compute_page_count(500, 20).unwrap(), 25);
    }

    #[test]
    fn page_count_is_smallest_cover() {
        for count in 1u64..200 {
            for page_size in 1u64..8 {
                let pages = compute_page_count(count, page_size).unwrap();
                assert!(pages * page_size >= count);
                assert!((pages - 1) * page_size < count);
            }
        }
    }

    #[test]
    fn zero_page_size_is_invalid() {
        assert!(compute_page_count(10, 0).is_err());
        let mut pager = Pager::new();
        assert!(pager.set_page_size(0).is_err());
        assert_eq!(pager.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn skip_index_is_plain_offset() {
        let mut pager = Pager::new();
        pager.set_count(500);
        pager.set_current_page_index(10);
        assert_eq!(pager.skip_index(), 200);
    }

    #[test]
    fn query_param_sets_zero_based_index() {
        let mut pager = Pager::new();
        pager.set_count(500);
        assert_eq!(pager.initialize_from_request(Some("3")).unwrap(), 2);
        assert_eq!(pager.current_page_index(), 2);
    }

    #[test]
    fn query_param_is_not_clamped_to_page_count() {
        let mut pager = Pager::new();
        pager.set_count(40);
        assert_eq!(pager.initialize_from_request(Some("99")).unwrap(), 98);
    }

    #[test]
    fn missing_query_param_keeps_current_page() {
        let mut pager = Pager::new();
        pager.set_current_page_index(4);
        assert_eq!(pager.initialize_from_request(None).unwrap(), 4);
    }

    #[test]
    fn garbage_query_param_is_invalid_argument() {
        let mut pager = Pager::new();
        assert!(pager.initialize_from_request(Some("abc")).is_err());
        assert!(pager.initialize_from_request(Some("0")).is_err());
        assert!(pager.initialize_from_request(Some("-1")).is_err());
        assert_eq!(pager.current_page_index(), 0);
    }

    #[test]
    fn local_override_wins_over_query_param() {
        let mut pager = Pager::new();
        pager.set_count(500);
        let mut fired = 0;
        assert_eq!(
            pager.goto_page(5, || fired += 1),
            GotoOutcome::Accepted { page_index: 4 }
        );
        assert_eq!(fired, 1);
        // the render that follows the in-process navigation still carries p
        assert_eq!(pager.initialize_from_request(Some("3")).unwrap(), 4);
        assert_eq!(pager.current_page_index(), 4);
    }

    #[test]
    fn goto_page_accepts_in_range() {
        let mut pager = Pager::new();
        pager.set_count(500);
        let mut fired = 0;
        let outcome = pager.goto_page(3, || fired += 1);
        assert_eq!(outcome, GotoOutcome::Accepted { page_index: 2 });
        assert_eq!(pager.current_page_index(), 2);
        assert_eq!(fired, 1);
        assert!(pager.is_locally_overridden());
    }

    #[test]
    fn goto_page_rejects_out_of_range_without_observer() {
        let mut pager = Pager::new();
        pager.set_count(95);
        pager.set_current_page_index(1);
        let mut fired = 0;
        assert_eq!(pager.goto_page(0, || fired += 1), GotoOutcome::Ignored);
        assert_eq!(pager.goto_page(6, || fired += 1), GotoOutcome::Ignored);
        assert_eq!(pager.current_page_index(), 1);
        assert_eq!(fired, 0);
        assert!(!pager.is_locally_overridden());
    }

    #[test]
    fn postback_applies_page_without_clamp() {
        let mut pager = Pager::new();
        pager.set_count(40);
        let mut fired = 0;
        pager.raise_postback("9", || fired += 1).unwrap();
        assert_eq!(pager.current_page_index(), 8);
        assert_eq!(fired, 1);
        assert!(pager.is_locally_overridden());
    }

    #[test]
    fn postback_rejects_garbage() {
        let mut pager = Pager::new();
        let mut fired = 0;
        assert!(pager.raise_postback("next", || fired += 1).is_err());
        assert_eq!(fired, 0);
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut pager = Pager::new();
        pager.set_count(95);
        pager.set_page_size(10).unwrap();
        pager.set_current_page_index(3);
        let snap = pager.snapshot();
        let restored = Pager::restore(&snap).unwrap();
        assert_eq!(restored.count(), 95);
        assert_eq!(restored.page_size(), 10);
        assert_eq!(restored.current_page_index(), 3);
        assert_eq!(restored.snapshot(), snap);
    }

    #[test]
    fn snapshot_rejects_unknown_version() {
        let snap = PagerSnapshot {
            version: 99,
            ..PagerSnapshot::default()
        };
        assert!(Pager::restore(&snap).is_err());
    }

    #[test]
    fn snapshot_defaults_absent_fields() {
        let snap: PagerSnapshot = serde_json::from_str(r#"{"version":1}"#).unwrap();
        let pager = Pager::restore(&snap).unwrap();
        assert_eq!(pager.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(pager.current_page_index(), 0);
        assert_eq!(pager.count(), 0);
    }
}
