//! Pagination state and link-window computation for forum listings.
//! - Owns paging state (item count, page size, current page index) per request.
//! - Derives the page count and the visible navigation window.
//! - Delegates URL construction to a `PageLinkBuilder` and page-change
//!   notification to an observer callback supplied by the host.

pub mod group;
pub mod links;
pub mod nav;
pub mod state;
pub mod window;

pub use group::{PagerGroup, PagerId};
pub use links::{NavTarget, PageLinkBuilder};
pub use nav::NavItem;
pub use state::{compute_page_count, GotoOutcome, Pager, PagerSnapshot, DEFAULT_PAGE_SIZE};
pub use window::{select_window, PageWindow};
