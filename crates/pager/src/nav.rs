use common::localization::{pages_label, Localization};
use serde::{Deserialize, Serialize};

use crate::state::Pager;
use crate::window::{select_window, PageWindow};

/// One rendered element of the navigation strip. All page numbers are
/// 1-based display numbers.
///
/// The prev/next targets keep the control's historical numbering: prev
/// targets `current_page_index` unchanged (the 1-based page immediately
/// before the displayed one) and next targets `current_page_index + 2`.
/// External link consumers depend on those values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavItem {
    /// Jump to the first page; emitted only when the window starts after it.
    First { target: u64 },
    /// Step back one page.
    Prev { target: u64 },
    /// Interactive link to a page inside the window.
    Page { number: u64 },
    /// Non-interactive marker for the active page.
    Current { number: u64 },
    /// Step forward one page.
    Next { target: u64 },
    /// Jump to the last page; emitted only when the window ends before it.
    Last { target: u64 },
}

impl NavItem {
    /// 1-based page a click on this item navigates to; `None` for the
    /// current-page marker.
    pub fn target_page(&self) -> Option<u64> {
        match *self {
            NavItem::First { target }
            | NavItem::Prev { target }
            | NavItem::Next { target }
            | NavItem::Last { target } => Some(target),
            NavItem::Page { number } => Some(number),
            NavItem::Current { .. } => None,
        }
    }
}

impl Pager {
    /// Per-item render instructions for the navigation strip, recomputed on
    /// every call. Yields nothing at all for single-page results: the whole
    /// control is suppressed.
    pub fn nav_items(&self) -> impl Iterator<Item = NavItem> {
        let page_count = self.page_count();
        let current = self.current_page_index();
        let visible = page_count >= 2;
        let window = if visible {
            select_window(current, page_count)
        } else {
            PageWindow { start: 0, end: 0 }
        };

        let first = (window.start > 0).then_some(NavItem::First { target: 1 });
        let prev = (visible && current > window.start).then_some(NavItem::Prev { target: current });
        let pages = window.pages().map(move |i| {
            if i == current {
                NavItem::Current { number: i + 1 }
            } else {
                NavItem::Page { number: i + 1 }
            }
        });
        let next = (visible && current + 1 < page_count).then_some(NavItem::Next {
            target: current + 2,
        });
        let last = (visible && window.end < page_count).then_some(NavItem::Last {
            target: page_count,
        });

        first
            .into_iter()
            .chain(prev)
            .chain(pages)
            .chain(next)
            .chain(last)
    }

    /// "{page count} Pages" header label, localized with an English fallback.
    pub fn page_label(&self, loc: &dyn Localization) -> String {
        format!("{} {}", self.page_count(), pages_label(loc))
    }
}
