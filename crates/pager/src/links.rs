use serde::{Deserialize, Serialize};

use crate::state::Pager;

/// Builds the URL for a 1-based page of the current listing. Implemented by
/// the host, which owns the route context and query-string rules.
pub trait PageLinkBuilder {
    fn page_url(&self, page: u64) -> String;
}

/// Where a click on a navigation item goes: an in-place postback event
/// carrying the page number, or a plain hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
pub enum NavTarget {
    PostBack { page: u64 },
    Href { url: String },
}

impl Pager {
    /// Resolve a 1-based page into its navigation target for this pager's
    /// transport. The transport flag never changes the page arithmetic.
    pub fn link_target(&self, builder: &dyn PageLinkBuilder, page: u64) -> NavTarget {
        if self.use_postback() {
            NavTarget::PostBack { page }
        } else {
            NavTarget::Href {
                url: builder.page_url(page),
            }
        }
    }
}
