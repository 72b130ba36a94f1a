use common::query::QueryParams;
use pager::PageLinkBuilder;

/// Parameters that never survive into a rebuilt page link: route selector,
/// page number, and host-framework leftovers.
const DROPPED_PARAMS: [&str; 4] = ["g", "p", "tabid", "find"];

/// Builds listing URLs that keep the caller's query parameters, except the
/// drop list above and one legacy rename: an `m` (message id) parameter is
/// replaced by `t=<topic id>` from the route context, so old by-message
/// links land on the owning topic.
#[derive(Debug, Clone)]
pub struct TopicLinkBuilder {
    route: String,
    query: QueryParams,
}

impl TopicLinkBuilder {
    pub fn new(route: impl Into<String>, raw_query: &str, page_topic_id: Option<u64>) -> Self {
        let mut query = QueryParams::parse(raw_query);
        if query.get("m").is_some() {
            query.remove("m");
            if let Some(topic_id) = page_topic_id {
                query.insert("t", &topic_id.to_string());
            }
        }
        Self {
            route: route.into(),
            query,
        }
    }
}

impl PageLinkBuilder for TopicLinkBuilder {
    fn page_url(&self, page: u64) -> String {
        let mut qs = self.query.to_query_string(&DROPPED_PARAMS);
        // page 1 is the canonical URL and carries no page parameter
        if page > 1 {
            if !qs.is_empty() {
                qs.push('&');
            }
            qs.push_str(&format!("p={page}"));
        }
        if qs.is_empty() {
            self.route.clone()
        } else {
            format!("{}?{}", self.route, qs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_foreign_params_and_drops_paging_ones() {
        let links = TopicLinkBuilder::new("/forum/topics", "g=topics&s=hot&p=4&find=last", None);
        assert_eq!(links.page_url(3), "/forum/topics?s=hot&p=3");
    }

    #[test]
    fn page_one_has_no_page_param() {
        let links = TopicLinkBuilder::new("/forum/topics", "s=hot&p=4", None);
        assert_eq!(links.page_url(1), "/forum/topics?s=hot");
        let bare = TopicLinkBuilder::new("/forum/topics", "p=4", None);
        assert_eq!(bare.page_url(1), "/forum/topics");
    }

    #[test]
    fn legacy_message_param_becomes_topic_param() {
        let links = TopicLinkBuilder::new("/forum/topics", "m=123&s=hot", Some(7));
        assert_eq!(links.page_url(2), "/forum/topics?s=hot&t=7&p=2");
    }

    #[test]
    fn message_param_without_topic_context_is_dropped() {
        let links = TopicLinkBuilder::new("/forum/topics", "m=123", None);
        assert_eq!(links.page_url(2), "/forum/topics?p=2");
    }
}
