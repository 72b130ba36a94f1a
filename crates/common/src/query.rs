//! Query-string parameter handling
//!
//! Small ordered parser used by the page-link builder. Parameter order is
//! preserved so rebuilt URLs stay stable across requests.

/// Ordered set of query-string parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string (`a=1&b=2`). Empty segments are skipped;
    /// a bare name without `=` is kept with an empty value.
    pub fn parse(raw: &str) -> Self {
        let params = raw
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self { params }
    }

    /// First value for `name`, if present. Names compare case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Remove every occurrence of `name`.
    pub fn remove(&mut self, name: &str) {
        self.params.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// Append a parameter at the end.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.params.push((name.to_string(), value.to_string()));
    }

    /// Rebuild a query string, skipping every name in `exclude`.
    pub fn to_query_string(&self, exclude: &[&str]) -> String {
        self.params
            .iter()
            .filter(|(n, _)| !exclude.iter().any(|e| n.eq_ignore_ascii_case(e)))
            .map(|(n, v)| {
                if v.is_empty() {
                    n.clone()
                } else {
                    format!("{}={}", n, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
