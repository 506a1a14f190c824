//! Shapes of the platform's success envelope.
//!
//! Responses are returned to callers as raw JSON; these types are for callers
//! that want to read the pagination block without hand-walking the value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size as reported by the server: a number, or `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageLimit {
    Count(u64),
    All(String),
}

/// The `meta.pagination` block of a browse response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: PageLimit,
    pub pages: u64,
    pub total: u64,
    #[serde(default)]
    pub next: Option<u64>,
    #[serde(default)]
    pub prev: Option<u64>,
}

impl Pagination {
    /// Read `meta.pagination` from a response, if present and well formed.
    pub fn from_response(response: &Value) -> Option<Self> {
        let block = response.get("meta")?.get("pagination")?;
        serde_json::from_value(block.clone()).ok()
    }

    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response() {
        let response = json!({
            "posts": [],
            "meta": {"pagination": {"page": 1, "limit": 15, "pages": 3, "total": 42, "next": 2, "prev": null}}
        });
        let pagination = Pagination::from_response(&response).unwrap();
        assert_eq!(pagination.limit, PageLimit::Count(15));
        assert_eq!(pagination.total, 42);
        assert!(pagination.has_next());
        assert_eq!(pagination.prev, None);
    }

    #[test]
    fn test_limit_all() {
        let response = json!({
            "meta": {"pagination": {"page": 1, "limit": "all", "pages": 1, "total": 3, "next": null, "prev": null}}
        });
        let pagination = Pagination::from_response(&response).unwrap();
        assert_eq!(pagination.limit, PageLimit::All("all".to_string()));
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_missing_block() {
        assert!(Pagination::from_response(&json!({"posts": []})).is_none());
        assert!(Pagination::from_response(&json!({"meta": {}})).is_none());
    }
}
