//! Cursor pagination helpers
//!
//! Cursors are the last-seen sort key (RFC3339 timestamp), used as an
//! exclusive bound on the next page. Read skew across pages is accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 50;

/// Query parameters shared by the paginated library endpoints
#[derive(Debug, Deserialize)]
pub struct CursorQuery {
    pub cursor: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl CursorQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// One page of results plus the cursor for the next page
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Build a page; a next cursor is only emitted when the page came back full
pub fn page_of<T>(
    items: Vec<T>,
    limit: i64,
    sort_key: impl Fn(&T) -> DateTime<Utc>,
) -> Page<T> {
    let next_cursor = if items.len() as i64 == limit {
        items.last().map(|item| sort_key(item).to_rfc3339())
    } else {
        None
    };
    Page { items, next_cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn stamps(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc::now();
        (0..n).map(|i| base - Duration::minutes(i as i64)).collect()
    }

    #[test]
    fn test_full_page_emits_next_cursor() {
        let items = stamps(5);
        let last = *items.last().unwrap();
        let page = page_of(items, 5, |t| *t);
        assert_eq!(page.next_cursor, Some(last.to_rfc3339()));
    }

    #[test]
    fn test_short_page_ends_pagination() {
        let page = page_of(stamps(3), 5, |t| *t);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_empty_page_has_no_cursor() {
        let page = page_of(Vec::<DateTime<Utc>>::new(), 5, |t| *t);
        assert!(page.next_cursor.is_none());
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_limit_clamping() {
        let q = CursorQuery {
            cursor: None,
            limit: Some(500),
        };
        assert_eq!(q.limit(), 50);

        let q = CursorQuery {
            cursor: None,
            limit: Some(0),
        };
        assert_eq!(q.limit(), 1);

        let q = CursorQuery {
            cursor: None,
            limit: None,
        };
        assert_eq!(q.limit(), 20);
    }
}
