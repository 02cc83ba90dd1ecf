//! Relay-style connections over ordered sequences.
//!
//! Cursors are the decimal offset of an element in the full sequence.

use serde::{Deserialize, Serialize};
use votely_common::{AppError, AppResult};

/// Pagination arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectionArgs {
    pub first: Option<usize>,
    pub after: Option<String>,
    pub last: Option<usize>,
    pub before: Option<String>,
}

impl ConnectionArgs {
    /// The first `n` elements.
    #[must_use]
    pub fn first(n: usize) -> Self {
        Self {
            first: Some(n),
            ..Self::default()
        }
    }

    /// Continue after `cursor`.
    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }
}

/// An element with its cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

impl<T> Edge<T> {
    /// Edge returned in mutation payloads, which carry no position.
    pub fn detached(node: T) -> Self {
        Self {
            cursor: "0".to_string(),
            node,
        }
    }
}

/// Position information for a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// A page of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Nodes of this page, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Slice `items` according to `args`, clamping `first`/`last` to `max_page_size`.
    pub fn from_vec(items: Vec<T>, args: &ConnectionArgs, max_page_size: usize) -> AppResult<Self> {
        let len = items.len();
        let after = args.after.as_deref().map(parse_cursor).transpose()?;
        let before = args.before.as_deref().map(parse_cursor).transpose()?;

        let lower = after.map_or(0, |offset| offset.saturating_add(1)).min(len);
        let upper = before.map_or(len, |offset| offset.min(len));

        let mut start = lower;
        let mut end = upper.max(lower);
        if let Some(first) = args.first {
            end = end.min(start.saturating_add(first.min(max_page_size)));
        }
        if let Some(last) = args.last {
            start = start.max(end.saturating_sub(last.min(max_page_size)));
        }

        let edges: Vec<Edge<T>> = items
            .into_iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(offset, node)| Edge {
                cursor: offset.to_string(),
                node,
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: args.first.is_some() && end < upper,
            has_previous_page: args.last.is_some() && start > lower,
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        };

        Ok(Self { edges, page_info })
    }
}

fn parse_cursor(cursor: &str) -> AppResult<usize> {
    cursor
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid cursor: {cursor}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn letters() -> Vec<char> {
        "abcde".chars().collect()
    }

    fn nodes(conn: &Connection<char>) -> String {
        conn.nodes().collect()
    }

    #[test]
    fn test_no_args_returns_everything() {
        let conn = Connection::from_vec(letters(), &ConnectionArgs::default(), 100).unwrap();
        assert_eq!(nodes(&conn), "abcde");
        assert!(!conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.start_cursor.as_deref(), Some("0"));
        assert_eq!(conn.page_info.end_cursor.as_deref(), Some("4"));
    }

    #[test]
    fn test_first_then_after() {
        let page = Connection::from_vec(letters(), &ConnectionArgs::first(2), 100).unwrap();
        assert_eq!(nodes(&page), "ab");
        assert!(page.page_info.has_next_page);

        let cursor = page.page_info.end_cursor.unwrap();
        let next =
            Connection::from_vec(letters(), &ConnectionArgs::first(2).after(cursor), 100).unwrap();
        assert_eq!(nodes(&next), "cd");
        assert!(next.page_info.has_next_page);

        let tail = Connection::from_vec(letters(), &ConnectionArgs::first(2).after("3"), 100).unwrap();
        assert_eq!(nodes(&tail), "e");
        assert!(!tail.page_info.has_next_page);
    }

    #[test]
    fn test_last_before() {
        let args = ConnectionArgs {
            last: Some(2),
            before: Some("4".to_string()),
            ..ConnectionArgs::default()
        };
        let conn = Connection::from_vec(letters(), &args, 100).unwrap();
        assert_eq!(nodes(&conn), "cd");
        assert!(conn.page_info.has_previous_page);
        assert!(!conn.page_info.has_next_page);
    }

    #[test]
    fn test_page_size_clamped() {
        let conn = Connection::from_vec(letters(), &ConnectionArgs::first(50), 3).unwrap();
        assert_eq!(nodes(&conn), "abc");
        assert!(conn.page_info.has_next_page);
    }

    #[test]
    fn test_cursor_past_end_is_empty() {
        let conn = Connection::from_vec(letters(), &ConnectionArgs::first(2).after("9"), 100).unwrap();
        assert!(conn.edges.is_empty());
        assert_eq!(conn.page_info.start_cursor, None);
    }

    #[test]
    fn test_invalid_cursor() {
        let result = Connection::from_vec(letters(), &ConnectionArgs::first(2).after("xyz"), 100);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_detached_edge() {
        assert_eq!(Edge::detached('z').cursor, "0");
    }
}
