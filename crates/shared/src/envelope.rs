//! Wire shapes shared by every backend endpoint.
//!
//! ```json
//! { "code": 1000, "message": "Success", "result": { ... } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope. `result` is kept as raw JSON so the caller can inspect
/// the code before committing to a payload type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Value,
}

impl Envelope {
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

/// Spring-style page object returned by paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_elements: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub first: bool,
    pub last: bool,
}

/// A server-paginated list after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> From<PageResponse<T>> for Paginated<T> {
    fn from(page: PageResponse<T>) -> Self {
        let total_pages = page
            .total_pages
            .unwrap_or_else(|| total_pages(page.total_elements, page.size));
        Self {
            data: page.content,
            pagination: Pagination {
                total_elements: page.total_elements,
                total_pages,
                current_page: page.number,
                page_size: page.size,
                first: page.first,
                last: page.last,
            },
        }
    }
}

/// Number of pages needed for `total` items; a zero page size yields zero pages.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_missing_total_pages() {
        let page: PageResponse<i64> = serde_json::from_str(
            r#"{"content":[1,2],"totalElements":42,"number":0,"size":15,"first":true,"last":false}"#,
        )
        .expect("page");

        let paginated = Paginated::from(page);
        assert_eq!(paginated.pagination.total_pages, 3);
        assert_eq!(paginated.pagination.current_page, 0);
        assert_eq!(paginated.data, vec![1, 2]);
    }

    #[test]
    fn keeps_backend_total_pages_when_present() {
        let page: PageResponse<i64> = serde_json::from_str(
            r#"{"content":[],"totalElements":10,"totalPages":7,"number":2,"size":5}"#,
        )
        .expect("page");

        assert_eq!(Paginated::from(page).pagination.total_pages, 7);
    }

    #[test]
    fn zero_page_size_has_no_pages() {
        assert_eq!(total_pages(12, 0), 0);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }
}
