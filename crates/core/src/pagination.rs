//! Page-number pagination for recipe listings.
//!
//! Query parameters arrive as raw strings so malformed values can be
//! reported with a specific message instead of a generic extractor error.

use serde::Serialize;

use crate::error::CoreError;

/// Page used when `page` is omitted.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `page_size` is omitted.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

pub const INVALID_PAGE_MESSAGE: &str = "Invalid 'page' parameter. Must be a positive integer.";

pub const INVALID_PAGE_SIZE_MESSAGE: &str =
    "Invalid 'page_size' parameter. Must be between 1 and 100.";

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Validate raw `page` / `page_size` query values, applying defaults for
    /// absent parameters.
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Result<Self, CoreError> {
        let page = match page {
            None => DEFAULT_PAGE,
            Some(raw) => parse_int(raw)
                .filter(|p| *p >= 1)
                .ok_or_else(|| CoreError::InvalidParameter(INVALID_PAGE_MESSAGE.to_string()))?,
        };

        let page_size = match page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => parse_int(raw)
                .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
                .ok_or_else(|| {
                    CoreError::InvalidParameter(INVALID_PAGE_SIZE_MESSAGE.to_string())
                })?,
        };

        Ok(Self { page, page_size })
    }

    /// Row offset of the first record on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        let total_pages = if total_items > 0 {
            (total_items + request.page_size - 1) / request.page_size
        } else {
            0
        };

        Self {
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
            has_next: request.offset().saturating_add(request.page_size) < total_items,
            has_previous: request.page > 1 && total_items > 0,
        }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn req(page: i64, page_size: i64) -> PageRequest {
        PageRequest { page, page_size }
    }

    // -- parsing -------------------------------------------------------------

    #[test]
    fn defaults_when_absent() {
        assert_eq!(PageRequest::parse(None, None).unwrap(), req(1, 10));
    }

    #[test]
    fn parses_valid_values() {
        assert_eq!(PageRequest::parse(Some("3"), Some("25")).unwrap(), req(3, 25));
        assert_eq!(PageRequest::parse(Some(" 2 "), Some("100")).unwrap(), req(2, 100));
    }

    #[test]
    fn rejects_bad_page() {
        for raw in ["0", "-1", "abc", "", "1.5"] {
            assert_matches!(
                PageRequest::parse(Some(raw), None),
                Err(CoreError::InvalidParameter(msg)) if msg == INVALID_PAGE_MESSAGE,
                "page = {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_page_size() {
        for raw in ["0", "101", "-5", "ten", ""] {
            assert_matches!(
                PageRequest::parse(None, Some(raw)),
                Err(CoreError::InvalidParameter(msg)) if msg == INVALID_PAGE_SIZE_MESSAGE,
                "page_size = {raw:?}"
            );
        }
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(req(1, 10).offset(), 0);
        assert_eq!(req(3, 10).offset(), 20);
    }

    // -- metadata ------------------------------------------------------------

    #[test]
    fn empty_result_set() {
        let p = Pagination::new(req(1, 10), 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(req(1, 10), 21).total_pages, 3);
        assert_eq!(Pagination::new(req(1, 10), 20).total_pages, 2);
        assert_eq!(Pagination::new(req(1, 100), 1).total_pages, 1);
    }

    #[test]
    fn next_and_previous_flags() {
        let first = Pagination::new(req(1, 10), 25);
        assert!(first.has_next);
        assert!(!first.has_previous);

        let last = Pagination::new(req(3, 10), 25);
        assert!(!last.has_next);
        assert!(last.has_previous);
    }

    #[test]
    fn page_past_the_end_has_previous_but_no_next() {
        let p = Pagination::new(req(9, 10), 25);
        assert!(!p.has_next);
        assert!(p.has_previous);
    }
}
