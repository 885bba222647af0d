use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Raw `?page=&limit=` values, kept as text so bad input becomes a field error
/// instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn from_query(query: &ListQuery) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let page = match parse_bounded(query.page.as_deref(), 1, u64::MAX) {
            Ok(v) => v.unwrap_or(DEFAULT_PAGE),
            Err(()) => {
                errors.push(FieldError::new("page", "page must be an integer greater than or equal to 1"));
                DEFAULT_PAGE
            }
        };
        let limit = match parse_bounded(query.limit.as_deref(), 1, MAX_LIMIT) {
            Ok(v) => v.unwrap_or(DEFAULT_LIMIT),
            Err(()) => {
                errors.push(FieldError::new(
                    "limit",
                    format!("limit must be an integer between 1 and {}", MAX_LIMIT),
                ));
                DEFAULT_LIMIT
            }
        };

        if errors.is_empty() {
            Ok(Self { page, limit })
        } else {
            Err(errors)
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Empty input means "use the default"; anything else must parse and fit the bounds.
fn parse_bounded(raw: Option<&str>, min: u64, max: u64) -> Result<Option<u64>, ()> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.parse::<u64>() {
            Ok(n) if (min..=max).contains(&n) => Ok(Some(n)),
            _ => Err(()),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub pages: u64,
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn new(total: u64, request: &PageRequest) -> Self {
        Self {
            total,
            pages: total.div_ceil(request.limit),
            page: request.page,
            limit: request.limit,
        }
    }
}

/// List response body: `{ data, pagination }`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn defaults_apply() {
        let req = PageRequest::from_query(&ListQuery::default()).unwrap();
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn offset_follows_page() {
        let req = PageRequest::from_query(&query(Some("3"), Some("25"))).unwrap();
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let errors = PageRequest::from_query(&query(Some("0"), Some("101"))).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["page", "limit"]);

        assert!(PageRequest::from_query(&query(Some("abc"), None)).is_err());
        assert!(PageRequest::from_query(&query(None, Some("-5"))).is_err());
    }

    #[test]
    fn pages_is_ceiling_of_total_over_limit() {
        let req = PageRequest { page: 1, limit: 10 };
        assert_eq!(Pagination::new(0, &req).pages, 0);
        assert_eq!(Pagination::new(10, &req).pages, 1);
        assert_eq!(Pagination::new(11, &req).pages, 2);
        let req = PageRequest { page: 4, limit: 3 };
        assert_eq!(Pagination::new(10, &req), Pagination { total: 10, pages: 4, page: 4, limit: 3 });
    }
}
