//! Page requests and pages of results.
//!
//! Pagination parameters follow the familiar `page`/`size`/`sort` query
//! convention:
//!
//! ```text
//! GET /api/products?page=2&size=50&sort=title,asc&sort=id,desc
//! ```
//!
//! - `page` is zero-based (default 0)
//! - `size` defaults to 20; values below 1 fall back to the default and
//!   values above [`MAX_PAGE_SIZE`] are clamped
//! - `sort` may repeat; each value is one or more properties optionally
//!   followed by `asc` or `desc`

use core::fmt;

use serde::Serialize;
use thiserror::Error;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Errors raised while parsing pagination parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    /// `page` or `size` is not a non-negative integer.
    #[error("invalid value for {param}: {value}")]
    InvalidNumber {
        /// Parameter name.
        param: &'static str,
        /// Raw value as received.
        value: String,
    },

    /// A `sort` value names no property.
    #[error("invalid sort: {0}")]
    InvalidSort(String),

    /// A sort property is not sortable for this resource.
    #[error("unknown sort property: {0}")]
    UnknownProperty(String),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// Order by one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Property name as exposed on the transfer object (camelCase).
    pub property: String,
    pub direction: Direction,
}

/// A request for one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Vec<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    /// Create a page request without sorting.
    #[must_use]
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: clamp_size(size),
            sort: Vec::new(),
        }
    }

    /// Add a sort order.
    #[must_use]
    pub fn with_sort(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.sort.push(Sort {
            property: property.into(),
            direction,
        });
        self
    }

    /// Parse `page`, `size` and `sort` from decoded query parameters.
    /// Other parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns `PageError` if `page` or `size` is not a number, or a `sort`
    /// value has no property.
    pub fn from_params<'a, I>(params: I) -> Result<Self, PageError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::default();
        for (key, value) in params {
            match key {
                "page" => request.page = parse_number("page", value)?,
                "size" => request.size = clamp_size(parse_number("size", value)?),
                "sort" => request.sort.extend(parse_sort(value)?),
                _ => {}
            }
        }
        Ok(request)
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Requested sort orders, in priority order.
    #[must_use]
    pub fn sort(&self) -> &[Sort] {
        &self.sort
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Number of rows to fetch.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

const fn clamp_size(size: u32) -> u32 {
    if size == 0 {
        DEFAULT_PAGE_SIZE
    } else if size > MAX_PAGE_SIZE {
        MAX_PAGE_SIZE
    } else {
        size
    }
}

fn parse_number(param: &'static str, value: &str) -> Result<u32, PageError> {
    value
        .trim()
        .parse()
        .map_err(|_| PageError::InvalidNumber {
            param,
            value: value.to_owned(),
        })
}

fn parse_sort(value: &str) -> Result<Vec<Sort>, PageError> {
    let mut parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let direction = match parts.last().and_then(|p| Direction::parse(p)) {
        Some(direction) => {
            parts.pop();
            direction
        }
        None => Direction::Asc,
    };

    if parts.is_empty() {
        return Err(PageError::InvalidSort(value.to_owned()));
    }

    Ok(parts
        .into_iter()
        .map(|property| Sort {
            property: property.to_owned(),
            direction,
        })
        .collect())
}

/// One page of results plus the metadata needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Total number of rows across all pages.
    pub total_elements: i64,
    /// Zero-based page number.
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    /// Create a page for `request`.
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            total_elements,
            page: request.page(),
            size: request.size(),
        }
    }

    /// Convert every item, keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }

    /// Total number of pages; zero when there are no rows.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        let total = u64::try_from(self.total_elements).unwrap_or(0);
        let pages = total.div_ceil(u64::from(self.size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether a page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }
}
