//! Page and limit normalisation shared by list endpoints.
//!
//! Clients send `page` and `limit` as free-form query text. Nothing in this
//! crate rejects input: absent, non-numeric, or non-positive values fall back
//! to the defaults, so a [`PageRequest`] always describes a valid one-based
//! page with a positive size.
//!
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::from_raw(Some("3"), Some("abc"));
//! assert_eq!(request.page(), 3);
//! assert_eq!(request.limit(), 10);
//! assert_eq!(request.offset(), 20);
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when the client omits or garbles `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the client omits or garbles `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// Normalised pagination window.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
///
/// No upper bound is placed on `limit`; callers that need one apply it
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PageRequestDto", into = "PageRequestDto")]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a window from already-numeric values, replacing zeroes with the
    /// defaults.
    #[must_use]
    pub const fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Build a window from raw query text.
    ///
    /// Each value is coerced with [`coerce_integer`]; anything that does not
    /// yield a positive integer falls back to its default.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items skipped before the page starts: `(page - 1) * limit`.
    ///
    /// Saturates rather than overflowing for absurdly large pages.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(coerce_integer)
        .and_then(|value| u64::try_from(value).ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}

/// Coerce free-form query text into an integer.
///
/// Surrounding whitespace is ignored. Integer text parses directly; decimal
/// text is truncated toward zero. Empty, non-numeric, and non-finite input
/// yields `None`.
///
/// ```
/// use pagination::coerce_integer;
///
/// assert_eq!(coerce_integer(" 42 "), Some(42));
/// assert_eq!(coerce_integer("2.9"), Some(2));
/// assert_eq!(coerce_integer("forty"), None);
/// ```
#[must_use]
pub fn coerce_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(truncate_to_i64)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int `as` casts saturate at the i64 bounds, which is the intent"
)]
fn truncate_to_i64(value: f64) -> i64 {
    value.trunc() as i64
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRequestDto {
    page: u64,
    limit: u64,
}

impl From<PageRequest> for PageRequestDto {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}

impl TryFrom<PageRequestDto> for PageRequest {
    type Error = std::convert::Infallible;

    fn try_from(value: PageRequestDto) -> Result<Self, Self::Error> {
        Ok(Self::new(value.page, value.limit))
    }
}
