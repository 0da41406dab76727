//! Page/limit pagination primitives shared by backend list endpoints.
//!
//! Clients send `page` and `limit` as loosely typed query parameters. This
//! crate turns them into a [`PageRequest`] using the lenient rules of the
//! public API (missing, non-numeric, or non-positive values fall back to the
//! defaults, and `limit` is clamped to [`MAX_LIMIT`]) and derives the
//! `skip`/`limit` [`PageWindow`] that storage adapters apply.
//!
//! ```
//! use pagination::{PageRequest, MAX_LIMIT};
//!
//! let request = PageRequest::from_raw(Some("3"), Some("1000"));
//! let window = request.window();
//! assert_eq!(window.limit(), MAX_LIMIT);
//! assert_eq!(window.skip(), 100);
//! ```

/// Page used when the client omits `page` or sends an unusable value.
pub const DEFAULT_PAGE: u32 = 1;
/// Limit used when the client omits `limit` or sends an unusable value.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 50;

/// Validated page request.
///
/// ## Invariants
/// - `page >= 1`.
/// - `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
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
    /// Build a request from optional numeric inputs.
    ///
    /// Zero values fall back to the defaults; limits above [`MAX_LIMIT`] are
    /// clamped.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|value| *value > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit.filter(|value| *value > 0).unwrap_or(DEFAULT_LIMIT);
        Self {
            page,
            limit: limit.min(MAX_LIMIT),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Each value is read as a leading integer (`"12abc"` is `12`, `" 7"` is
    /// `7`, `"1.9"` is `1`). Anything without a leading integer, or a value
    /// that is zero, uses the default.
    ///
    /// Negative values also use the default. A plain `parseInt(x) || default`
    /// would keep them, since only zero and `NaN` are falsy, and hand a
    /// negative skip or limit to storage; here they never leave this crate.
    ///
    /// ```
    /// use pagination::{PageRequest, DEFAULT_LIMIT};
    ///
    /// let request = PageRequest::from_raw(Some("2"), Some("abc"));
    /// assert_eq!(request.page(), 2);
    /// assert_eq!(request.limit(), DEFAULT_LIMIT);
    /// ```
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            page.and_then(parse_positive),
            limit.and_then(parse_positive),
        )
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Clamped page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Compute the `skip`/`limit` window for this request.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        let skip = u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.limit));
        PageWindow {
            skip,
            limit: self.limit,
        }
    }
}

/// Offset window derived from a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    skip: u64,
    limit: u32,
}

impl PageWindow {
    /// Number of items to skip before the page starts.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Apply the window to an in-memory sequence.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let window = PageRequest::new(Some(2), Some(2)).window();
    /// let page: Vec<_> = window.apply(1..=5).collect();
    /// assert_eq!(page, vec![3, 4]);
    /// ```
    pub fn apply<I>(self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take)
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    let value = parse_leading_int(raw)?;
    if value <= 0 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = unsigned.get(..end)?;
    if digits.is_empty() {
        return None;
    }
    // Overlong digit runs saturate rather than fail.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
