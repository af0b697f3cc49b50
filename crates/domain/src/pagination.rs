use serde::Serialize;
use serde_json::Value;

use crate::input::FieldValue;

/// Lowest accepted page number.
pub const MIN_PAGE: u64 = 1;
/// Page used when the requested page is unusable.
pub const DEFAULT_PAGE: u64 = 1;
/// Lowest accepted page size.
pub const MIN_PAGE_SIZE: u64 = 1;
/// Page size used when the requested size is unusable or too small.
pub const DEFAULT_PAGE_SIZE: u64 = 12;
/// Highest accepted page size; larger requests are clamped to it.
pub const MAX_PAGE_SIZE: u64 = 40;

/// Normalized one-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pagination {
    page: u64,
    page_size: u64,
}

impl Pagination {
    /// Normalizes raw page inputs.
    ///
    /// `page` resets to [`DEFAULT_PAGE`] when it is not a whole number of at
    /// least [`MIN_PAGE`] and is never clamped from above. `page_size` resets
    /// to [`DEFAULT_PAGE_SIZE`] when it is not a whole number of at least
    /// [`MIN_PAGE_SIZE`], and is clamped to [`MAX_PAGE_SIZE`] when larger.
    #[must_use]
    pub fn normalize(page: FieldValue<'_>, page_size: FieldValue<'_>) -> Self {
        let page = match whole_number(page) {
            Some(page) if page >= i128::from(MIN_PAGE) => u64::try_from(page).unwrap_or(u64::MAX),
            _ => DEFAULT_PAGE,
        };

        let page_size = match whole_number(page_size) {
            Some(size) if size < i128::from(MIN_PAGE_SIZE) => DEFAULT_PAGE_SIZE,
            Some(size) if size > i128::from(MAX_PAGE_SIZE) => MAX_PAGE_SIZE,
            Some(size) => u64::try_from(size).unwrap_or(DEFAULT_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };

        Self { page, page_size }
    }

    /// Returns the one-based page number.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the number of rows preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Returns the maximum number of rows on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn whole_number(value: FieldValue<'_>) -> Option<i128> {
    let FieldValue::Present(Value::Number(number)) = value else {
        return None;
    };

    if let Some(value) = number.as_i64() {
        return Some(i128::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(i128::from(value));
    }

    let value = number.as_f64()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }

    // Float-to-int casts saturate, which is the intent for huge pages.
    Some(value as i128)
}
