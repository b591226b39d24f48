//! Catalog
//!
//! Input cleaning and validation for menu items and categories.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ids::CategoryId;

/// Longest accepted title or slug.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Prices are stored as `NUMERIC(6, 2)`.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

const PRICE_MAX_DIGITS: u32 = 6;

/// Catalog validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A menu item title was blank.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// A category title was blank.
    #[error("Title field cannot be empty")]
    EmptyCategoryTitle,

    /// A category slug was blank, or nothing was left of it after slugifying.
    #[error("Slug field cannot be empty")]
    EmptySlug,

    /// A title or slug exceeded [`MAX_TEXT_LENGTH`].
    #[error("Ensure this field has no more than {MAX_TEXT_LENGTH} characters.")]
    TooLong,

    /// A negative price.
    #[error("Ensure this value is greater than or equal to 0.")]
    NegativePrice,

    /// A price with more than two decimal places.
    #[error("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places.")]
    PricePrecision,

    /// A price that does not fit the storage column.
    #[error("Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total.")]
    PriceTooLarge,
}

/// Escape markup so user-supplied text renders as text.
pub fn sanitize(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Turn free text into a URL-safe slug.
///
/// Non-ASCII characters and punctuation other than `-` and `_` are dropped, the result is
/// lowercased, runs of whitespace and hyphens collapse into a single `-`, and leading or
/// trailing `-`/`_` are stripped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars().filter(char::is_ascii) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }

            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch.is_ascii_whitespace() {
            pending_separator = true;
        }
    }

    slug.trim_matches(|ch| ch == '-' || ch == '_').to_owned()
}

/// Clean and validate a menu item title.
///
/// # Errors
///
/// Returns an error when the title is blank or too long.
pub fn menu_item_title(raw: &str) -> Result<String, CatalogError> {
    clean_text(raw, CatalogError::EmptyTitle)
}

/// Clean and validate a category title.
///
/// # Errors
///
/// Returns an error when the title is blank or too long.
pub fn category_title(raw: &str) -> Result<String, CatalogError> {
    clean_text(raw, CatalogError::EmptyCategoryTitle)
}

/// Clean and validate a category slug.
///
/// # Errors
///
/// Returns an error when nothing usable is left of the slug or it is too long.
pub fn category_slug(raw: &str) -> Result<String, CatalogError> {
    let slug = slugify(&sanitize(raw.trim()));

    if slug.is_empty() {
        return Err(CatalogError::EmptySlug);
    }

    if slug.chars().count() > MAX_TEXT_LENGTH {
        return Err(CatalogError::TooLong);
    }

    Ok(slug)
}

/// Validate a menu item price and normalise it to two decimal places.
///
/// # Errors
///
/// Returns an error for negative prices, more than two decimal places, or prices that do not fit
/// six digits in total.
pub fn price(value: Decimal) -> Result<Decimal, CatalogError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CatalogError::NegativePrice);
    }

    let mut normalised = value.normalize();

    if normalised.scale() > PRICE_DECIMAL_PLACES {
        return Err(CatalogError::PricePrecision);
    }

    let limit = Decimal::from(10_i64.pow(PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES));

    if normalised >= limit {
        return Err(CatalogError::PriceTooLarge);
    }

    normalised.rescale(PRICE_DECIMAL_PLACES);

    Ok(normalised)
}

fn clean_text(raw: &str, empty: CatalogError) -> Result<String, CatalogError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(empty);
    }

    let cleaned = sanitize(trimmed);

    if cleaned.chars().count() > MAX_TEXT_LENGTH {
        return Err(CatalogError::TooLong);
    }

    Ok(cleaned)
}

/// Optional narrowing of the menu item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemFilter {
    /// In this category.
    pub category: Option<CategoryId>,

    /// Price at least this amount.
    pub price_from: Option<Decimal>,

    /// Price at most this amount.
    pub price_to: Option<Decimal>,

    /// Title contains this text, ignoring case.
    pub search: Option<String>,
}
