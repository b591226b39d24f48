//! Pricing

use rust_decimal::Decimal;
use thiserror::Error;

/// Largest quantity a single cart or order line may hold, including merged additions.
pub const MAX_QUANTITY: u32 = 32_767;

/// Invalid cart quantity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantity must be a positive integer.")]
    NotPositive,

    #[error("Quantity must not exceed 32767.")]
    TooLarge,
}

/// A cart or order line quantity, in `1..=MAX_QUANTITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    /// Get the quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 1 {
            return Err(QuantityError::NotPositive);
        }

        u32::try_from(value)
            .ok()
            .filter(|quantity| *quantity <= MAX_QUANTITY)
            .map(Self)
            .ok_or(QuantityError::TooLarge)
    }
}

impl From<Quantity> for i32 {
    fn from(value: Quantity) -> Self {
        // Bounded by `MAX_QUANTITY` on construction.
        Self::try_from(value.0).unwrap_or(Self::MAX)
    }
}

/// Total for a line of `quantity` units at `unit_price`.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: Quantity) -> Decimal {
    unit_price * Decimal::from(quantity.get())
}

/// Sum of line totals.
pub fn order_total(line_totals: impl IntoIterator<Item = Decimal>) -> Decimal {
    line_totals.into_iter().sum()
}
