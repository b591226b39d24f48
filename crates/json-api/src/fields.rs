//! Lenient request fields and response formatting.
//!
//! Clients send ids, amounts, quantities and statuses either as JSON scalars or as strings,
//! so request bodies take them as [`FieldValue`] and parse through `FromStr`. Every field is
//! optional at the serde level; presence is checked by the handler after the role check.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use littlelemon::catalog::PRICE_DECIMAL_PLACES;

use crate::errors::ApiError;

/// A JSON scalar, read as text.
///
/// Arrays and objects land in `Other` so decoding the body never fails on a field's shape;
/// they are rejected when parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Empty or whitespace-only text.
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Parse the value as `T`, answering 400 with `message` when it does not parse.
    pub(crate) fn parse<T: FromStr>(&self, message: &str) -> Result<T, ApiError> {
        self.to_string()
            .trim()
            .parse::<T>()
            .map_err(|_ignored| ApiError::bad_request(message))
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bool(value) => Display::fmt(value, f),
            Self::Integer(value) => Display::fmt(value, f),
            Self::Float(value) => Display::fmt(value, f),
            Self::Text(value) => f.write_str(value),
            Self::Other(value) => Display::fmt(value, f),
        }
    }
}

/// Unwrap a field the request must carry.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(format!("{field}: This field is required.")))
}

/// Drop blank text values, which clients send for "leave unchanged".
pub(crate) fn present(value: Option<FieldValue>) -> Option<FieldValue> {
    value.filter(|value| !value.is_blank())
}

/// Render a money amount with exactly two decimal places.
pub(crate) fn amount(value: Decimal) -> String {
    let mut value = value;

    value.rescale(PRICE_DECIMAL_PLACES);
    value.to_string()
}

#[cfg(test)]
mod tests {
    use littlelemon::{ids::MenuItemId, orders::OrderStatus};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn scalars_and_strings_parse_alike() -> TestResult {
        let number: FieldValue = serde_json::from_value(json!(3))?;
        let text: FieldValue = serde_json::from_value(json!("3"))?;

        assert_eq!(number.parse::<MenuItemId>("bad")?, MenuItemId::from_raw(3));
        assert_eq!(text.parse::<MenuItemId>("bad")?, MenuItemId::from_raw(3));

        Ok(())
    }

    #[test]
    fn amounts_accept_numbers_and_strings() -> TestResult {
        let number: FieldValue = serde_json::from_value(json!(9.5))?;
        let text: FieldValue = serde_json::from_value(json!("9.50"))?;

        assert_eq!(number.parse::<Decimal>("bad")?, Decimal::new(95, 1));
        assert_eq!(text.parse::<Decimal>("bad")?, Decimal::new(950, 2));

        Ok(())
    }

    #[test]
    fn legacy_delivered_flag_parses_as_status() -> TestResult {
        let flag: FieldValue = serde_json::from_value(json!(true))?;
        let zero: FieldValue = serde_json::from_value(json!(0))?;

        assert_eq!(flag.parse::<OrderStatus>("bad")?, OrderStatus::Delivered);
        assert_eq!(zero.parse::<OrderStatus>("bad")?, OrderStatus::Pending);

        Ok(())
    }

    #[test]
    fn unparseable_value_is_a_bad_request() -> TestResult {
        let value: FieldValue = serde_json::from_value(json!("lots"))?;

        let error = value.parse::<i64>("Quantity must be a positive integer.").err();

        assert_eq!(
            error.map(|error| error.message),
            Some("Quantity must be a positive integer.".to_string())
        );

        Ok(())
    }

    #[test]
    fn arrays_and_objects_decode_but_do_not_parse() -> TestResult {
        let value: FieldValue = serde_json::from_value(json!({ "status": "delivered" }))?;

        assert!(matches!(value, FieldValue::Other(_)), "decoded as other");
        assert!(value.parse::<OrderStatus>("bad").is_err(), "objects never parse");

        Ok(())
    }

    #[test]
    fn blank_text_is_not_present() -> TestResult {
        let blank: FieldValue = serde_json::from_value(json!("  "))?;
        let zero: FieldValue = serde_json::from_value(json!(0))?;

        assert_eq!(present(Some(blank)), None);
        assert_eq!(present(Some(zero.clone())), Some(zero));

        Ok(())
    }

    #[test]
    fn missing_required_field_names_the_field() {
        let error = required::<FieldValue>(None, "title").err();

        assert_eq!(
            error.map(|error| error.message),
            Some("title: This field is required.".to_string())
        );
    }

    #[test]
    fn amounts_render_with_two_places() {
        assert_eq!(amount(Decimal::new(19, 0)), "19.00");
        assert_eq!(amount(Decimal::new(95, 1)), "9.50");
        assert_eq!(amount(Decimal::new(1250, 2)), "12.50");
    }
}
