//! Query string parsing helpers.

use std::str::FromStr;

use salvo::oapi::extract::QueryParam;

use crate::errors::ApiError;

/// Parse optional query values, treating blank values as absent.
pub(crate) trait QueryValueExt {
    /// Parse the value, answering 400 naming `name` when it does not parse.
    fn parse_or_400<T: FromStr>(self, name: &str) -> Result<Option<T>, ApiError>;

    /// The raw value with surrounding whitespace removed, if non-blank.
    fn non_blank(self) -> Option<String>;
}

impl QueryValueExt for Option<String> {
    fn parse_or_400<T: FromStr>(self, name: &str) -> Result<Option<T>, ApiError> {
        self.non_blank()
            .map(|value| {
                value
                    .parse::<T>()
                    .map_err(|_ignored| ApiError::bad_request(format!("Invalid value for {name}.")))
            })
            .transpose()
    }

    fn non_blank(self) -> Option<String> {
        self.map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }
}

impl QueryValueExt for QueryParam<String, false> {
    fn parse_or_400<T: FromStr>(self, name: &str) -> Result<Option<T>, ApiError> {
        self.into_inner().parse_or_400(name)
    }

    fn non_blank(self) -> Option<String> {
        self.into_inner().non_blank()
    }
}
