use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a country polygon on the map, for example `US` or `DE`.
///
/// The backend also reports a `N/A` bucket for peers it could not locate, so
/// the code is not restricted to ISO 3166 alpha-2 values. It only has to be
/// a non-blank string without surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid country code: {0:?}")]
pub struct InvalidCountryCode(pub String);

impl CountryCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = InvalidCountryCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for CountryCode {
    type Error = InvalidCountryCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() || value.trim() != value {
            return Err(InvalidCountryCode(value));
        }
        Ok(Self(value))
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}
