use crate::errors::Error;
use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Denominations can be 3 ~ 128 characters long and support letters, followed by either
/// a letter, a number or a separator ('/', ':', '.', '_' or '-').
pub(crate) const DENOM_PATTERN: &str = r"[a-zA-Z][a-zA-Z0-9/:._-]{2,127}";

/// A validated, unprefixed coin denomination such as `stake` or `uatom`.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Display)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn validate_denom(denom: &str) -> Result<(), Error> {
    static MATCHER: OnceLock<Regex> = OnceLock::new();
    let matcher = MATCHER.get_or_init(|| {
        Regex::new(&format!("^{DENOM_PATTERN}$")).expect("denomination regex is valid")
    });

    if !matcher.is_match(denom) {
        return Err(Error::InvalidDenom {
            denom: denom.to_string(),
        });
    }

    Ok(())
}

impl FromStr for Denom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_denom(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Denom {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_denom(&value)?;
        Ok(Self(value))
    }
}

impl From<Denom> for String {
    fn from(denom: Denom) -> Self {
        denom.0
    }
}
