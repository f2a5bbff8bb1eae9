//! Defines coin types; the balances held by accounts.

use crate::errors::Error;
use crate::serializers::serde_string;
use ibc_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use ibc_proto::google::protobuf::Any;
use ibc_proto::protobuf::Protobuf;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

pub use amount::Amount;
pub use denom::{validate_denom, Denom};

pub mod amount;
pub mod denom;

pub const TYPE_URL: &str = "/cosmos.base.v1beta1.Coin";

/// Coin defines a token with a denomination and an amount.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Coin {
    /// Denomination
    pub denom: Denom,
    /// Amount
    #[serde(with = "serde_string")]
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: &str, amount: impl Into<Amount>) -> Result<Self, Error> {
        Ok(Self {
            denom: denom.parse()?,
            amount: amount.into(),
        })
    }

    /// `is_zero` returns if this represents no money
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl FromStr for Coin {
    type Err = Error;

    fn from_str(coin_str: &str) -> Result<Self, Error> {
        static MATCHER: OnceLock<Regex> = OnceLock::new();
        let matcher = MATCHER.get_or_init(|| {
            Regex::new(&format!("^([0-9]+)({})$", denom::DENOM_PATTERN))
                .expect("coin regex is valid")
        });

        let invalid = || Error::InvalidCoin {
            coin: coin_str.to_string(),
        };
        let captures = matcher.captures(coin_str.trim()).ok_or_else(invalid)?;
        let (amount, denom) = match (captures.get(1), captures.get(2)) {
            (Some(amount), Some(denom)) => (amount.as_str(), denom.as_str()),
            _ => return Err(invalid()),
        };

        Ok(Coin {
            amount: amount.parse()?,
            denom: denom.parse()?,
        })
    }
}

impl TryFrom<ProtoCoin> for Coin {
    type Error = Error;

    fn try_from(proto: ProtoCoin) -> Result<Coin, Self::Error> {
        let denom = Denom::from_str(&proto.denom)?;
        let amount = Amount::from_str(&proto.amount)?;
        Ok(Self { denom, amount })
    }
}

impl From<Coin> for ProtoCoin {
    fn from(coin: Coin) -> ProtoCoin {
        ProtoCoin {
            denom: coin.denom.to_string(),
            amount: coin.amount.to_string(),
        }
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl Protobuf<ProtoCoin> for Coin {}

impl From<Coin> for Any {
    fn from(coin: Coin) -> Self {
        Any {
            type_url: TYPE_URL.to_string(),
            value: coin.encode_vec(),
        }
    }
}

/// An account balance: a set of coins sorted by denomination, holding at most
/// one entry per denomination and no zero amounts.
#[derive(Serialize, Deserialize, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a normalized coin set. Zero-valued coins are dropped; a
    /// denomination appearing twice is an error.
    pub fn new(mut coins: Vec<Coin>) -> Result<Self, Error> {
        coins.retain(|coin| !coin.is_zero());
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));

        if let Some(pair) = coins.windows(2).find(|pair| pair[0].denom == pair[1].denom) {
            return Err(Error::DuplicateDenom {
                denom: pair[0].denom.to_string(),
            });
        }

        Ok(Self(coins))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// Returns the amount held of `denom`, zero if the set has no such coin.
    pub fn amount_of(&self, denom: &Denom) -> Amount {
        self.0
            .binary_search_by(|coin| coin.denom.cmp(denom))
            .map(|idx| self.0[idx].amount)
            .unwrap_or_default()
    }

    pub fn to_proto(&self) -> Vec<ProtoCoin> {
        self.0.iter().cloned().map(Into::into).collect()
    }
}

impl FromStr for Coins {
    type Err = Error;

    /// Parses a comma separated list such as `10stake,5uatom`. The empty
    /// string is the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}

impl Display for Coins {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = Error;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coin() -> Result<(), Error> {
        {
            let coin = Coin::from_str("123stake")?;
            assert_eq!(coin.denom.as_str(), "stake");
            assert_eq!(coin.amount, 123u64.into());
        }

        {
            let coin = Coin::from_str("0x1/:._-")?;
            assert_eq!(coin.denom.as_str(), "x1/:._-");
            assert_eq!(coin.amount, 0u64.into());
        }

        {
            // `!` is not allowed
            let res = Coin::from_str("0xy!");
            assert!(res.is_err());
        }

        Ok(())
    }

    #[test]
    fn test_parse_coin_list() -> Result<(), Error> {
        let coins = Coins::from_str("999den0m,123stake,0zero,1abc")?;
        assert_eq!(coins.len(), 3);
        assert_eq!(coins.to_string(), "1abc,999den0m,123stake");
        assert_eq!(coins.amount_of(&"stake".parse()?), 123u64.into());
        assert_eq!(coins.amount_of(&"uatom".parse()?), Amount::zero());

        assert!(Coins::from_str("")?.is_empty());
        assert_eq!(Coins::empty().to_string(), "");
        Ok(())
    }

    #[test]
    fn test_duplicate_denom_rejected() {
        let err = Coins::from_str("1stake,2stake").unwrap_err();
        assert!(matches!(err, Error::DuplicateDenom { denom } if denom == "stake"));
    }

    #[test]
    fn test_proto_conversion() -> Result<(), Error> {
        let coin = Coin::new("stake", 23u64)?;
        let proto = ProtoCoin::from(coin.clone());
        assert_eq!(proto.denom, "stake");
        assert_eq!(proto.amount, "23");
        assert_eq!(Coin::try_from(proto)?, coin);

        let any = Any::from(coin);
        assert_eq!(any.type_url, TYPE_URL);
        assert!(!any.value.is_empty());
        Ok(())
    }

    #[test]
    fn test_coins_json() {
        let coins = Coins::from_str("5uatom,10stake").unwrap();
        let json = serde_json::to_string(&coins).unwrap();
        assert_eq!(
            json,
            r#"[{"denom":"stake","amount":"10"},{"denom":"uatom","amount":"5"}]"#
        );
        let back: Coins = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coins);

        assert!(serde_json::from_str::<Coins>(
            r#"[{"denom":"stake","amount":"1"},{"denom":"stake","amount":"2"}]"#
        )
        .is_err());
    }
}
