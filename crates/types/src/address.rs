//! Account addresses and deterministic module address derivation.

use crate::errors::Error;
use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Length in bytes of an account address (truncated SHA-256, as Tendermint's
/// `AddressHash`).
pub const ADDRESS_LENGTH: usize = 20;

/// Human readable part used when rendering account addresses.
pub const ACCOUNT_ADDRESS_PREFIX: &str = "cosmos";

/// A 20-byte account address.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccAddress([u8; ADDRESS_LENGTH]);

impl AccAddress {
    /// Derives the address of a module account from the module's name.
    ///
    /// The address is the first 20 bytes of the SHA-256 digest of the name's
    /// UTF-8 bytes, so every node computes the same address for the same
    /// module without any key pair. Collisions are not checked for.
    pub fn from_module_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[..ADDRESS_LENGTH]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Encodes the address as Bech32 under the given human readable part.
    pub fn to_bech32(&self, prefix: &str) -> Result<String, Error> {
        let invalid = |reason: String| Error::InvalidAddressPrefix {
            prefix: prefix.to_string(),
            reason,
        };
        let hrp = Hrp::parse(prefix).map_err(|e| invalid(e.to_string()))?;
        bech32::encode::<Bech32>(hrp, &self.0).map_err(|e| invalid(e.to_string()))
    }

    /// Decodes a Bech32 address, accepting any human readable part. Only the
    /// Bech32 checksum is accepted, not Bech32m, so each address has exactly
    /// one encoding per prefix.
    pub fn from_bech32(address: &str) -> Result<Self, Error> {
        let checked =
            CheckedHrpstring::new::<Bech32>(address).map_err(|e| Error::InvalidAddress {
                address: address.to_string(),
                reason: e.to_string(),
            })?;
        let data: Vec<u8> = checked.byte_iter().collect();
        Self::try_from(data.as_slice())
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for AccAddress {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ADDRESS_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| Error::InvalidAddressLength {
                    expected: ADDRESS_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl Display for AccAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hrp = Hrp::parse_unchecked(ACCOUNT_ADDRESS_PREFIX);
        let encoded = bech32::encode::<Bech32>(hrp, &self.0).map_err(|_| std::fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromStr for AccAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl TryFrom<String> for AccAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccAddress> for String {
    fn from(address: AccAddress) -> Self {
        address.to_string()
    }
}
