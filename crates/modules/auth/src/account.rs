use crate::error::Error;
use modacc_types::{AccAddress, Coins};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tendermint::PublicKey;

/// AccountI is an interface used to store coins at a given address within state.
/// It presumes a notion of sequence numbers for replay protection,
/// a notion of account numbers for replay protection for previously pruned accounts,
/// and a pubkey for authentication purposes.
///
/// Many complex conditions can be used in the concrete struct which implements AccountI.
/// Setters return an error when the concrete account forbids the mutation.
pub trait AccountI: Display {
    type Address;
    type PubKey;
    type Coins;
    type Error;

    fn get_address(&self) -> &Self::Address;
    fn set_address(&mut self, address: Self::Address) -> Result<(), Self::Error>;

    fn get_pub_key(&self) -> Option<&Self::PubKey>;
    fn set_pub_key(&mut self, pubkey: Self::PubKey) -> Result<(), Self::Error>;

    fn get_account_number(&self) -> u64;
    fn set_account_number(&mut self, account_number: u64) -> Result<(), Self::Error>;

    fn get_sequence(&self) -> u64;
    fn set_sequence(&mut self, sequence: u64) -> Result<(), Self::Error>;

    fn get_coins(&self) -> &Self::Coins;
    fn set_coins(&mut self, coins: Self::Coins) -> Result<(), Self::Error>;
}

/// Read-only view of an account. Code that only inspects accounts should take
/// this rather than `AccountI`, which also carries the mutators.
pub trait Account {
    /// Account address type
    type Address;
    /// Account public key type
    type PubKey;
    /// Account balance type
    type Coins;

    /// Returns the account's address.
    fn address(&self) -> &Self::Address;

    /// Returns the account's public key, if one has been set.
    fn pub_key(&self) -> Option<&Self::PubKey>;

    /// Returns the account's sequence. (used for replay protection)
    fn sequence(&self) -> u64;

    /// Returns the account's balance.
    fn coins(&self) -> &Self::Coins;
}

impl<T: AccountI> Account for T {
    type Address = T::Address;
    type PubKey = T::PubKey;
    type Coins = T::Coins;

    fn address(&self) -> &Self::Address {
        self.get_address()
    }

    fn pub_key(&self) -> Option<&Self::PubKey> {
        self.get_pub_key()
    }

    fn sequence(&self) -> u64 {
        self.get_sequence()
    }

    fn coins(&self) -> &Self::Coins {
        self.get_coins()
    }
}

pub trait AccountReader {
    type Error;
    type Address;
    type Account: Account;

    fn get_account(&self, address: Self::Address) -> Result<Self::Account, Self::Error>;
}

pub trait AccountKeeper {
    type Error;
    type Account: Account;

    fn set_account(&mut self, account: Self::Account) -> Result<(), Self::Error>;

    fn remove_account(&mut self, account: Self::Account) -> Result<(), Self::Error>;
}

/// The default account: controlled by whoever holds the key behind `public_key`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseAccount {
    pub address: AccAddress,
    pub coins: Coins,
    #[serde(default)]
    pub public_key: Option<PublicKey>,
    #[serde(default)]
    pub account_number: u64,
    #[serde(default)]
    pub sequence: u64,
}

impl BaseAccount {
    pub fn with_address(address: AccAddress) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }
}

impl AccountI for BaseAccount {
    type Address = AccAddress;
    type PubKey = PublicKey;
    type Coins = Coins;
    type Error = Error;

    fn get_address(&self) -> &AccAddress {
        &self.address
    }

    fn set_address(&mut self, address: AccAddress) -> Result<(), Error> {
        self.address = address;
        Ok(())
    }

    fn get_pub_key(&self) -> Option<&PublicKey> {
        self.public_key.as_ref()
    }

    fn set_pub_key(&mut self, pubkey: PublicKey) -> Result<(), Error> {
        self.public_key = Some(pubkey);
        Ok(())
    }

    fn get_account_number(&self) -> u64 {
        self.account_number
    }

    fn set_account_number(&mut self, account_number: u64) -> Result<(), Error> {
        self.account_number = account_number;
        Ok(())
    }

    fn get_sequence(&self) -> u64 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u64) -> Result<(), Error> {
        self.sequence = sequence;
        Ok(())
    }

    fn get_coins(&self) -> &Coins {
        &self.coins
    }

    fn set_coins(&mut self, coins: Coins) -> Result<(), Error> {
        self.coins = coins;
        Ok(())
    }
}

impl Display for BaseAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pub_key = self
            .public_key
            .as_ref()
            .map(|key| format!("{key:?}"))
            .unwrap_or_default();
        write!(
            f,
            "Account:
Address:       {}
Pubkey:        {}
Coins:         {}
AccountNumber: {}
Sequence:      {}",
            self.address, pub_key, self.coins, self.account_number, self.sequence
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Ed25519 public key from RFC 8032, test vector 1.
    pub(crate) fn test_pub_key() -> PublicKey {
        let bytes: [u8; 32] = [
            0xd7, 0x5a, 0x98, 0x01, 0x82, 0xb1, 0x0a, 0xb7, 0xd5, 0x4b, 0xfe, 0xd3, 0xc9, 0x64,
            0x07, 0x3a, 0x0e, 0xe1, 0x72, 0xf3, 0xda, 0xa6, 0x23, 0x25, 0xaf, 0x02, 0x1a, 0x68,
            0xf7, 0x07, 0x51, 0x1a,
        ];
        PublicKey::from_raw_ed25519(&bytes).expect("valid ed25519 key")
    }

    #[test]
    fn base_account_accepts_signer_state() {
        let mut account = BaseAccount::with_address(AccAddress::from([7u8; 20]));
        account.set_pub_key(test_pub_key()).unwrap();
        account.set_sequence(3).unwrap();
        account.set_account_number(9).unwrap();

        assert_eq!(account.pub_key(), Some(&test_pub_key()));
        assert_eq!(account.sequence(), 3);
        assert_eq!(account.get_account_number(), 9);
        assert!(account.to_string().contains("Sequence:      3"));
    }
}
