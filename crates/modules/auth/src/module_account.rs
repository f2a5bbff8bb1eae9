//! Accounts owned by ledger modules rather than by a key holder.
//!
//! A module account's address is derived from the module name, and it can
//! never be given a public key or a sequence, so no transaction signature can
//! ever spend from it. Only protocol logic moves its coins.

use crate::account::{AccountI, BaseAccount};
use crate::error::Error;
use modacc_types::{AccAddress, Coins};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tendermint::PublicKey;

/// ModuleAccount defines an account type for pools that hold tokens in an escrow.
pub trait ModuleAccount:
    AccountI<Address = AccAddress, PubKey = PublicKey, Coins = Coins, Error = Error>
{
    /// Returns the name of the module owning the account.
    fn name(&self) -> &str;
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModuleAccountKind {
    #[default]
    Holder,
    Minter,
}

impl Display for ModuleAccountKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Holder => f.write_str("holder"),
            Self::Minter => f.write_str("minter"),
        }
    }
}

/// Persisted shape of a module account: the base account fields plus the name.
#[derive(Serialize, Deserialize)]
pub struct ModuleAccountRecord {
    #[serde(flatten)]
    pub base: BaseAccount,
    pub name: String,
}

/// ModuleHolderAccount defines an account for modules that hold coins on a pool.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "ModuleAccountRecord", into = "ModuleAccountRecord")]
pub struct ModuleHolderAccount {
    base: BaseAccount,
    pool_name: String,
}

impl ModuleHolderAccount {
    pub fn new(name: impl Into<String>) -> Self {
        let pool_name = name.into();
        let address = AccAddress::from_module_name(&pool_name);
        Self {
            base: BaseAccount::with_address(address),
            pool_name,
        }
    }

    pub fn base_account(&self) -> &BaseAccount {
        &self.base
    }
}

impl ModuleAccount for ModuleHolderAccount {
    fn name(&self) -> &str {
        &self.pool_name
    }
}

impl AccountI for ModuleHolderAccount {
    type Address = AccAddress;
    type PubKey = PublicKey;
    type Coins = Coins;
    type Error = Error;

    fn get_address(&self) -> &AccAddress {
        self.base.get_address()
    }

    fn set_address(&mut self, _address: AccAddress) -> Result<(), Error> {
        Err(Error::NotSupported {
            operation: "set_address",
        })
    }

    fn get_pub_key(&self) -> Option<&PublicKey> {
        None
    }

    fn set_pub_key(&mut self, _pubkey: PublicKey) -> Result<(), Error> {
        Err(Error::NotSupported {
            operation: "set_pub_key",
        })
    }

    fn get_account_number(&self) -> u64 {
        self.base.get_account_number()
    }

    fn set_account_number(&mut self, account_number: u64) -> Result<(), Error> {
        self.base.set_account_number(account_number)
    }

    fn get_sequence(&self) -> u64 {
        0
    }

    fn set_sequence(&mut self, _sequence: u64) -> Result<(), Error> {
        Err(Error::NotSupported {
            operation: "set_sequence",
        })
    }

    fn get_coins(&self) -> &Coins {
        self.base.get_coins()
    }

    fn set_coins(&mut self, coins: Coins) -> Result<(), Error> {
        self.base.set_coins(coins)
    }
}

impl Display for ModuleHolderAccount {
    // pubkey and sequence are left out, they are always empty
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Module Holder Account:
Address:  {}
Coins:    {}
Name:     {}",
            self.base.address, self.base.coins, self.pool_name
        )
    }
}

impl TryFrom<ModuleAccountRecord> for ModuleHolderAccount {
    type Error = Error;

    fn try_from(record: ModuleAccountRecord) -> Result<Self, Self::Error> {
        let ModuleAccountRecord { base, name } = record;

        if base.address != AccAddress::from_module_name(&name) {
            return Err(Error::AddressMismatch {
                name,
                address: base.address,
            });
        }
        if base.public_key.is_some() {
            return Err(Error::SignerStateOnModuleAccount {
                name,
                field: "public key",
            });
        }
        if base.sequence != 0 {
            return Err(Error::SignerStateOnModuleAccount {
                name,
                field: "sequence",
            });
        }

        Ok(Self {
            base,
            pool_name: name,
        })
    }
}

impl From<ModuleHolderAccount> for ModuleAccountRecord {
    fn from(account: ModuleHolderAccount) -> Self {
        Self {
            base: account.base,
            name: account.pool_name,
        }
    }
}

/// ModuleMinterAccount is a holder account for a module that the protocol
/// allows to mint new supply. It is checked nowhere in this type: the
/// permission is enforced by whoever performs the mint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct ModuleMinterAccount {
    holder: ModuleHolderAccount,
}

impl ModuleMinterAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            holder: ModuleHolderAccount::new(name),
        }
    }

    pub fn holder(&self) -> &ModuleHolderAccount {
        &self.holder
    }
}

impl ModuleAccount for ModuleMinterAccount {
    fn name(&self) -> &str {
        self.holder.name()
    }
}

impl AccountI for ModuleMinterAccount {
    type Address = AccAddress;
    type PubKey = PublicKey;
    type Coins = Coins;
    type Error = Error;

    fn get_address(&self) -> &AccAddress {
        self.holder.get_address()
    }

    fn set_address(&mut self, address: AccAddress) -> Result<(), Error> {
        self.holder.set_address(address)
    }

    fn get_pub_key(&self) -> Option<&PublicKey> {
        self.holder.get_pub_key()
    }

    fn set_pub_key(&mut self, pubkey: PublicKey) -> Result<(), Error> {
        self.holder.set_pub_key(pubkey)
    }

    fn get_account_number(&self) -> u64 {
        self.holder.get_account_number()
    }

    fn set_account_number(&mut self, account_number: u64) -> Result<(), Error> {
        self.holder.set_account_number(account_number)
    }

    fn get_sequence(&self) -> u64 {
        self.holder.get_sequence()
    }

    fn set_sequence(&mut self, sequence: u64) -> Result<(), Error> {
        self.holder.set_sequence(sequence)
    }

    fn get_coins(&self) -> &Coins {
        self.holder.get_coins()
    }

    fn set_coins(&mut self, coins: Coins) -> Result<(), Error> {
        self.holder.set_coins(coins)
    }
}

impl Display for ModuleMinterAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Module Minter Account:
Address:  {}
Coins:    {}
Name:     {}",
            self.get_address(),
            self.get_coins(),
            self.name()
        )
    }
}

/// A module account of either kind, as stored by the keeper.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnyModuleAccount {
    Holder(ModuleHolderAccount),
    Minter(ModuleMinterAccount),
}

impl AnyModuleAccount {
    pub fn new(name: impl Into<String>, kind: ModuleAccountKind) -> Self {
        match kind {
            ModuleAccountKind::Holder => Self::Holder(ModuleHolderAccount::new(name)),
            ModuleAccountKind::Minter => Self::Minter(ModuleMinterAccount::new(name)),
        }
    }

    pub fn kind(&self) -> ModuleAccountKind {
        match self {
            Self::Holder(_) => ModuleAccountKind::Holder,
            Self::Minter(_) => ModuleAccountKind::Minter,
        }
    }

    fn inner(&self) -> &dyn ModuleAccount {
        match self {
            Self::Holder(account) => account,
            Self::Minter(account) => account,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ModuleAccount {
        match self {
            Self::Holder(account) => account,
            Self::Minter(account) => account,
        }
    }
}

impl From<ModuleHolderAccount> for AnyModuleAccount {
    fn from(account: ModuleHolderAccount) -> Self {
        Self::Holder(account)
    }
}

impl From<ModuleMinterAccount> for AnyModuleAccount {
    fn from(account: ModuleMinterAccount) -> Self {
        Self::Minter(account)
    }
}

impl ModuleAccount for AnyModuleAccount {
    fn name(&self) -> &str {
        self.inner().name()
    }
}

impl AccountI for AnyModuleAccount {
    type Address = AccAddress;
    type PubKey = PublicKey;
    type Coins = Coins;
    type Error = Error;

    fn get_address(&self) -> &AccAddress {
        self.inner().get_address()
    }

    fn set_address(&mut self, address: AccAddress) -> Result<(), Error> {
        self.inner_mut().set_address(address)
    }

    fn get_pub_key(&self) -> Option<&PublicKey> {
        self.inner().get_pub_key()
    }

    fn set_pub_key(&mut self, pubkey: PublicKey) -> Result<(), Error> {
        self.inner_mut().set_pub_key(pubkey)
    }

    fn get_account_number(&self) -> u64 {
        self.inner().get_account_number()
    }

    fn set_account_number(&mut self, account_number: u64) -> Result<(), Error> {
        self.inner_mut().set_account_number(account_number)
    }

    fn get_sequence(&self) -> u64 {
        self.inner().get_sequence()
    }

    fn set_sequence(&mut self, sequence: u64) -> Result<(), Error> {
        self.inner_mut().set_sequence(sequence)
    }

    fn get_coins(&self) -> &Coins {
        self.inner().get_coins()
    }

    fn set_coins(&mut self, coins: Coins) -> Result<(), Error> {
        self.inner_mut().set_coins(coins)
    }
}

impl Display for AnyModuleAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Holder(account) => Display::fmt(account, f),
            Self::Minter(account) => Display::fmt(account, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::tests::test_pub_key;
    use crate::account::Account;
    use proptest::prelude::*;

    #[test]
    fn bonded_tokens_pool_holder() {
        let mut account = ModuleHolderAccount::new("bonded_tokens_pool");

        assert_eq!(
            *account.address(),
            AccAddress::from_module_name("bonded_tokens_pool")
        );
        assert!(account.coins().is_empty());
        assert_eq!(account.name(), "bonded_tokens_pool");

        let err = account.set_pub_key(test_pub_key()).unwrap_err();
        assert!(matches!(
            err,
            Error::NotSupported {
                operation: "set_pub_key"
            }
        ));
        assert_eq!(account.pub_key(), None);
    }

    #[test]
    fn mint_minter_matches_holder_address() {
        let minter = ModuleMinterAccount::new("mint");
        let holder = ModuleHolderAccount::new("mint");

        assert_eq!(minter.address(), holder.address());
        assert_eq!(minter.name(), "mint");

        let rendered = minter.to_string();
        assert!(rendered.starts_with("Module Minter Account:"));
        assert!(rendered.contains(&format!("Address:  {}", holder.address())));
        assert!(rendered.contains("Name:     mint"));
        assert!(holder.to_string().starts_with("Module Holder Account:"));
    }

    #[test]
    fn rendering_omits_signer_fields() {
        let mut account = ModuleHolderAccount::new("fee_collector");
        account.set_coins("10stake,5uatom".parse().unwrap()).unwrap();

        let rendered = account.to_string();
        assert_eq!(
            rendered,
            format!(
                "Module Holder Account:\nAddress:  {}\nCoins:    10stake,5uatom\nName:     fee_collector",
                account.address()
            )
        );
        assert!(!rendered.contains("Pubkey"));
        assert!(!rendered.contains("Sequence"));
    }

    #[test]
    fn address_cannot_be_reassigned() {
        let mut account = AnyModuleAccount::new("distribution", ModuleAccountKind::Minter);
        let before = *account.address();

        assert!(account.set_address(AccAddress::from([1u8; 20])).is_err());
        assert_eq!(*account.address(), before);

        account.set_account_number(4).unwrap();
        assert_eq!(account.get_account_number(), 4);
    }

    #[test]
    fn json_round_trip() {
        let mut account = ModuleHolderAccount::new("bonded_tokens_pool");
        account.set_coins("100stake".parse().unwrap()).unwrap();
        account.set_account_number(2).unwrap();

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["name"], "bonded_tokens_pool");
        assert_eq!(json["address"], account.address().to_string());
        assert_eq!(json["account_number"], 2);

        let back: ModuleHolderAccount = serde_json::from_value(json).unwrap();
        assert_eq!(back, account);

        let minter = AnyModuleAccount::from(ModuleMinterAccount::new("mint"));
        let json = serde_json::to_string(&minter).unwrap();
        assert!(json.starts_with(r#"{"minter":"#));
        let back: AnyModuleAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, minter);
    }

    #[test]
    fn json_rejects_tampered_records() {
        let account = ModuleHolderAccount::new("gov");

        let mut json = serde_json::to_value(&account).unwrap();
        json["name"] = "not_gov".into();
        assert!(serde_json::from_value::<ModuleHolderAccount>(json).is_err());

        let mut json = serde_json::to_value(&account).unwrap();
        json["sequence"] = 1.into();
        assert!(serde_json::from_value::<ModuleHolderAccount>(json).is_err());

        let mut json = serde_json::to_value(&account).unwrap();
        json["public_key"] = serde_json::to_value(test_pub_key()).unwrap();
        assert!(serde_json::from_value::<ModuleHolderAccount>(json).is_err());
    }

    proptest! {
        #[test]
        fn restricted_fields_stay_empty(
            name in "[a-z][a-z_]{0,31}",
            sequence in any::<u64>(),
            minter in any::<bool>(),
        ) {
            let kind = if minter { ModuleAccountKind::Minter } else { ModuleAccountKind::Holder };
            let mut account = AnyModuleAccount::new(name.clone(), kind);

            let rejected = matches!(
                account.set_sequence(sequence),
                Err(Error::NotSupported { operation: "set_sequence" })
            );
            prop_assert!(rejected, "set_sequence({}) was not rejected", sequence);
            prop_assert!(account.set_pub_key(test_pub_key()).is_err());
            prop_assert_eq!(account.sequence(), 0);
            prop_assert_eq!(account.pub_key(), None);
            prop_assert_eq!(account.name(), name.as_str());
            prop_assert_eq!(*account.address(), AccAddress::from_module_name(&name));
        }
    }
}
