use crate::account::{AccountI, AccountKeeper, AccountReader};
use crate::error::Error;
use crate::module_account::{AnyModuleAccount, ModuleAccount, ModuleAccountKind};
use modacc_types::AccAddress;
use std::collections::BTreeMap;
use tracing::debug;

/// In-memory registry of module accounts, keyed by address with a name index.
///
/// The registry is where module name uniqueness is enforced; the account
/// constructors themselves accept any name.
#[derive(Clone, Debug, Default)]
pub struct ModuleAccountKeeper {
    accounts: BTreeMap<AccAddress, AnyModuleAccount>,
    names: BTreeMap<String, AccAddress>,
    next_account_number: u64,
}

impl ModuleAccountKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address a module account for `name` has, whether registered or not.
    pub fn module_address(name: &str) -> AccAddress {
        AccAddress::from_module_name(name)
    }

    pub fn register_holder(&mut self, name: &str) -> Result<&AnyModuleAccount, Error> {
        self.register(name, ModuleAccountKind::Holder)
    }

    pub fn register_minter(&mut self, name: &str) -> Result<&AnyModuleAccount, Error> {
        self.register(name, ModuleAccountKind::Minter)
    }

    /// Creates and stores the module account for `name`, assigning it the next
    /// account number.
    pub fn register(
        &mut self,
        name: &str,
        kind: ModuleAccountKind,
    ) -> Result<&AnyModuleAccount, Error> {
        if name.is_empty() {
            return Err(Error::EmptyModuleName);
        }
        if self.names.contains_key(name) {
            return Err(Error::DuplicateModuleName {
                name: name.to_string(),
            });
        }

        let mut account = AnyModuleAccount::new(name, kind);
        let address = *account.get_address();
        if let Some(existing) = self.accounts.get(&address) {
            return Err(Error::AddressInUse {
                name: name.to_string(),
                address,
                existing: existing.name().to_string(),
            });
        }
        account.set_account_number(self.next_account_number)?;
        self.next_account_number += 1;

        debug!(
            module = name,
            %kind,
            %address,
            account_number = account.get_account_number(),
            "registered module account"
        );
        self.names.insert(name.to_string(), address);
        Ok(&*self.accounts.entry(address).or_insert(account))
    }

    /// Returns the module account for `name`, registering it with `kind` if it
    /// does not exist yet.
    pub fn get_or_register(
        &mut self,
        name: &str,
        kind: ModuleAccountKind,
    ) -> Result<&AnyModuleAccount, Error> {
        let found = match self.get_module_account(name) {
            Some(account) => account.kind(),
            None => return self.register(name, kind),
        };
        if found != kind {
            return Err(Error::ModuleKindMismatch {
                name: name.to_string(),
                expected: kind,
                found,
            });
        }
        self.get_module_account(name)
            .ok_or_else(|| Error::AccountNotFound {
                address: Self::module_address(name),
            })
    }

    pub fn get_module_account(&self, name: &str) -> Option<&AnyModuleAccount> {
        self.names
            .get(name)
            .and_then(|address| self.accounts.get(address))
    }

    pub fn get_module_account_mut(&mut self, name: &str) -> Option<&mut AnyModuleAccount> {
        match self.names.get(name) {
            Some(address) => self.accounts.get_mut(address),
            None => None,
        }
    }

    /// Whether the module is registered with a minter account. Mint logic
    /// must check this before creating supply on the module's behalf.
    pub fn can_mint(&self, name: &str) -> bool {
        self.get_module_account(name)
            .map(|account| account.kind() == ModuleAccountKind::Minter)
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnyModuleAccount> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountReader for ModuleAccountKeeper {
    type Error = Error;
    type Address = AccAddress;
    type Account = AnyModuleAccount;

    fn get_account(&self, address: AccAddress) -> Result<AnyModuleAccount, Error> {
        self.accounts
            .get(&address)
            .cloned()
            .ok_or(Error::AccountNotFound { address })
    }
}

impl AccountKeeper for ModuleAccountKeeper {
    type Error = Error;
    type Account = AnyModuleAccount;

    /// Stores `account`, inserting it or replacing the account with the same
    /// name. A stored account never changes kind, and account numbers stay
    /// unique across the registry.
    fn set_account(&mut self, account: AnyModuleAccount) -> Result<(), Error> {
        let address = *account.get_address();
        let name = account.name().to_string();
        if name.is_empty() {
            return Err(Error::EmptyModuleName);
        }
        if address != AccAddress::from_module_name(&name) {
            return Err(Error::AddressMismatch { name, address });
        }
        if let Some(existing) = self.accounts.get(&address) {
            if existing.kind() != account.kind() {
                return Err(Error::ModuleKindMismatch {
                    name,
                    expected: existing.kind(),
                    found: account.kind(),
                });
            }
        }

        let number = account.get_account_number();
        if let Some(holder) = self
            .accounts
            .values()
            .find(|other| *other.get_address() != address && other.get_account_number() == number)
        {
            return Err(Error::AccountNumberInUse {
                name,
                number,
                existing: holder.name().to_string(),
            });
        }

        debug!(module = %name, %address, account_number = number, "storing module account");
        if !self.names.contains_key(&name) {
            self.next_account_number = self
                .next_account_number
                .max(account.get_account_number().saturating_add(1));
        }
        self.names.insert(name, address);
        self.accounts.insert(address, account);
        Ok(())
    }

    fn remove_account(&mut self, account: AnyModuleAccount) -> Result<(), Error> {
        let address = *account.get_address();
        let removed = self
            .accounts
            .remove(&address)
            .ok_or(Error::AccountNotFound { address })?;

        self.names.remove(removed.name());
        debug!(module = removed.name(), %address, "removed module account");
        Ok(())
    }
}
