//! Module accounts: accounts owned by ledger modules (staking pools, fee
//! collectors, mint) instead of by a key holder.

pub mod account;
pub mod config;
pub mod error;
pub mod keeper;
pub mod module_account;

pub use account::{Account, AccountI, AccountKeeper, AccountReader, BaseAccount};
pub use error::Error;
pub use keeper::ModuleAccountKeeper;
pub use module_account::{
    AnyModuleAccount, ModuleAccount, ModuleAccountKind, ModuleHolderAccount, ModuleMinterAccount,
};
