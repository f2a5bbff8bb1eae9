//! Genesis configuration listing the module accounts a ledger starts with.
//!
//! ```toml
//! bech32_prefix = "cosmos"
//!
//! [[module_accounts]]
//! name = "bonded_tokens_pool"
//! kind = "holder"
//! coins = "1000stake"
//! ```

use crate::account::AccountI;
use crate::error::Error;
use crate::keeper::ModuleAccountKeeper;
use crate::module_account::{ModuleAccount, ModuleAccountKind};
use modacc_types::address::ACCOUNT_ADDRESS_PREFIX;
use modacc_types::serializers::serde_string;
use modacc_types::{AccAddress, Coins};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GenesisConfig {
    /// Human readable part used when displaying addresses.
    #[serde(default = "default_bech32_prefix")]
    pub bech32_prefix: String,
    #[serde(default)]
    pub module_accounts: Vec<ModuleAccountConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModuleAccountConfig {
    pub name: String,
    #[serde(default)]
    pub kind: ModuleAccountKind,
    /// Initial balance, e.g. `"1000stake,10uatom"`.
    #[serde(default, with = "serde_string")]
    pub coins: Coins,
}

fn default_bech32_prefix() -> String {
    ACCOUNT_ADDRESS_PREFIX.to_string()
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            bech32_prefix: default_bech32_prefix(),
            module_accounts: Vec::new(),
        }
    }
}

impl GenesisConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = contents.parse()?;
        info!(path = %path.display(), "loaded genesis config");
        Ok(config)
    }

    /// Renders `address` with the configured human readable part.
    pub fn display_address(&self, address: &AccAddress) -> Result<String, Error> {
        Ok(address.to_bech32(&self.bech32_prefix)?)
    }

    /// Exports every account in `keeper` as JSON. All addresses, including
    /// the one inside the persisted record, use the configured prefix; the
    /// record still loads back since decoding accepts any prefix.
    pub fn export_accounts(&self, keeper: &ModuleAccountKeeper) -> Result<Vec<Value>, Error> {
        keeper
            .iter()
            .map(|account| {
                let address = self.display_address(account.get_address())?;
                let kind = account.kind().to_string();
                let mut record = serde_json::to_value(account)?;
                if let Some(fields) = record.get_mut(&kind).and_then(Value::as_object_mut) {
                    fields.insert("address".to_string(), Value::from(address.clone()));
                }
                Ok(json!({
                    "name": account.name(),
                    "kind": kind,
                    "address": address,
                    "account": record,
                }))
            })
            .collect()
    }

    /// Registers every configured module account, in order, and applies the
    /// initial balances.
    pub fn build_keeper(&self) -> Result<ModuleAccountKeeper, Error> {
        let mut keeper = ModuleAccountKeeper::new();
        for module in &self.module_accounts {
            keeper.register(&module.name, module.kind)?;
            if let Some(account) = keeper.get_module_account_mut(&module.name) {
                account.set_coins(module.coins.clone())?;
            }
        }
        info!(accounts = keeper.len(), "built module accounts from genesis");
        Ok(keeper)
    }
}

impl FromStr for GenesisConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;
    use crate::module_account::{AnyModuleAccount, ModuleHolderAccount};

    const GENESIS: &str = r#"
bech32_prefix = "osmo"

[[module_accounts]]
name = "bonded_tokens_pool"
coins = "1000stake"

[[module_accounts]]
name = "mint"
kind = "minter"
"#;

    #[test]
    fn builds_keeper_from_toml() {
        let config: GenesisConfig = GENESIS.parse().unwrap();
        assert_eq!(config.bech32_prefix, "osmo");
        assert_eq!(config.module_accounts.len(), 2);
        assert_eq!(config.module_accounts[0].kind, ModuleAccountKind::Holder);

        let keeper = config.build_keeper().unwrap();
        let pool = keeper.get_module_account("bonded_tokens_pool").unwrap();
        assert_eq!(pool.coins().to_string(), "1000stake");
        assert!(keeper.can_mint("mint"));
        assert!(keeper.get_module_account("mint").unwrap().coins().is_empty());

        let rendered = config.display_address(pool.address()).unwrap();
        assert!(rendered.starts_with("osmo1"));
    }

    #[test]
    fn export_uses_configured_prefix() {
        let config: GenesisConfig = GENESIS.parse().unwrap();
        let keeper = config.build_keeper().unwrap();
        let exported = config.export_accounts(&keeper).unwrap();
        assert_eq!(exported.len(), 2);

        let pool = exported
            .iter()
            .find(|entry| entry["name"] == "bonded_tokens_pool")
            .unwrap();
        let address = pool["address"].as_str().unwrap();
        assert!(address.starts_with("osmo1"));
        assert_eq!(pool["account"]["holder"]["address"], address);

        let record: ModuleHolderAccount =
            serde_json::from_value(pool["account"]["holder"].clone()).unwrap();
        let stored = keeper.get_module_account("bonded_tokens_pool").unwrap();
        assert_eq!(&AnyModuleAccount::from(record), stored);
    }

    #[test]
    fn defaults_and_errors() {
        let config: GenesisConfig = "".parse().unwrap();
        assert_eq!(config, GenesisConfig::default());

        let duplicate = r#"
[[module_accounts]]
name = "gov"
[[module_accounts]]
name = "gov"
kind = "minter"
"#;
        let config: GenesisConfig = duplicate.parse().unwrap();
        assert!(matches!(
            config.build_keeper(),
            Err(Error::DuplicateModuleName { .. })
        ));

        let bad_coins = "[[module_accounts]]\nname = \"gov\"\ncoins = \"1!\"\n";
        assert!(matches!(
            bad_coins.parse::<GenesisConfig>(),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("modacc-genesis-{}.toml", std::process::id()));
        std::fs::write(&path, GENESIS).unwrap();
        let config = GenesisConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let keeper = config.build_keeper().unwrap();
        let mut names: Vec<_> = keeper.iter().map(|account| account.name()).collect();
        names.sort();
        assert_eq!(names, ["bonded_tokens_pool", "mint"]);
        assert!(matches!(
            GenesisConfig::load(path),
            Err(Error::Io(_))
        ));
    }
}
