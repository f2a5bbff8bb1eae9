mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use modacc_auth::config::GenesisConfig;
use modacc_auth::module_account::{ModuleHolderAccount, ModuleMinterAccount};
use modacc_types::address::ACCOUNT_ADDRESS_PREFIX;
use modacc_types::AccAddress;
use std::path::PathBuf;
use tracing::debug;

/// Inspect module accounts: derived addresses and genesis account sets.
#[derive(Parser, Debug)]
#[command(name = "modacc", version, about)]
struct Cli {
    /// Default log level, overridden by `RUST_LOG`.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the address derived from a module name.
    Address {
        name: String,
        /// Bech32 human readable part.
        #[arg(long, default_value = ACCOUNT_ADDRESS_PREFIX)]
        prefix: String,
    },
    /// Print a freshly constructed module account.
    Show {
        name: String,
        /// Construct a minter account instead of a holder account.
        #[arg(long)]
        minter: bool,
    },
    /// Load a genesis config and print its module accounts as JSON.
    Genesis { config: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match cli.command {
        Command::Address { name, prefix } => {
            let address = AccAddress::from_module_name(&name);
            debug!(module = %name, "derived module address");
            println!("{}", address.to_bech32(&prefix)?);
        }
        Command::Show { name, minter } => {
            if minter {
                println!("{}", ModuleMinterAccount::new(name));
            } else {
                println!("{}", ModuleHolderAccount::new(name));
            }
        }
        Command::Genesis { config } => {
            let genesis = GenesisConfig::load(&config)
                .with_context(|| format!("reading genesis config {}", config.display()))?;
            let keeper = genesis.build_keeper()?;

            let accounts = genesis.export_accounts(&keeper)?;
            println!("{}", serde_json::to_string_pretty(&accounts)?);
        }
    }

    Ok(())
}
