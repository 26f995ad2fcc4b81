// Runtime configuration from command-line arguments and environment
//
//   bankist [--seed <path>]              terminal UI (default)
//   bankist accounts [--json] [--seed]   print the roster and exit
//
// BANKIST_SEED supplies the seed path when --seed is absent.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::entities::Roster;
use crate::seed::{default_roster, load_roster};

pub const SEED_ENV: &str = "BANKIST_SEED";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "bankist", version, about = "Bankist session demo in the terminal")]
pub struct Config {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,

    /// JSON roster to start from; the built-in demo roster when absent
    #[arg(long = "seed", global = true, env = SEED_ENV, value_name = "PATH")]
    pub seed_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the roster and exit
    Accounts {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ui,
    ListAccounts { json: bool },
}

impl Config {
    pub fn mode(&self) -> Mode {
        match self.command {
            Some(ConfigCommand::Accounts { json }) => Mode::ListAccounts { json },
            None => Mode::Ui,
        }
    }

    /// The roster this configuration starts from
    pub fn roster(&self) -> Result<Roster> {
        match &self.seed_path {
            Some(path) => load_roster(path),
            None => default_roster(),
        }
    }
}
