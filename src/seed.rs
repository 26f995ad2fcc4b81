// 🌱 Seed Data - the roster the process starts with
// Accounts come from a JSON array; the built-in demo roster uses the same format.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::entities::{Account, Roster};

/// Demo accounts bundled with the binary
pub const DEFAULT_SEED: &str = include_str!("../data/accounts.json");

/// One account as written in a seed file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSeed {
    pub owner: String,
    pub movements: Vec<f64>,
    pub movements_dates: Vec<DateTime<Utc>>,
    pub interest_rate: f64,
    pub pin: u32,
    pub currency: String,
    pub locale: String,
}

impl AccountSeed {
    pub fn into_account(self) -> Result<Account> {
        let account = Account::new(
            self.owner,
            self.pin,
            self.movements,
            self.movements_dates,
            self.interest_rate,
            self.currency,
            self.locale,
        )?;
        Ok(account)
    }
}

/// Parse a roster from seed JSON
pub fn parse_roster(json: &str) -> Result<Roster> {
    let seeds: Vec<AccountSeed> =
        serde_json::from_str(json).context("Failed to parse accounts JSON")?;

    let accounts = seeds
        .into_iter()
        .map(AccountSeed::into_account)
        .collect::<Result<Vec<_>>>()?;

    let roster = Roster::new(accounts)?;
    log::debug!("Parsed roster with {} accounts", roster.len());

    Ok(roster)
}

/// Load a roster from a seed file
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Roster> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read accounts file: {:?}", path.as_ref()))?;

    parse_roster(&content).with_context(|| format!("Invalid accounts file: {:?}", path.as_ref()))
}

/// The built-in demo roster
pub fn default_roster() -> Result<Roster> {
    parse_roster(DEFAULT_SEED).context("Built-in seed data is invalid")
}

// ============================================================================
// TESTS
// ============================================================================
