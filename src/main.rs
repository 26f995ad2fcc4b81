// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bankist::{format_currency, Config, Mode, Roster};

fn main() -> Result<()> {
    // Warnings only by default so log lines don't tear up the terminal UI
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    let roster = config.roster()?;
    info!("Bankist {} starting with {} accounts", bankist::VERSION, roster.len());

    match config.mode() {
        Mode::ListAccounts { json } => list_accounts(&roster, json)?,
        Mode::Ui => run_ui_mode(roster)?,
    }

    Ok(())
}

fn list_accounts(roster: &Roster, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(roster.accounts())
            .context("Failed to serialize accounts")?;
        println!("{}", out);
        return Ok(());
    }

    println!("{:<6} {:<26} {:<4} {:>16}", "USER", "OWNER", "CUR", "BALANCE");
    for account in roster.accounts() {
        println!(
            "{:<6} {:<26} {:<4} {:>16}",
            account.username,
            account.owner,
            account.currency,
            format_currency(account.balance(), &account.locale, &account.currency)
        );
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(roster: Roster) -> Result<()> {
    let sync = bankist::SessionSynchronizer::new(roster, bankist::Screen::new());
    let mut app = ui::App::new(sync);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_roster: Roster) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or list accounts: cargo run -- accounts");
    std::process::exit(1);
}
