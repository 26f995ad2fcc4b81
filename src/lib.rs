// Bankist - Core Library
// Session view synchronizer shared by the terminal UI and the tests

pub mod config;
pub mod entities;
pub mod error;
pub mod format;
pub mod input;
pub mod presentation;
pub mod seed;
pub mod synchronizer;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigCommand, Mode};
pub use entities::{Account, MovementKind, Roster};
pub use error::{AuthError, CloseError, CommandError, LoanError, RosterError, TransferError};
pub use format::{currency_symbol, format_currency, format_movement_date};
pub use input::{parse_amount, parse_pin, Command};
pub use presentation::{MovementRow, Presenter, Screen, SummaryTexts};
pub use seed::{default_roster, load_roster, parse_roster, AccountSeed};
pub use synchronizer::{SessionSynchronizer, LOAN_DEPOSIT_RATIO};
pub use view::{movement_rows, render, SortOrder, ViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
