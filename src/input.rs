// Raw commands as typed into the forms
// Numbers arrive as text; anything unparsable is a decline, never a panic.

use log::debug;

use crate::error::{AuthError, CloseError, CommandError, LoanError, TransferError};
use crate::presentation::Presenter;
use crate::synchronizer::SessionSynchronizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, pin: String },
    Transfer { to: String, amount: String },
    Loan { amount: String },
    Close { username: String, pin: String },
    ToggleSort,
}

/// Finite decimal number, surrounding whitespace ignored
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_pin(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

impl<P: Presenter> SessionSynchronizer<P> {
    /// Parse a raw command and run it
    pub fn handle(&mut self, command: Command) -> Result<(), CommandError> {
        let result = self.dispatch(command);
        if let Err(err) = &result {
            debug!("{}", err);
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Login { username, pin } => {
                let pin = parse_pin(&pin).ok_or(AuthError::InvalidPin(pin))?;
                self.authenticate(username.trim(), pin).map_err(CommandError::from)
            }
            Command::Transfer { to, amount } => {
                if !self.is_logged_in() {
                    return Err(TransferError::NoSession.into());
                }
                let value = parse_amount(&amount).ok_or(TransferError::InvalidAmount(amount))?;
                self.transfer(value, to.trim()).map_err(CommandError::from)
            }
            Command::Loan { amount } => {
                if !self.is_logged_in() {
                    return Err(LoanError::NoSession.into());
                }
                let value = parse_amount(&amount).ok_or(LoanError::InvalidAmount(amount))?;
                self.request_loan(value).map_err(CommandError::from)
            }
            Command::Close { username, pin } => {
                if !self.is_logged_in() {
                    return Err(CloseError::NoSession.into());
                }
                // An unparsable PIN can never match the stored one
                let pin = parse_pin(&pin).ok_or(CloseError::ConfirmationMismatch)?;
                self.close_account(username.trim(), pin).map_err(CommandError::from)
            }
            Command::ToggleSort => {
                self.toggle_sort();
                Ok(())
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Screen;
    use crate::seed::default_roster;

    fn create_test_synchronizer() -> SessionSynchronizer<Screen> {
        SessionSynchronizer::new(default_roster().unwrap(), Screen::new())
    }

    fn login(sync: &mut SessionSynchronizer<Screen>, username: &str, pin: &str) -> Result<(), CommandError> {
        sync.handle(Command::Login {
            username: username.to_string(),
            pin: pin.to_string(),
        })
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("250"), Some(250.0));
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount("-5"), Some(-5.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("1111"), Some(1111));
        assert_eq!(parse_pin(" 2222\n"), Some(2222));
        assert_eq!(parse_pin("11.5"), None);
        assert_eq!(parse_pin("-1"), None);
        assert_eq!(parse_pin(""), None);
    }

    #[test]
    fn test_login_command() {
        let mut sync = create_test_synchronizer();

        assert_eq!(
            login(&mut sync, "js", "abcd"),
            Err(CommandError::Auth(AuthError::InvalidPin("abcd".to_string())))
        );
        assert!(!sync.is_logged_in());

        login(&mut sync, " js ", "1111").unwrap();
        assert_eq!(sync.active_account().unwrap().owner, "Jonas Schmedtmann");
        assert_eq!(sync.presenter().welcome, "Welcome back, Jonas");
    }

    #[test]
    fn test_transfer_command_with_bad_amount_declines() {
        let mut sync = create_test_synchronizer();
        login(&mut sync, "jd", "2222").unwrap();
        let before = sync.active_account().unwrap().movements().len();

        let result = sync.handle(Command::Transfer {
            to: "js".to_string(),
            amount: "lots".to_string(),
        });

        assert_eq!(
            result,
            Err(CommandError::Transfer(TransferError::InvalidAmount("lots".to_string())))
        );
        assert_eq!(sync.active_account().unwrap().movements().len(), before);
    }

    #[test]
    fn test_transfer_command_moves_money() {
        let mut sync = create_test_synchronizer();
        login(&mut sync, "jd", "2222").unwrap();

        sync.handle(Command::Transfer {
            to: "js".to_string(),
            amount: "720".to_string(),
        })
        .unwrap();

        assert_eq!(sync.active_account().unwrap().balance(), 11000.0);
        assert_eq!(sync.presenter().balance, "$11,000.00");
    }

    #[test]
    fn test_commands_without_session() {
        let mut sync = create_test_synchronizer();

        assert_eq!(
            sync.handle(Command::Loan { amount: "oops".to_string() }),
            Err(CommandError::Loan(LoanError::NoSession))
        );
        assert_eq!(
            sync.handle(Command::Transfer {
                to: "jd".to_string(),
                amount: "10".to_string(),
            }),
            Err(CommandError::Transfer(TransferError::NoSession))
        );
        assert_eq!(
            sync.handle(Command::Close {
                username: "js".to_string(),
                pin: "1111".to_string(),
            }),
            Err(CommandError::Close(CloseError::NoSession))
        );
    }

    #[test]
    fn test_loan_command() {
        let mut sync = create_test_synchronizer();
        login(&mut sync, "ss", "4444").unwrap();

        assert_eq!(
            sync.handle(Command::Loan { amount: "".to_string() }),
            Err(CommandError::Loan(LoanError::InvalidAmount(String::new())))
        );

        sync.handle(Command::Loan { amount: "5000".to_string() }).unwrap();
        assert_eq!(sync.active_account().unwrap().movements().last(), Some(&5000.0));
    }

    #[test]
    fn test_close_command() {
        let mut sync = create_test_synchronizer();
        login(&mut sync, "stw", "3333").unwrap();

        assert_eq!(
            sync.handle(Command::Close {
                username: "stw".to_string(),
                pin: "x".to_string(),
            }),
            Err(CommandError::Close(CloseError::ConfirmationMismatch))
        );

        sync.handle(Command::Close {
            username: "stw".to_string(),
            pin: "3333".to_string(),
        })
        .unwrap();

        assert!(!sync.is_logged_in());
        assert!(sync.roster().find_by_username("stw").is_none());
        assert_eq!(sync.roster().len(), 3);
    }

    #[test]
    fn test_toggle_sort_command() {
        let mut sync = create_test_synchronizer();
        sync.handle(Command::ToggleSort).unwrap();
        sync.handle(Command::ToggleSort).unwrap();
        assert_eq!(sync.sort_order(), crate::view::SortOrder::Chronological);
    }
}
