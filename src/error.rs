// Error taxonomy for the session synchronizer
// Every variant is a decline: the operation returned before touching any ledger.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("wrong PIN for user {0}")]
    WrongPin(String),

    #[error("PIN is not a number: {0:?}")]
    InvalidPin(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("no active session")]
    NoSession,

    #[error("amount is not a number: {0:?}")]
    InvalidAmount(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    #[error("unknown recipient: {0}")]
    UnknownRecipient(String),

    #[error("cannot transfer to the active account")]
    SelfTransfer,

    #[error("insufficient funds: balance {balance}, requested {amount}")]
    InsufficientFunds { balance: f64, amount: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("no active session")]
    NoSession,

    #[error("amount is not a number: {0:?}")]
    InvalidAmount(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    /// No movement reaches `required` (10% of the requested amount)
    #[error("loan of {amount} not approved: needs a movement of at least {required}")]
    NotApproved { amount: f64, required: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CloseError {
    #[error("no active session")]
    NoSession,

    #[error("confirmation does not match the active account")]
    ConfirmationMismatch,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("duplicate username {username:?} (owner {owner})")]
    DuplicateUsername { username: String, owner: String },

    #[error("account {owner}: {movements} movements but {dates} dates")]
    MismatchedDates {
        owner: String,
        movements: usize,
        dates: usize,
    },
}

/// Any decline coming out of [`crate::SessionSynchronizer::handle`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("login declined: {0}")]
    Auth(#[from] AuthError),

    #[error("transfer declined: {0}")]
    Transfer(#[from] TransferError),

    #[error("loan declined: {0}")]
    Loan(#[from] LoanError),

    #[error("close declined: {0}")]
    Close(#[from] CloseError),
}
