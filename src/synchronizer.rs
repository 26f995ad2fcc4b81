// 🔄 Session View Synchronizer
//
// Owns the roster, the active session and the sort order. Every operation
// validates first and mutates second, then re-renders the active account
// synchronously, so the ledger and the view can never drift apart.

use chrono::Utc;
use log::{debug, info};

use crate::entities::{Account, Roster};
use crate::error::{AuthError, CloseError, LoanError, TransferError};
use crate::presentation::{Presenter, SummaryTexts, LOGGED_OUT_WELCOME};
use crate::view::{self, SortOrder, ViewState};

/// A loan is approved if some movement is at least this share of it
pub const LOAN_DEPOSIT_RATIO: f64 = 0.1;

pub struct SessionSynchronizer<P: Presenter> {
    roster: Roster,
    /// Id of the logged-in account; cleared before that account leaves the roster
    session: Option<String>,
    sort: SortOrder,
    presenter: P,
}

impl<P: Presenter> SessionSynchronizer<P> {
    pub fn new(roster: Roster, presenter: P) -> Self {
        Self {
            roster,
            session: None,
            sort: SortOrder::default(),
            presenter,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn active_account(&self) -> Option<&Account> {
        self.session
            .as_deref()
            .and_then(|id| self.roster.find_by_id(id))
    }

    pub fn is_logged_in(&self) -> bool {
        self.active_account().is_some()
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Log in with an exact username and PIN
    ///
    /// On failure nothing changes, including any session already active.
    pub fn authenticate(&mut self, username: &str, pin: u32) -> Result<(), AuthError> {
        let account = self
            .roster
            .find_by_username(username)
            .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;

        if !account.pin_matches(pin) {
            return Err(AuthError::WrongPin(username.to_string()));
        }

        info!("User {} logged in (account {})", account.username, account.id);
        let welcome = format!("Welcome back, {}", account.first_name());
        self.session = Some(account.id.clone());

        self.presenter.set_welcome_text(&welcome);
        self.presenter.set_visible(true);
        self.render();

        Ok(())
    }

    /// Move `amount` from the active account to `to_username`
    pub fn transfer(&mut self, amount: f64, to_username: &str) -> Result<(), TransferError> {
        let source = self.active_account().ok_or(TransferError::NoSession)?;

        if amount.is_nan() || amount <= 0.0 {
            return Err(TransferError::NonPositiveAmount(amount));
        }

        let recipient = self
            .roster
            .find_by_username(to_username)
            .ok_or_else(|| TransferError::UnknownRecipient(to_username.to_string()))?;

        if recipient.id == source.id {
            return Err(TransferError::SelfTransfer);
        }

        let balance = source.balance();
        if balance < amount {
            return Err(TransferError::InsufficientFunds { balance, amount });
        }

        let source_id = source.id.clone();
        let recipient_id = recipient.id.clone();
        let (from, to) = self
            .roster
            .pair_mut(&source_id, &recipient_id)
            .ok_or(TransferError::SelfTransfer)?;

        let now = Utc::now();
        from.record_movement(-amount, now);
        to.record_movement(amount, now);
        info!("Transferred {} from {} to {}", amount, from.username, to.username);

        self.render();
        Ok(())
    }

    /// Grant a loan if some past movement covers a tenth of it
    pub fn request_loan(&mut self, amount: f64) -> Result<(), LoanError> {
        let id = self.session.clone().ok_or(LoanError::NoSession)?;

        if amount.is_nan() || amount <= 0.0 {
            return Err(LoanError::NonPositiveAmount(amount));
        }

        let account = self.roster.find_by_id_mut(&id).ok_or(LoanError::NoSession)?;
        let required = amount * LOAN_DEPOSIT_RATIO;

        if !account.movements().iter().any(|m| *m >= required) {
            return Err(LoanError::NotApproved { amount, required });
        }

        account.record_movement(amount, Utc::now());
        info!("Loan of {} granted to {}", amount, account.username);

        self.render();
        Ok(())
    }

    /// Close the active account after re-confirming its credentials
    pub fn close_account(&mut self, username: &str, pin: u32) -> Result<(), CloseError> {
        let account = self.active_account().ok_or(CloseError::NoSession)?;

        if account.username != username || !account.pin_matches(pin) {
            return Err(CloseError::ConfirmationMismatch);
        }

        let id = account.id.clone();
        self.session = None;
        if let Some(closed) = self.roster.remove(&id) {
            info!("Closed account {} ({})", closed.username, closed.id);
        }

        self.clear_view();
        Ok(())
    }

    /// Flip between ledger order and amount order
    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggle();
        debug!("Sort order is now {}", self.sort.label());

        let active = self.session.as_deref().and_then(|id| self.roster.find_by_id(id));
        if let Some(account) = active {
            view::render_movements(account, self.sort, &mut self.presenter);
        }
    }

    /// Re-render the active account, if any
    pub fn render(&mut self) -> Option<ViewState> {
        let id = self.session.as_deref()?;
        let account = self.roster.find_by_id(id)?;
        Some(view::render(account, self.sort, &mut self.presenter))
    }

    fn clear_view(&mut self) {
        self.presenter.set_visible(false);
        self.presenter.set_welcome_text(LOGGED_OUT_WELCOME);
        self.presenter.set_movement_rows(&[]);
        self.presenter.set_balance_text("");
        self.presenter.set_summary_texts(&SummaryTexts::default());
    }
}

// ============================================================================
// TESTS
// ============================================================================
