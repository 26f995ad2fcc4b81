// Derived view state - balance, summary and movement rows
// Always recomputed from the ledger, never stored on the account.

use chrono::{DateTime, Utc};

use crate::entities::{Account, MovementKind};
use crate::format::{format_currency, format_movement_date};
use crate::presentation::{MovementRow, Presenter, SummaryTexts};

/// Interest contributions below this are dropped from the total
pub const MIN_INTEREST_CONTRIBUTION: f64 = 1.0;

// ============================================================================
// SORT ORDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ledger order
    #[default]
    Chronological,

    /// By amount, smallest first
    Ascending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Chronological => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Chronological,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Chronological => "chronological",
            SortOrder::Ascending => "by amount",
        }
    }
}

// ============================================================================
// VIEW STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewState {
    pub balance: f64,
    pub inflow: f64,
    pub outflow: f64,
    pub interest: f64,
}

impl ViewState {
    pub fn compute(account: &Account) -> Self {
        let movements = account.movements();

        let inflow = movements.iter().filter(|m| **m > 0.0).sum();
        let outflow = movements
            .iter()
            .filter(|m| **m < 0.0)
            .sum::<f64>()
            .abs();
        let interest = movements
            .iter()
            .filter(|m| **m > 0.0)
            .map(|deposit| deposit * account.interest_rate / 100.0)
            .filter(|int| *int >= MIN_INTEREST_CONTRIBUTION)
            .sum();

        ViewState {
            balance: account.balance(),
            inflow,
            outflow,
            interest,
        }
    }

    pub fn summary_texts(&self, account: &Account) -> SummaryTexts {
        let fmt = |v: f64| format_currency(v, &account.locale, &account.currency);
        SummaryTexts {
            inflow: fmt(self.inflow),
            outflow: fmt(self.outflow),
            interest: fmt(self.interest),
        }
    }
}

// ============================================================================
// MOVEMENT ROWS
// ============================================================================

/// One row per movement in the requested order
///
/// Sorting is stable and moves each date with its amount, so toggling the
/// order twice gives back exactly the ledger order.
pub fn movement_rows(account: &Account, order: SortOrder, now: DateTime<Utc>) -> Vec<MovementRow> {
    let mut entries: Vec<(f64, DateTime<Utc>)> = account.entries().collect();

    if order == SortOrder::Ascending {
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (amount, date))| MovementRow {
            sequence: i + 1,
            kind: MovementKind::of(amount),
            amount,
            amount_text: format_currency(amount, &account.locale, &account.currency),
            date_text: format_movement_date(date, now, &account.locale),
        })
        .collect()
}

/// Write the movement list only
pub fn render_movements<P: Presenter>(account: &Account, order: SortOrder, presenter: &mut P) {
    presenter.set_movement_rows(&movement_rows(account, order, Utc::now()));
}

/// Full projection of one account onto the presenter
pub fn render<P: Presenter>(account: &Account, order: SortOrder, presenter: &mut P) -> ViewState {
    let state = ViewState::compute(account);

    render_movements(account, order, presenter);
    presenter.set_balance_text(&format_currency(
        state.balance,
        &account.locale,
        &account.currency,
    ));
    presenter.set_summary_texts(&state.summary_texts(account));

    state
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Screen;
    use chrono::TimeZone;

    fn create_test_account(movements: Vec<f64>, interest_rate: f64) -> Account {
        let dates = (0..movements.len())
            .map(|i| Utc.with_ymd_and_hms(2019, 11, 1 + i as u32, 9, 0, 0).unwrap())
            .collect();
        Account::new(
            "Jessica Davis".to_string(),
            2222,
            movements,
            dates,
            interest_rate,
            "USD".to_string(),
            "en-US".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_view_state_totals() {
        let account = create_test_account(
            vec![5000.0, 3400.0, -150.0, -790.0, -3210.0, -1000.0, 8500.0, -30.0],
            1.5,
        );
        let state = ViewState::compute(&account);

        assert_eq!(state.balance, 11720.0);
        assert_eq!(state.inflow, 16900.0);
        assert_eq!(state.outflow, 5180.0);
        assert_eq!(state.interest, 75.0 + 51.0 + 127.5);
    }

    #[test]
    fn test_interest_skips_small_contributions() {
        let account = create_test_account(vec![50.0, 0.5], 2.0);
        let state = ViewState::compute(&account);

        assert_eq!(state.interest, 1.0);
    }

    #[test]
    fn test_interest_ignores_withdrawals() {
        let account = create_test_account(vec![-5000.0, 100.0], 1.0);
        assert_eq!(ViewState::compute(&account).interest, 1.0);
    }

    #[test]
    fn test_empty_ledger() {
        let account = create_test_account(vec![], 1.0);
        assert_eq!(ViewState::compute(&account), ViewState::default());
        assert!(movement_rows(&account, SortOrder::Ascending, Utc::now()).is_empty());
    }

    #[test]
    fn test_movement_rows_chronological() {
        let account = create_test_account(vec![200.0, -400.0, 3000.0], 1.0);
        let now = Utc.with_ymd_and_hms(2020, 7, 12, 0, 0, 0).unwrap();
        let rows = movement_rows(&account, SortOrder::Chronological, now);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].sequence, 1);
        assert_eq!(rows[0].kind, MovementKind::Deposit);
        assert_eq!(rows[0].amount_text, "$200.00");
        assert_eq!(rows[0].date_text, "11/01/2019");
        assert_eq!(rows[1].kind, MovementKind::Withdrawal);
        assert_eq!(rows[1].amount_text, "-$400.00");
        assert_eq!(rows[2].sequence, 3);
    }

    #[test]
    fn test_movement_rows_ascending_keeps_dates_attached() {
        let account = create_test_account(vec![200.0, -400.0, 3000.0, -30.0], 1.0);
        let now = Utc.with_ymd_and_hms(2020, 7, 12, 0, 0, 0).unwrap();
        let rows = movement_rows(&account, SortOrder::Ascending, now);

        let amounts: Vec<f64> = rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![-400.0, -30.0, 200.0, 3000.0]);
        assert_eq!(rows[0].date_text, "11/02/2019");
        assert_eq!(rows[1].date_text, "11/04/2019");
        assert_eq!(rows[0].sequence, 1);
    }

    #[test]
    fn test_sort_toggle_pair_restores_order() {
        let account = create_test_account(vec![200.0, 455.23, -306.5, 25000.0, -642.21], 1.2);
        let now = Utc::now();
        let order = SortOrder::default();
        let original = movement_rows(&account, order, now);

        let twice = order.toggle().toggle();
        assert_eq!(twice, SortOrder::Chronological);
        assert_eq!(movement_rows(&account, twice, now), original);
    }

    #[test]
    fn test_render_writes_every_field() {
        let account = create_test_account(vec![1000.0, -250.0], 1.0);
        let mut screen = Screen::new();

        let state = render(&account, SortOrder::Chronological, &mut screen);

        assert_eq!(state.balance, 750.0);
        assert_eq!(screen.balance, "$750.00");
        assert_eq!(screen.summary.inflow, "$1,000.00");
        assert_eq!(screen.summary.outflow, "$250.00");
        assert_eq!(screen.summary.interest, "$10.00");
        assert_eq!(screen.rows.len(), 2);
    }
}
