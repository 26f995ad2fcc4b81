// 💳 Account Entity - stable identity plus an append-only ledger
//
// "Username is a VALUE derived from the owner, the UUID is IDENTITY"
//
// - movements and movement_dates are co-indexed: movement i happened at date i
// - the ledger only grows; balance is recomputed from it on every read

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::RosterError;

// ============================================================================
// MOVEMENT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MovementKind {
    /// Money in (amount > 0)
    Deposit,

    /// Money out (amount <= 0)
    Withdrawal,
}

impl MovementKind {
    pub fn of(amount: f64) -> Self {
        if amount > 0.0 {
            MovementKind::Deposit
        } else {
            MovementKind::Withdrawal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    // ========================================================================
    // IDENTITY (never changes)
    // ========================================================================
    /// Stable identity (UUID), what the session points at
    pub id: String,

    // ========================================================================
    // VALUES
    // ========================================================================
    /// Full owner name (e.g., "Jonas Schmedtmann")
    pub owner: String,

    /// Initials of the owner, lowercased (e.g., "js")
    pub username: String,

    #[serde(skip_serializing)]
    pub pin: u32,

    /// Interest rate in percent
    pub interest_rate: f64,

    /// Currency (ISO 4217 code: EUR, USD, GBP, ...)
    pub currency: String,

    /// Locale tag used for formatting (e.g., "pt-PT", "en-US")
    pub locale: String,

    // ========================================================================
    // LEDGER (append-only, kept private so the two sequences stay aligned)
    // ========================================================================
    movements: Vec<f64>,
    movement_dates: Vec<DateTime<Utc>>,
}

impl Account {
    /// Create an account from its seed values
    ///
    /// Fails when `movements` and `movement_dates` differ in length.
    pub fn new(
        owner: String,
        pin: u32,
        movements: Vec<f64>,
        movement_dates: Vec<DateTime<Utc>>,
        interest_rate: f64,
        currency: String,
        locale: String,
    ) -> Result<Self, RosterError> {
        if movements.len() != movement_dates.len() {
            return Err(RosterError::MismatchedDates {
                owner,
                movements: movements.len(),
                dates: movement_dates.len(),
            });
        }

        Ok(Account {
            id: uuid::Uuid::new_v4().to_string(),
            username: Self::derive_username(&owner),
            owner,
            pin,
            interest_rate,
            currency,
            locale,
            movements,
            movement_dates,
        })
    }

    /// Lowercased initials of each word in the owner name
    ///
    /// Example: "Steven Thomas Williams" → "stw"
    pub fn derive_username(owner: &str) -> String {
        owner
            .to_lowercase()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or("")
    }

    pub fn movements(&self) -> &[f64] {
        &self.movements
    }

    pub fn movement_dates(&self) -> &[DateTime<Utc>] {
        &self.movement_dates
    }

    /// Movements paired with the time they happened, in ledger order
    pub fn entries(&self) -> impl Iterator<Item = (f64, DateTime<Utc>)> + '_ {
        self.movements
            .iter()
            .copied()
            .zip(self.movement_dates.iter().copied())
    }

    /// Append one movement to the ledger
    pub fn record_movement(&mut self, amount: f64, at: DateTime<Utc>) {
        self.movements.push(amount);
        self.movement_dates.push(at);
    }

    /// Sum of all movements
    pub fn balance(&self) -> f64 {
        self.movements.iter().sum()
    }

    pub fn pin_matches(&self, pin: u32) -> bool {
        self.pin == pin
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dates(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| Utc.with_ymd_and_hms(2020, 1, 1 + i as u32, 12, 0, 0).unwrap())
            .collect()
    }

    fn create_test_account(movements: Vec<f64>) -> Account {
        let n = movements.len();
        Account::new(
            "Jonas Schmedtmann".to_string(),
            1111,
            movements,
            dates(n),
            1.2,
            "EUR".to_string(),
            "pt-PT".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_account_creation() {
        let account = create_test_account(vec![200.0, -50.0]);

        assert!(!account.id.is_empty());
        assert_eq!(account.owner, "Jonas Schmedtmann");
        assert_eq!(account.username, "js");
        assert_eq!(account.first_name(), "Jonas");
        assert_eq!(account.movements(), &[200.0, -50.0]);
        assert_eq!(account.movement_dates().len(), 2);
    }

    #[test]
    fn test_account_rejects_mismatched_dates() {
        let result = Account::new(
            "Sarah Smith".to_string(),
            4444,
            vec![430.0, 1000.0],
            dates(1),
            1.0,
            "USD".to_string(),
            "en-US".to_string(),
        );

        assert_eq!(
            result.unwrap_err(),
            RosterError::MismatchedDates {
                owner: "Sarah Smith".to_string(),
                movements: 2,
                dates: 1,
            }
        );
    }

    #[test]
    fn test_derive_username() {
        assert_eq!(Account::derive_username("Jonas Schmedtmann"), "js");
        assert_eq!(Account::derive_username("Steven Thomas Williams"), "stw");
        assert_eq!(Account::derive_username("  Jessica   Davis "), "jd");
        assert_eq!(Account::derive_username(""), "");
    }

    #[test]
    fn test_record_movement_keeps_ledger_aligned() {
        let mut account = create_test_account(vec![200.0]);
        let at = Utc.with_ymd_and_hms(2021, 6, 1, 8, 30, 0).unwrap();

        account.record_movement(-75.5, at);

        assert_eq!(account.movements(), &[200.0, -75.5]);
        assert_eq!(account.movement_dates().len(), 2);
        assert_eq!(account.movement_dates()[1], at);
        assert_eq!(account.entries().last(), Some((-75.5, at)));
    }

    #[test]
    fn test_balance_is_sum_of_movements() {
        let account = create_test_account(vec![200.0, 450.0, -400.0, 3000.0, -650.0]);
        assert_eq!(account.balance(), 2600.0);

        let empty = create_test_account(vec![]);
        assert_eq!(empty.balance(), 0.0);
    }

    #[test]
    fn test_movement_kind() {
        assert_eq!(MovementKind::of(1.0), MovementKind::Deposit);
        assert_eq!(MovementKind::of(-1.0), MovementKind::Withdrawal);
        assert_eq!(MovementKind::of(0.0), MovementKind::Withdrawal);
        assert_eq!(MovementKind::Deposit.as_str(), "deposit");
        assert_eq!(MovementKind::Withdrawal.as_str(), "withdrawal");
    }

    #[test]
    fn test_serialized_account_hides_pin() {
        let account = create_test_account(vec![200.0]);
        let json = serde_json::to_value(&account).unwrap();

        assert!(json.get("pin").is_none());
        assert_eq!(json["username"], "js");
        assert_eq!(json["movements"], serde_json::json!([200.0]));
    }

    #[test]
    fn test_pin_matches() {
        let account = create_test_account(vec![]);
        assert!(account.pin_matches(1111));
        assert!(!account.pin_matches(1112));
    }
}
