// Roster - every known account, unique by username
//
// Accounts leave the roster on closure; nothing is added at runtime.

use crate::entities::account::Account;
use crate::error::RosterError;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    accounts: Vec<Account>,
}

impl Roster {
    /// Build a roster, rejecting duplicate usernames
    pub fn new(accounts: Vec<Account>) -> Result<Self, RosterError> {
        for (i, account) in accounts.iter().enumerate() {
            if accounts[..i].iter().any(|a| a.username == account.username) {
                return Err(RosterError::DuplicateUsername {
                    username: account.username.clone(),
                    owner: account.owner.clone(),
                });
            }
        }

        Ok(Roster { accounts })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Exact, case-sensitive username match
    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Borrow two distinct accounts mutably at once
    ///
    /// Returns `None` if either id is unknown or both ids are the same.
    pub fn pair_mut(&mut self, first: &str, second: &str) -> Option<(&mut Account, &mut Account)> {
        let i = self.accounts.iter().position(|a| a.id == first)?;
        let j = self.accounts.iter().position(|a| a.id == second)?;

        if i == j {
            return None;
        }

        if i < j {
            let (left, right) = self.accounts.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.accounts.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        }
    }

    /// Remove an account by id, returning it
    pub fn remove(&mut self, id: &str) -> Option<Account> {
        let index = self.accounts.iter().position(|a| a.id == id)?;
        Some(self.accounts.remove(index))
    }
}

// ============================================================================
// TESTS
// ============================================================================
