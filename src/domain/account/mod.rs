use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// A named account holding its credentials and balance.
///
/// Field order is the on-disk column order: `name,password,balance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    name: String,
    password: String,
    balance: f64,
}

impl Account {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            balance: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Checks a record built from outside input, such as a stored row,
    /// against the rules [`validate_credentials`] and the withdraw policy
    /// maintain for accounts created in-process.
    pub fn validate(&self) -> Result<()> {
        validate_credentials(&self.name, &self.password)?;

        if self.balance.is_finite() && self.balance >= 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidBalance {
                balance: self.balance,
            })
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn deposit(&mut self, amount: f64) {
        self.balance += amount;
    }

    /// Takes `amount` out of the balance if it is covered. Withdrawing the
    /// whole balance is allowed.
    pub fn withdraw(&mut self, amount: f64) -> bool {
        if amount <= self.balance {
            self.balance -= amount;
            return true;
        }

        false
    }
}

/// Rejects credentials that are empty or would break the line format.
pub fn validate_credentials(name: &str, password: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }

    let forbidden = |c: char| matches!(c, ',' | '\r' | '\n');
    if name.contains(forbidden) || password.contains(forbidden) {
        return Err(Error::InvalidCharacter);
    }

    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAmount { amount })
    }
}
