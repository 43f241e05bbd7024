//! Error types for account mutations.

use std::fmt;

use thiserror::Error;

use crate::Amount;

/// The kind of debit being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debit {
    Withdrawal,
    Transfer,
}

impl fmt::Display for Debit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Debit::Withdrawal => f.write_str("withdrawal"),
            Debit::Transfer => f.write_str("transfer"),
        }
    }
}

/// Error returned by the balance-changing operations of
/// [`Account`](super::Account).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("insufficient funds for {0}: available {1}, requested {2}")]
    InsufficientFunds(Debit, Amount, Amount),

    /// Balance and signed change
    #[error("balance out of range: balance {0}, change {1}")]
    BalanceOutOfRange(Amount, Amount),
}
