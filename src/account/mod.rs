//! Single-holder account ledger.
//!
//! The account owns its balance, an append-only transaction log and one OTP
//! slot. Every balance change goes through one private helper that sets the
//! balance and appends the matching log entry together, so the balance
//! always equals the sum of logged amounts. A change whose result does not
//! fit in an [`Amount`] is refused before anything is touched.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::Amount;
use crate::model::{Transaction, TransactionKind, TxId};

mod error;
pub use error::{AccountError, Debit};

mod otp;
pub use otp::{Otp, OtpGuard};

/// Rendered history of an account without any transaction.
pub const EMPTY_HISTORY: &str = "No transactions.";

pub struct Account {
    holder_name: String,
    account_number: String,
    balance: Amount,
    transactions: Vec<Transaction>,
    otp: OtpGuard,
    /// Source for transaction ids and OTPs; not cryptographically secure
    rng: StdRng,
}

/// Public API
impl Account {
    /// Empty account seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Empty account with a deterministic id and OTP sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Transaction log in chronological order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// (Re)initialize the account:
    /// - Overwrite holder name and account number
    /// - Clear the transaction log
    /// - Record the initial balance as the first entry
    ///
    /// The outstanding OTP, if any, survives.
    pub fn setup(
        &mut self,
        holder_name: impl Into<String>,
        account_number: impl Into<String>,
        initial_balance: Amount,
    ) {
        self.holder_name = holder_name.into();
        self.account_number = account_number.into();
        self.transactions.clear();
        self.append(TransactionKind::AccountSetup, initial_balance, initial_balance);
    }

    /// Credit `amount` and return the new balance. The sign is not checked.
    ///
    /// Fails without touching the account when the new balance would not fit
    /// in an [`Amount`].
    pub fn deposit(&mut self, amount: Amount) -> Result<Amount, AccountError> {
        self.record(TransactionKind::Deposit, amount)
    }

    /// Debit `amount` and return the new balance.
    ///
    /// Fails without touching the account when `amount` exceeds the balance
    /// or the new balance would be out of range.
    /// The funds check and the debit form one critical section: a concurrent
    /// caller would have to hold a lock across both.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Amount, AccountError> {
        self.ensure_funds(Debit::Withdrawal, amount)?;
        self.record(TransactionKind::Withdrawal, -amount)
    }

    /// Debit `amount` in favour of `recipient` and return the new balance.
    ///
    /// Same funds check and critical section as [`Account::withdraw`]. The
    /// recipient is recorded as a label only.
    pub fn transfer(
        &mut self,
        amount: Amount,
        recipient: impl Into<String>,
    ) -> Result<Amount, AccountError> {
        self.ensure_funds(Debit::Transfer, amount)?;
        let kind = TransactionKind::Transfer {
            recipient: recipient.into(),
        };
        self.record(kind, -amount)
    }

    /// Issue a new OTP, replacing any outstanding one.
    pub fn generate_otp(&mut self) -> &Otp {
        let otp = self.otp.issue(&mut self.rng);
        debug!("otp issued");
        otp
    }

    pub fn current_otp(&self) -> Option<&Otp> {
        self.otp.current()
    }

    pub fn verify_otp(&self, candidate: &str) -> bool {
        self.otp.verify(candidate)
    }

    /// One `{id} - {category}: ${amount}` line per entry, oldest first.
    pub fn transaction_history(&self) -> String {
        if self.transactions.is_empty() {
            return EMPTY_HISTORY.to_string();
        }
        self.transactions
            .iter()
            .map(Transaction::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Private API
impl Account {
    fn with_rng(rng: StdRng) -> Self {
        Self {
            holder_name: String::new(),
            account_number: String::new(),
            balance: Amount::ZERO,
            transactions: Vec::new(),
            otp: OtpGuard::default(),
            rng,
        }
    }

    fn ensure_funds(&self, debit: Debit, amount: Amount) -> Result<(), AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds(debit, self.balance, amount));
        }
        Ok(())
    }

    /// Apply a signed amount to the balance and log it. Returns the new balance.
    fn record(&mut self, kind: TransactionKind, amount: Amount) -> Result<Amount, AccountError> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOutOfRange(self.balance, amount))?;
        self.append(kind, amount, balance);
        Ok(balance)
    }

    /// Log `amount` and set the balance it results in.
    fn append(&mut self, kind: TransactionKind, amount: Amount, balance: Amount) {
        let id = TxId::generate(&mut self.rng);
        debug!(id = %id, category = %kind, amount = %amount, "transaction recorded");
        self.balance = balance;
        self.transactions.push(Transaction::new(id, kind, amount));
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("holder_name", &self.holder_name)
            .field("account_number", &self.account_number)
            .field("balance", &self.balance)
            .field("transactions", &self.transactions.len())
            .finish_non_exhaustive()
    }
}
