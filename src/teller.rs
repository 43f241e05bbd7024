//! OTP-gated access to an [`Account`].
//!
//! The teller is the only path the front end uses to mutate the account.
//! Withdrawals and transfers must carry a candidate OTP that matches the
//! account's outstanding code; setup and deposits are never gated.

use thiserror::Error;
use tracing::info;

use crate::Amount;
use crate::account::{Account, AccountError, Debit, Otp};
use crate::model::{Receipt, TransactionKind};

/// Error returned by [`Teller::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TellerError {
    #[error("incorrect OTP entered for {0}")]
    OtpMismatch(Debit),

    #[error(transparent)]
    Account(#[from] AccountError),
}

/// A balance-affecting request coming from the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// (Re)initialize the account.
    Setup {
        holder_name: String,
        account_number: String,
        initial_balance: Amount,
    },
    /// Credit the balance.
    Deposit { amount: Amount },
    /// Debit the balance once `otp` is verified.
    Withdrawal { amount: Amount, otp: String },
    /// Debit in favour of `recipient` once `otp` is verified.
    Transfer {
        amount: Amount,
        recipient: String,
        otp: String,
    },
}

impl Request {
    fn name(&self) -> &'static str {
        match self {
            Request::Setup { .. } => "setup",
            Request::Deposit { .. } => "deposit",
            Request::Withdrawal { .. } => "withdrawal",
            Request::Transfer { .. } => "transfer",
        }
    }
}

pub struct Teller {
    account: Account,
}

/// Public API
impl Teller {
    pub fn new(account: Account) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Issue a fresh OTP for the user to confirm the next debit with.
    pub fn generate_otp(&mut self) -> Otp {
        let otp = self.account.generate_otp().clone();
        info!("otp generated");
        otp
    }

    /// Apply a single request on top of the current account state.
    ///
    /// On error the account is left exactly as it was.
    pub fn apply(&mut self, request: Request) -> Result<Receipt, TellerError> {
        let name = request.name();
        let result = match request {
            Request::Setup {
                holder_name,
                account_number,
                initial_balance,
            } => Ok(self.apply_setup(holder_name, account_number, initial_balance)),
            Request::Deposit { amount } => self.apply_deposit(amount),
            Request::Withdrawal { amount, otp } => self.apply_withdrawal(amount, &otp),
            Request::Transfer {
                amount,
                recipient,
                otp,
            } => self.apply_transfer(amount, recipient, &otp),
        };
        Self::log_result(name, &result);
        result
    }
}

/// Private API
impl Teller {
    /// Small helper to log `apply` results
    fn log_result(request: &str, result: &Result<Receipt, TellerError>) {
        match result {
            Ok(receipt) => {
                info!(
                    amount = %receipt.amount,
                    balance = %receipt.balance,
                    "{request} applied"
                );
            }
            Err(e) => {
                info!(reason = %e, "{request} skipped");
            }
        }
    }

    fn ensure_otp(&self, debit: Debit, otp: &str) -> Result<(), TellerError> {
        if !self.account.verify_otp(otp) {
            return Err(TellerError::OtpMismatch(debit));
        }
        Ok(())
    }

    fn apply_setup(
        &mut self,
        holder_name: String,
        account_number: String,
        initial_balance: Amount,
    ) -> Receipt {
        self.account.setup(holder_name, account_number, initial_balance);
        Receipt {
            kind: TransactionKind::AccountSetup,
            amount: initial_balance,
            balance: self.account.balance(),
        }
    }

    fn apply_deposit(&mut self, amount: Amount) -> Result<Receipt, TellerError> {
        let balance = self.account.deposit(amount)?;
        Ok(Receipt {
            kind: TransactionKind::Deposit,
            amount,
            balance,
        })
    }

    /// Apply a `Request::Withdrawal`:
    /// - Verify the OTP
    /// - Debit the account if funds allow
    fn apply_withdrawal(&mut self, amount: Amount, otp: &str) -> Result<Receipt, TellerError> {
        self.ensure_otp(Debit::Withdrawal, otp)?;
        let balance = self.account.withdraw(amount)?;
        Ok(Receipt {
            kind: TransactionKind::Withdrawal,
            amount,
            balance,
        })
    }

    /// Apply a `Request::Transfer`:
    /// - Verify the OTP
    /// - Debit the account if funds allow, labelling the entry with the recipient
    fn apply_transfer(
        &mut self,
        amount: Amount,
        recipient: String,
        otp: &str,
    ) -> Result<Receipt, TellerError> {
        self.ensure_otp(Debit::Transfer, otp)?;
        let balance = self.account.transfer(amount, recipient.clone())?;
        Ok(Receipt {
            kind: TransactionKind::Transfer { recipient },
            amount,
            balance,
        })
    }
}
