//! Core domain types for the account ledger.

use std::fmt;

use rand::Rng;

use crate::Amount;

/// Synthetic transaction identifier, e.g. `TXN482913`.
///
/// Drawn at random from a six-digit range; collisions are possible over a
/// long session and are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxId(String);

impl TxId {
    const PREFIX: &'static str = "TXN";

    pub fn generate(rng: &mut impl Rng) -> Self {
        TxId(format!("{}{}", Self::PREFIX, rng.random_range(100_000u32..=999_999)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What caused a balance change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Opening balance recorded by account setup.
    AccountSetup,
    /// Credit to the balance.
    Deposit,
    /// Debit from the balance.
    Withdrawal,
    /// Debit in favour of a recipient; the recipient is only a label.
    Transfer { recipient: String },
}

impl TransactionKind {
    /// Short name used on receipts.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::AccountSetup => "Account setup",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Transfer { .. } => "Transfer",
        }
    }

    pub fn recipient(&self) -> Option<&str> {
        match self {
            TransactionKind::Transfer { recipient } => Some(recipient.as_str()),
            _ => None,
        }
    }
}

/// Category label as it appears in the transaction history.
impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Transfer { recipient } => write!(f, "Transfer to {recipient}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Immutable entry of the transaction log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TxId,
    kind: TransactionKind,
    amount: Amount,
}

impl Transaction {
    pub fn new(id: TxId, kind: TransactionKind, amount: Amount) -> Self {
        Self { id, kind, amount }
    }

    pub fn id(&self) -> &TxId {
        &self.id
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    /// Signed amount; debits are negative.
    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}: ${}", self.id, self.kind, self.amount)
    }
}

/// Confirmation handed back to the user after a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub kind: TransactionKind,
    /// Requested amount, unsigned.
    pub amount: Amount,
    /// Balance after the operation.
    pub balance: Amount,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Receipt ---")?;
        writeln!(f, "Transaction Type: {}", self.kind.name())?;
        if let Some(recipient) = self.kind.recipient() {
            writeln!(f, "Recipient Account: {recipient}")?;
        }
        writeln!(f, "Amount: ${}", self.amount)?;
        writeln!(f, "Remaining Balance: ${}", self.balance)?;
        write!(f, "----------------")
    }
}
