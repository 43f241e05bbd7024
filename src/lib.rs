pub mod account;
pub mod amount;
pub mod command;
pub mod csv;
pub mod model;
pub mod session;
pub mod teller;

pub use account::Account;
pub use amount::Amount;
pub use model::{Receipt, Transaction, TransactionKind, TxId};
pub use session::Session;
pub use teller::{Request, Teller};
