//! Line-oriented terminal front end.
//!
//! A session consumes a stream of input lines, turns each into a
//! [`Command`], runs it through the [`Teller`] and writes the outcome for
//! the user. Withdrawals and transfers take the following line as the OTP
//! candidate.

use std::io::{self, Write};

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::Account;
use crate::account::AccountError;
use crate::command::{Command, HELP};
use crate::csv::export_history;
use crate::model::{Receipt, TransactionKind};
use crate::teller::{Request, Teller, TellerError};

pub struct Session<W> {
    teller: Teller,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(account: Account, out: W) -> Self {
        Self {
            teller: Teller::new(account),
            out,
        }
    }

    pub fn into_parts(self) -> (Teller, W) {
        (self.teller, self.out)
    }

    /// Run the session until `quit` or until the input stream ends.
    ///
    /// Only failures to write output are returned; every user error is
    /// reported on the output and the session continues.
    pub async fn run(&mut self, mut lines: impl Stream<Item = String> + Unpin) -> io::Result<()> {
        while let Some(line) = lines.next().await {
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    warn!(input = line.trim(), "{e}");
                    writeln!(self.out, "Invalid Input: {e}")?;
                    self.out.flush()?;
                    continue;
                }
            };

            let keep_going = self.dispatch(command, &mut lines).await?;
            self.out.flush()?;

            if !keep_going {
                break;
            }
        }

        info!("session ended");
        Ok(())
    }
}

/// Private API
impl<W: Write> Session<W> {
    /// Ask for the OTP and read it from the next line. `None` when the input ended.
    async fn prompt_otp(
        &mut self,
        lines: &mut (impl Stream<Item = String> + Unpin),
    ) -> io::Result<Option<String>> {
        writeln!(self.out, "Enter OTP:")?;
        self.out.flush()?;
        let otp = lines.next().await.map(|line| line.trim().to_string());
        if otp.is_none() {
            warn!("input ended while waiting for an OTP, operation dropped");
        }
        Ok(otp)
    }

    /// Run one command. Returns false when the session should stop.
    async fn dispatch(
        &mut self,
        command: Command,
        lines: &mut (impl Stream<Item = String> + Unpin),
    ) -> io::Result<bool> {
        match command {
            Command::Setup {
                holder_name,
                account_number,
                initial_balance,
            } => self.submit(Request::Setup {
                holder_name,
                account_number,
                initial_balance,
            })?,
            Command::Deposit(amount) => self.submit(Request::Deposit { amount })?,
            Command::Withdraw(amount) => {
                let Some(otp) = self.prompt_otp(lines).await? else {
                    return Ok(false);
                };
                self.submit(Request::Withdrawal { amount, otp })?;
            }
            Command::Transfer { amount, recipient } => {
                let Some(otp) = self.prompt_otp(lines).await? else {
                    return Ok(false);
                };
                self.submit(Request::Transfer {
                    amount,
                    recipient,
                    otp,
                })?;
            }
            Command::GenerateOtp => {
                let otp = self.teller.generate_otp();
                writeln!(self.out, "Your OTP is: {otp}")?;
            }
            Command::History => {
                writeln!(self.out, "{}", self.teller.account().transaction_history())?;
            }
            Command::Info => self.write_info()?,
            Command::Export(path) => {
                match export_history(&path, self.teller.account().transactions()) {
                    Ok(()) => writeln!(self.out, "History exported to {}", path.display())?,
                    Err(e) => {
                        warn!("{e}");
                        writeln!(self.out, "Export failed: {e}")?;
                    }
                }
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn submit(&mut self, request: Request) -> io::Result<()> {
        match self.teller.apply(request) {
            Ok(receipt) => self.write_success(&receipt),
            Err(TellerError::OtpMismatch(_)) => {
                writeln!(self.out, "OTP Failed: Incorrect OTP entered.")
            }
            Err(TellerError::Account(e @ AccountError::InsufficientFunds(..))) => {
                writeln!(self.out, "Insufficient Funds: {e}")
            }
            Err(TellerError::Account(e @ AccountError::BalanceOutOfRange(..))) => {
                writeln!(self.out, "Transaction Failed: {e}")
            }
        }
    }

    fn write_success(&mut self, receipt: &Receipt) -> io::Result<()> {
        match &receipt.kind {
            TransactionKind::AccountSetup => {
                writeln!(self.out, "Account setup complete!")?;
                return self.write_info();
            }
            TransactionKind::Deposit => writeln!(
                self.out,
                "Deposit successful! New balance: ${}",
                receipt.balance
            )?,
            debit => writeln!(
                self.out,
                "{} successful! Remaining balance: ${}",
                debit.name(),
                receipt.balance
            )?,
        }
        writeln!(self.out, "{receipt}")
    }

    fn write_info(&mut self) -> io::Result<()> {
        let account = self.teller.account();
        writeln!(
            self.out,
            "Account Holder: {}\nAccount Number: {}\nBalance: ${}",
            account.holder_name(),
            account.account_number(),
            account.balance()
        )
    }
}
