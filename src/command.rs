//! Parsing of front-end input lines.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::Amount;
use crate::amount::AmountError;

/// Errors that can occur when parsing an input line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{command} missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command} got unexpected argument '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Setup {
        holder_name: String,
        account_number: String,
        initial_balance: Amount,
    },
    Deposit(Amount),
    /// OTP is prompted for separately.
    Withdraw(Amount),
    /// OTP is prompted for separately.
    Transfer { amount: Amount, recipient: String },
    GenerateOtp,
    History,
    Info,
    Export(PathBuf),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  setup <holder name> <account number> <initial balance>
  deposit <amount>
  withdraw <amount>              (asks for the OTP)
  transfer <amount> <recipient>  (asks for the OTP; recipient may contain spaces)
  otp                            generate a new OTP
  history                        show the transaction history
  info                           show account details
  export <path>                  write the history as csv
  help
  quit";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ParseError::Empty)?.to_lowercase();
        let args: Vec<&str> = tokens.collect();

        match keyword.as_str() {
            "setup" => {
                // holder name may span several tokens; number and balance are the last two
                let [name @ .., number, balance] = args.as_slice() else {
                    return Err(missing("setup", "account number or initial balance"));
                };
                if name.is_empty() {
                    return Err(missing("setup", "holder name"));
                }
                Ok(Command::Setup {
                    holder_name: name.join(" "),
                    account_number: number.to_string(),
                    initial_balance: balance.parse()?,
                })
            }
            "deposit" => Ok(Command::Deposit(amount_arg("deposit", &args)?)),
            "withdraw" => Ok(Command::Withdraw(amount_arg("withdraw", &args)?)),
            "transfer" => {
                // the recipient label may span several tokens
                let [amount, recipient @ ..] = args.as_slice() else {
                    return Err(missing("transfer", "amount"));
                };
                let amount: Amount = amount.parse()?;
                if recipient.is_empty() {
                    return Err(missing("transfer", "recipient"));
                }
                Ok(Command::Transfer {
                    amount,
                    recipient: recipient.join(" "),
                })
            }
            "otp" => Ok(Command::GenerateOtp),
            "history" => Ok(Command::History),
            "info" => Ok(Command::Info),
            "export" => {
                if args.is_empty() {
                    return Err(missing("export", "path"));
                }
                Ok(Command::Export(PathBuf::from(args.join(" "))))
            }
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(ParseError::UnknownCommand(keyword)),
        }
    }
}

fn missing(command: &'static str, argument: &'static str) -> ParseError {
    ParseError::MissingArgument { command, argument }
}

/// The single amount argument of `deposit` and `withdraw`.
fn amount_arg(command: &'static str, args: &[&str]) -> Result<Amount, ParseError> {
    match args {
        [] => Err(missing(command, "amount")),
        [raw] => Ok(raw.parse()?),
        [_, extra, ..] => Err(ParseError::UnexpectedArgument {
            command,
            argument: extra.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(value: i64) -> Amount {
        Amount::from_cents(value)
    }

    #[test]
    fn parse_setup_with_multi_word_name() {
        let command: Command = "setup Alice Liddell 001 100".parse().unwrap();
        assert_eq!(
            command,
            Command::Setup {
                holder_name: "Alice Liddell".to_string(),
                account_number: "001".to_string(),
                initial_balance: cents(10_000),
            }
        );
    }

    #[test]
    fn parse_setup_requires_all_fields() {
        assert!(matches!(
            "setup 001 100".parse::<Command>(),
            Err(ParseError::MissingArgument {
                argument: "holder name",
                ..
            })
        ));
        assert!(matches!(
            "setup Alice".parse::<Command>(),
            Err(ParseError::MissingArgument {
                command: "setup",
                ..
            })
        ));
    }

    #[test]
    fn parse_money_commands() {
        assert_eq!("deposit 50".parse::<Command>(), Ok(Command::Deposit(cents(5_000))));
        assert_eq!("WITHDRAW 12.5".parse::<Command>(), Ok(Command::Withdraw(cents(1_250))));
        assert_eq!(
            "transfer 30 recipient_acc_42".parse::<Command>(),
            Ok(Command::Transfer {
                amount: cents(3_000),
                recipient: "recipient_acc_42".to_string(),
            })
        );
    }

    #[test]
    fn parse_transfer_with_multi_word_recipient() {
        assert_eq!(
            "transfer 30 Bob   Smith".parse::<Command>(),
            Ok(Command::Transfer {
                amount: cents(3_000),
                recipient: "Bob Smith".to_string(),
            })
        );
    }

    #[test]
    fn parse_export_path_with_spaces() {
        assert_eq!(
            "export my history.csv".parse::<Command>(),
            Ok(Command::Export(PathBuf::from("my history.csv")))
        );
    }

    #[test]
    fn parse_rejects_extra_amount_arguments() {
        assert_eq!(
            "deposit 50 60".parse::<Command>(),
            Err(ParseError::UnexpectedArgument {
                command: "deposit",
                argument: "60".to_string(),
            })
        );
        assert!(matches!(
            "withdraw 5 now".parse::<Command>(),
            Err(ParseError::UnexpectedArgument {
                command: "withdraw",
                ..
            })
        ));
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!("otp".parse::<Command>(), Ok(Command::GenerateOtp));
        assert_eq!("  history ".parse::<Command>(), Ok(Command::History));
        assert_eq!("info".parse::<Command>(), Ok(Command::Info));
        assert_eq!("help".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "export out.csv".parse::<Command>(),
            Ok(Command::Export(PathBuf::from("out.csv")))
        );
    }

    #[test]
    fn parse_returns_error_for_invalid_amount() {
        assert_eq!(
            "deposit abc".parse::<Command>(),
            Err(ParseError::InvalidAmount(AmountError::Invalid(
                "abc".to_string()
            )))
        );
        assert!(matches!(
            "withdraw nan".parse::<Command>(),
            Err(ParseError::InvalidAmount(AmountError::NonFinite(_)))
        ));
    }

    #[test]
    fn parse_returns_error_for_missing_arguments() {
        assert!(matches!(
            "deposit".parse::<Command>(),
            Err(ParseError::MissingArgument {
                command: "deposit",
                argument: "amount"
            })
        ));
        assert!(matches!(
            "transfer 10".parse::<Command>(),
            Err(ParseError::MissingArgument {
                argument: "recipient",
                ..
            })
        ));
        assert!(matches!(
            "transfer".parse::<Command>(),
            Err(ParseError::MissingArgument {
                command: "transfer",
                argument: "amount"
            })
        ));
    }

    #[test]
    fn parse_returns_error_for_unknown_and_empty() {
        assert_eq!(
            "frobnicate 1".parse::<Command>(),
            Err(ParseError::UnknownCommand("frobnicate".to_string()))
        );
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
    }
}
