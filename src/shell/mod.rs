//! Line-oriented front end over a [`SessionManager`].

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use teller::{SessionManager, TransactionLogger};
use thiserror::Error;

const HELP: &str = "\
commands:
  create <name> <password>
  login <name> <password>
  deposit <amount>
  withdraw <amount>
  balance
  logout
  quit";

#[derive(Debug, PartialEq)]
enum Command {
    Create { name: String, password: String },
    Login { name: String, password: String },
    Deposit(f64),
    Withdraw(f64),
    Balance,
    Logout,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
enum ParseError {
    #[error("Unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Please enter a valid amount!")]
    Amount,
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();

        let credentials = |usage| match words[1..] {
            [name, password] => Ok((name.to_owned(), password.to_owned())),
            _ => Err(ParseError::Usage(usage)),
        };
        let amount = |usage| match words[1..] {
            [amount] => amount.parse::<f64>().map_err(|_| ParseError::Amount),
            _ => Err(ParseError::Usage(usage)),
        };

        match words.first().copied().unwrap_or_default() {
            "create" => credentials("create <name> <password>")
                .map(|(name, password)| Self::Create { name, password }),
            "login" => credentials("login <name> <password>")
                .map(|(name, password)| Self::Login { name, password }),
            "deposit" => amount("deposit <amount>").map(Self::Deposit),
            "withdraw" => amount("withdraw <amount>").map(Self::Withdraw),
            "balance" => Ok(Self::Balance),
            "logout" => Ok(Self::Logout),
            "help" | "" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_owned())),
        }
    }
}

/// Read commands from `input` until it ends or `quit` is entered, answering on
/// `output`.
pub fn run<L: TransactionLogger>(
    manager: &mut SessionManager<L>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    writeln!(output, "Welcome to Bank Management System")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse() {
            Ok(Command::Quit) => break,
            Ok(command) => execute(manager, command, &mut output)?,
            Err(err) => writeln!(output, "{err}")?,
        }
    }

    manager.logout();
    Ok(())
}

fn execute<L: TransactionLogger>(
    manager: &mut SessionManager<L>,
    command: Command,
    output: &mut impl Write,
) -> io::Result<()> {
    match command {
        Command::Create { name, password } => match manager.create_account(&name, &password) {
            Ok(()) => writeln!(output, "Account created successfully! Account Name: {name}"),
            Err(err) => writeln!(output, "Could not create account! {err}"),
        },
        Command::Login { name, password } => match manager.login(&name, &password) {
            Some(_) => writeln!(output, "Logged in as {name}"),
            None => writeln!(output, "Invalid credentials!"),
        },
        Command::Deposit(amount) => match manager.deposit(amount) {
            Ok(()) => writeln!(output, "Deposited: {amount}"),
            Err(err) => writeln!(output, "Deposit failed! {err}"),
        },
        Command::Withdraw(amount) => match manager.withdraw(amount) {
            Ok(()) => writeln!(output, "Withdrawn: {amount}"),
            Err(err) => writeln!(output, "Withdrawal failed! {err}"),
        },
        Command::Balance => match manager.balance() {
            Ok(balance) => writeln!(output, "Current balance: {balance}"),
            Err(err) => writeln!(output, "{err}"),
        },
        Command::Logout => {
            manager.logout();
            writeln!(output, "Logged out successfully!")
        }
        Command::Help => writeln!(output, "{HELP}"),
        Command::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use teller::{AccountStore, LogEntry};

    use super::*;

    struct Discard;

    impl TransactionLogger for Discard {
        fn log(&self, _: &LogEntry) {}
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            "create alice pw1".parse(),
            Ok(Command::Create {
                name: "alice".to_owned(),
                password: "pw1".to_owned()
            })
        );
        assert_eq!("deposit 12.5".parse(), Ok(Command::Deposit(12.5)));
        assert_eq!(" balance ".parse(), Ok(Command::Balance));
        assert_eq!("exit".parse(), Ok(Command::Quit));
        assert_eq!("deposit lots".parse::<Command>(), Err(ParseError::Amount));
        assert_eq!(
            "login alice".parse::<Command>(),
            Err(ParseError::Usage("login <name> <password>"))
        );
        assert_eq!(
            "transfer".parse::<Command>(),
            Err(ParseError::Unknown("transfer".to_owned()))
        );
    }

    #[test]
    fn session_transcript() {
        let path = std::env::temp_dir().join(format!("teller-shell-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let mut manager = SessionManager::new(AccountStore::new(&path, Discard));
        let input = "create alice pw1\nlogin alice pw1\ndeposit 100\nwithdraw 150\nbalance\nquit\nbalance\n";
        let mut output = Vec::new();

        run(&mut manager, input.as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], "Account created successfully! Account Name: alice");
        assert_eq!(lines[2], "Logged in as alice");
        assert_eq!(lines[3], "Deposited: 100");
        assert!(lines[4].starts_with("Withdrawal failed!"));
        assert_eq!(lines[5], "Current balance: 100");
        assert_eq!(lines.len(), 6);
        assert!(!manager.session().is_logged_in());

        let _ = std::fs::remove_file(&path);
    }
}
