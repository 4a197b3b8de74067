//! Append-only transaction log.

use std::{
    fmt,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing::error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Operations recorded in the transaction log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    AccountCreated { name: String },
    LoginSucceeded { name: String },
    Logout { name: String },
    Deposit { name: String, amount: f64 },
    Withdrawal { name: String, amount: f64 },
}

impl fmt::Display for LogEntry {
    // Amounts use `{:?}` so whole numbers keep their `.0`, matching the
    // balance column of the accounts file.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountCreated { name } => write!(f, "Account created: {name}"),
            Self::LoginSucceeded { name } => write!(f, "Login successful: {name}"),
            Self::Logout { name } => write!(f, "Logout: {name}"),
            Self::Deposit { name, amount } => write!(f, "Deposit: {amount:?} to {name}"),
            Self::Withdrawal { name, amount } => {
                write!(f, "Withdrawal: {amount:?} from {name}")
            }
        }
    }
}

/// Sink for [`LogEntry`]s.
///
/// Implementations must not fail the caller: a write that cannot be completed
/// is reported and dropped.
pub trait TransactionLogger {
    fn log(&self, entry: &LogEntry);
}

impl<L: TransactionLogger + ?Sized> TransactionLogger for &L {
    fn log(&self, entry: &LogEntry) {
        (**self).log(entry);
    }
}

/// Appends `"<timestamp> - <message>"` lines to a file.
///
/// The file is opened, appended to and closed on every entry.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, message: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);

        writeln!(file, "{timestamp} - {message}")
    }
}

impl TransactionLogger for FileLogger {
    fn log(&self, entry: &LogEntry) {
        if let Err(err) = self.append(&entry.to_string()) {
            error!(path = %self.path.display(), %err, "error writing to transaction log");
        }
    }
}
