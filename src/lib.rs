//! Single-user bank account simulator: accounts kept in a flat text file,
//! operations recorded in an append-only transaction log.

pub mod config;
pub mod csv;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod session;
pub mod store;

pub use config::Config;
pub use domain::account::Account;
pub use error::{Error, Result};
pub use ledger::{FileLogger, LogEntry, TransactionLogger};
pub use session::{Session, SessionManager};
pub use store::{AccountStore, MISSING_BALANCE};
