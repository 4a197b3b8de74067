//! In-memory account map backed by a flat accounts file.

use std::{
    collections::HashMap,
    fs::File,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    domain::{
        account::{validate_amount, validate_credentials, Account},
        error::{Error as DomainError, Result as DomainResult},
    },
    error::{Error, Result},
    ledger::{FileLogger, LogEntry, TransactionLogger},
    session::Session,
};

/// Returned by [`AccountStore::get_balance`] for unknown accounts.
pub const MISSING_BALANCE: f64 = -1.0;

/// Owns every [`Account`], keyed by name.
///
/// Each successful mutation rewrites the whole accounts file and then appends
/// an entry to the transaction log. Failed operations touch neither.
#[derive(Debug)]
pub struct AccountStore<L = FileLogger> {
    accounts: HashMap<String, Account>,
    path: PathBuf,
    logger: L,
}

impl AccountStore<FileLogger> {
    /// Build a store from `config` and load whatever the accounts file holds.
    pub fn open(config: &Config) -> Self {
        Self::open_with(config.accounts_path(), FileLogger::new(config.log_path()))
    }
}

impl<L: TransactionLogger> AccountStore<L> {
    /// An empty store; nothing is read from `path` until
    /// [`load_accounts`](Self::load_accounts) is called.
    pub fn new(path: impl Into<PathBuf>, logger: L) -> Self {
        Self {
            accounts: HashMap::new(),
            path: path.into(),
            logger,
        }
    }

    /// Like [`new`](Self::new) followed by a load. A load failure is reported
    /// and the store keeps the accounts read before it.
    pub fn open_with(path: impl Into<PathBuf>, logger: L) -> Self {
        let mut store = Self::new(path, logger);

        match store.load_accounts() {
            Ok(count) => info!(count, path = %store.path.display(), "loaded accounts"),
            Err(err) => error!(path = %store.path.display(), %err, "error loading accounts"),
        }

        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn create_account(&mut self, name: &str, password: &str) -> DomainResult<()> {
        validate_credentials(name, password)?;

        if self.accounts.contains_key(name) {
            return Err(DomainError::AccountExists {
                name: name.to_owned(),
            });
        }

        self.accounts
            .insert(name.to_owned(), Account::new(name, password));
        self.persist();
        self.logger.log(&LogEntry::AccountCreated {
            name: name.to_owned(),
        });
        info!(name, "account created");

        Ok(())
    }

    /// Checks the credentials and, when they match, makes `name` the current
    /// account of `session`. A failed attempt leaves `session` untouched.
    pub fn login(&self, session: &mut Session, name: &str, password: &str) -> Option<&Account> {
        let Some(account) = self
            .accounts
            .get(name)
            .filter(|account| account.check_password(password))
        else {
            debug!(name, "login rejected");
            return None;
        };

        session.begin(account.name());
        self.logger.log(&LogEntry::LoginSucceeded {
            name: name.to_owned(),
        });
        info!(name, "logged in");

        Some(account)
    }

    pub fn logout(&self, session: &mut Session) {
        if let Some(name) = session.end() {
            self.logger.log(&LogEntry::Logout { name: name.clone() });
            info!(%name, "logged out");
        }
    }

    /// Adds `amount` to the named account, whoever is logged in.
    pub fn deposit(&mut self, name: &str, amount: f64) -> DomainResult<()> {
        let account = self.account_mut(name)?;
        validate_amount(amount)?;

        account.deposit(amount);
        self.persist();
        self.logger.log(&LogEntry::Deposit {
            name: name.to_owned(),
            amount,
        });
        debug!(name, amount, "deposit");

        Ok(())
    }

    /// Takes `amount` from the named account if its balance covers it,
    /// whoever is logged in.
    pub fn withdraw(&mut self, name: &str, amount: f64) -> DomainResult<()> {
        let account = self.account_mut(name)?;
        validate_amount(amount)?;

        if !account.withdraw(amount) {
            return Err(DomainError::InsufficientFunds {
                name: name.to_owned(),
                amount,
                balance: account.balance(),
            });
        }

        self.persist();
        self.logger.log(&LogEntry::Withdrawal {
            name: name.to_owned(),
            amount,
        });
        debug!(name, amount, "withdrawal");

        Ok(())
    }

    pub fn balance(&self, name: &str) -> Option<f64> {
        self.accounts.get(name).map(Account::balance)
    }

    /// Balance of `name`, or [`MISSING_BALANCE`] when there is no such
    /// account. Balances never go negative, so the sentinel is unambiguous.
    pub fn get_balance(&self, name: &str) -> f64 {
        self.balance(name).unwrap_or(MISSING_BALANCE)
    }

    /// Read the accounts file into the store, returning how many rows were
    /// loaded. A missing file loads nothing.
    ///
    /// Malformed rows are skipped with a warning; a later row for the same
    /// name replaces an earlier one.
    pub fn load_accounts(&mut self) -> Result<usize> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no accounts file");
            return Ok(0);
        }

        let file = File::open(&self.path)?;
        let mut count = 0;

        for row in crate::csv::read(file) {
            match row {
                Ok(account) => {
                    self.accounts.insert(account.name().to_owned(), account);
                    count += 1;
                }
                Err(Error::MalformedRecord { line, reason }) => {
                    warn!(line, %reason, "skipping malformed account record");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(count)
    }

    /// Overwrite the accounts file with every account, sorted by name.
    pub fn save_accounts(&self) -> Result<()> {
        let file = File::create(&self.path)?;
        let accounts = self
            .accounts
            .values()
            .sorted_by(|a, b| a.name().cmp(b.name()));

        crate::csv::write(accounts, file)
    }

    fn persist(&self) {
        if let Err(err) = self.save_accounts() {
            error!(path = %self.path.display(), %err, "error saving accounts");
        }
    }

    fn account_mut(&mut self, name: &str) -> DomainResult<&mut Account> {
        self.accounts
            .get_mut(name)
            .ok_or_else(|| DomainError::AccountNotFound {
                name: name.to_owned(),
            })
    }
}
