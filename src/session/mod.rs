//! Current-user bookkeeping for a single interactive front end.

use crate::{
    config::Config,
    domain::{
        account::Account,
        error::{Error, Result},
    },
    ledger::{FileLogger, TransactionLogger},
    store::AccountStore,
};

/// The account currently logged in, if any. Holds the account's name, which
/// is its key in the [`AccountStore`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    current: Option<String>,
}

impl Session {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn begin(&mut self, name: &str) {
        self.current = Some(name.to_owned());
    }

    pub(crate) fn end(&mut self) -> Option<String> {
        self.current.take()
    }
}

/// What a front end talks to: an [`AccountStore`] plus one [`Session`].
///
/// Deposits, withdrawals and balance queries act on the logged-in account and
/// fail with [`Error::NotLoggedIn`] otherwise.
#[derive(Debug)]
pub struct SessionManager<L = FileLogger> {
    store: AccountStore<L>,
    session: Session,
}

impl SessionManager<FileLogger> {
    pub fn open(config: &Config) -> Self {
        Self::new(AccountStore::open(config))
    }
}

impl<L: TransactionLogger> SessionManager<L> {
    pub fn new(store: AccountStore<L>) -> Self {
        Self {
            store,
            session: Session::default(),
        }
    }

    pub fn store(&self) -> &AccountStore<L> {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The logged-in account.
    pub fn current(&self) -> Option<&Account> {
        self.session
            .current()
            .and_then(|name| self.store.get(name))
    }

    pub fn create_account(&mut self, name: &str, password: &str) -> Result<()> {
        self.store.create_account(name, password)
    }

    /// Logging in while another account is active switches to the new one.
    pub fn login(&mut self, name: &str, password: &str) -> Option<&Account> {
        self.store.login(&mut self.session, name, password)
    }

    pub fn logout(&mut self) {
        self.store.logout(&mut self.session);
    }

    pub fn deposit(&mut self, amount: f64) -> Result<()> {
        let name = self.session.current().ok_or(Error::NotLoggedIn)?;
        self.store.deposit(name, amount)
    }

    pub fn withdraw(&mut self, amount: f64) -> Result<()> {
        let name = self.session.current().ok_or(Error::NotLoggedIn)?;
        self.store.withdraw(name, amount)
    }

    pub fn balance(&self) -> Result<f64> {
        let name = self.session.current().ok_or(Error::NotLoggedIn)?;

        self.store
            .balance(name)
            .ok_or_else(|| Error::AccountNotFound {
                name: name.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::LogEntry,
        store::tests::{scratch_dir, Recorder},
    };

    fn manager(label: &str) -> SessionManager<Recorder> {
        SessionManager::new(AccountStore::new(
            scratch_dir(label).join("accounts.txt"),
            Recorder::default(),
        ))
    }

    #[test]
    fn logged_out_operations_fail() {
        let mut manager = manager("logged-out");
        manager.create_account("alice", "pw1").unwrap();

        assert_eq!(manager.deposit(10.0), Err(Error::NotLoggedIn));
        assert_eq!(manager.withdraw(10.0), Err(Error::NotLoggedIn));
        assert_eq!(manager.balance(), Err(Error::NotLoggedIn));
        assert!(manager.current().is_none());
        assert_eq!(manager.store().get_balance("alice"), 0.0);
    }

    #[test]
    fn operations_follow_the_session() {
        let mut manager = manager("session");
        manager.create_account("alice", "pw1").unwrap();
        manager.create_account("bob", "pw2").unwrap();

        manager.login("alice", "pw1").unwrap();
        manager.deposit(100.0).unwrap();
        assert!(manager.withdraw(150.0).is_err());
        assert_eq!(manager.balance(), Ok(100.0));
        manager.withdraw(100.0).unwrap();
        assert_eq!(manager.balance(), Ok(0.0));

        manager.login("bob", "pw2").unwrap();
        manager.deposit(3.0).unwrap();

        assert_eq!(manager.current().map(Account::name), Some("bob"));
        assert_eq!(manager.store().get_balance("alice"), 0.0);
        assert_eq!(manager.store().get_balance("bob"), 3.0);
    }

    #[test]
    fn logout_clears_session() {
        let mut manager = manager("logout");
        manager.create_account("alice", "pw1").unwrap();
        manager.login("alice", "pw1").unwrap();
        assert!(manager.session().is_logged_in());

        manager.logout();

        assert!(!manager.session().is_logged_in());
        assert_eq!(manager.deposit(1.0), Err(Error::NotLoggedIn));
        assert_eq!(
            manager.store().logger().entries().last(),
            Some(&LogEntry::Logout {
                name: "alice".to_owned()
            })
        );
    }

    #[test]
    fn wrong_password_keeps_logged_out() {
        let mut manager = manager("wrong-password");
        manager.create_account("alice", "pw1").unwrap();

        assert!(manager.login("alice", "pw2").is_none());
        assert!(!manager.session().is_logged_in());
    }

    #[test]
    fn open_reads_existing_accounts() {
        let dir = scratch_dir("open");
        let config = Config::default()
            .with_accounts_path(dir.join("accounts.txt"))
            .with_log_path(dir.join("transactions.log"));

        let mut first = SessionManager::open(&config);
        first.create_account("alice", "pw1").unwrap();
        first.login("alice", "pw1").unwrap();
        first.deposit(25.5).unwrap();
        first.logout();

        let mut second = SessionManager::open(&config);
        assert_eq!(second.login("alice", "pw1").map(Account::balance), Some(25.5));

        let log = std::fs::read_to_string(config.log_path()).unwrap();
        let messages: Vec<_> = log
            .lines()
            .filter_map(|line| line.split_once(" - ").map(|(_, message)| message))
            .collect();
        assert_eq!(
            messages,
            [
                "Account created: alice",
                "Login successful: alice",
                "Deposit: 25.5 to alice",
                "Logout: alice",
                "Login successful: alice",
            ]
        );
    }
}
