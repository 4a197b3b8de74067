use std::path::{Path, PathBuf};

pub const ACCOUNTS_FILE: &str = "accounts.txt";
pub const LOG_FILE: &str = "transactions.log";

/// Where accounts and the transaction log live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    accounts_path: PathBuf,
    log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accounts_path: PathBuf::from(ACCOUNTS_FILE),
            log_path: PathBuf::from(LOG_FILE),
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_accounts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.accounts_path = path.into();
        self
    }

    #[must_use]
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn accounts_path(&self) -> &Path {
        &self.accounts_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_working_directory_files() {
        let config = Config::default();

        assert_eq!(config.accounts_path(), Path::new("accounts.txt"));
        assert_eq!(config.log_path(), Path::new("transactions.log"));
    }

    #[test]
    fn overrides() {
        let config = Config::default()
            .with_accounts_path("/tmp/a.txt")
            .with_log_path("/tmp/t.log");

        assert_eq!(config.accounts_path(), Path::new("/tmp/a.txt"));
        assert_eq!(config.log_path(), Path::new("/tmp/t.log"));
    }
}
