use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("account name must not be empty")]
    EmptyName,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("account name and password must not contain commas or line breaks")]
    InvalidCharacter,
    #[error("account {name} already exists")]
    AccountExists { name: String },
    #[error("account {name} does not exist")]
    AccountNotFound { name: String },
    #[error("balance must be a non-negative number, got {balance}")]
    InvalidBalance { balance: f64 },
    #[error("amount must be a positive number, got {amount}")]
    InvalidAmount { amount: f64 },
    #[error("withdrawn amount {amount} is bigger than balance {balance} for account {name}")]
    InsufficientFunds {
        name: String,
        amount: f64,
        balance: f64,
    },
    #[error("no account is logged in")]
    NotLoggedIn,
}

pub type Result<T> = std::result::Result<T, Error>;
