use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not access accounts file")]
    FileError(#[from] std::io::Error),
    #[error("could not read or write account rows")]
    CsvError(#[from] csv::Error),
    #[error("malformed account record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
