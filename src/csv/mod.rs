use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::{
    domain::account::Account,
    error::{Error, Result},
};

const FIELDS: usize = 3;

/// Parse [`Account`]s from a reader, one `name,password,balance` row per line.
///
/// Rows are split on every comma, quotes carry no meaning and empty lines are
/// skipped. A row with the wrong number of fields, a non-numeric or negative
/// balance, or credentials an account could not have been created with yields
/// [`Error::MalformedRecord`] and reading carries on with the next row;
/// any other error means the underlying reader failed.
pub fn read(reader: impl Read) -> impl Iterator<Item = Result<Account>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
        .into_records()
        .map(|row| parse_record(&row?))
}

/// Write every account as one row. Fields are never quoted.
pub fn write<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
    writer: impl Write,
) -> Result<()> {
    let mut writer = writer_builder().from_writer(writer);

    for account in accounts {
        writer.serialize(account)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render a single account the way it is stored on disk, without the line
/// terminator.
pub fn to_line(account: &Account) -> Result<String> {
    let mut buffer = Vec::new();
    write(std::iter::once(account), &mut buffer)?;

    let line = String::from_utf8_lossy(&buffer);
    Ok(line.trim_end_matches('\n').to_owned())
}

pub fn from_line(line: &str) -> Result<Account> {
    read(line.as_bytes())
        .next()
        .unwrap_or_else(|| {
            Err(Error::MalformedRecord {
                line: 1,
                reason: "empty line".to_owned(),
            })
        })
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'));
    builder
}

fn parse_record(record: &StringRecord) -> Result<Account> {
    let line = record.position().map_or(0, |position| position.line());

    if record.len() != FIELDS {
        return Err(Error::MalformedRecord {
            line,
            reason: format!("expected {FIELDS} fields, found {}", record.len()),
        });
    }

    let account: Account = record
        .deserialize(None)
        .map_err(|error| Error::MalformedRecord {
            line,
            reason: error.to_string(),
        })?;

    account.validate().map_err(|error| Error::MalformedRecord {
        line,
        reason: error.to_string(),
    })?;

    Ok(account)
}
