//! Ledger loading: JSON ledgers and CSV expense/income exports
//!
//! CSV columns are located by header name, so column order does not matter
//! and extra columns are ignored.
//!
//! - expenses: `date,amount,category,description`
//! - incomes: `date,amount,source,recurring,description`

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Category, Expense, Income, IncomeSource, Ledger};

/// Read a ledger document from any JSON source
pub fn read_ledger_json<R: Read>(reader: R) -> Result<Ledger> {
    let ledger: Ledger = serde_json::from_reader(reader)?;
    debug!(
        incomes = ledger.incomes.len(),
        expenses = ledger.expenses.len(),
        goals = ledger.goals.len(),
        budgets = ledger.budgets.len(),
        reminders = ledger.reminders.len(),
        "Loaded ledger"
    );
    Ok(ledger)
}

/// Load a ledger JSON file from disk
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    let file = File::open(path).map_err(|e| {
        Error::Import(format!("Cannot open ledger {}: {}", path.display(), e))
    })?;
    read_ledger_json(BufReader::new(file))
}

/// Load expenses from a CSV file
pub fn load_expenses_csv(path: &Path) -> Result<Vec<Expense>> {
    parse_expenses_csv(File::open(path)?)
}

/// Load incomes from a CSV file
pub fn load_incomes_csv(path: &Path) -> Result<Vec<Income>> {
    parse_incomes_csv(File::open(path)?)
}

/// Parse expenses: `date,amount,category,description`
///
/// Amounts are stored as magnitudes, so exports that write outflows as
/// negative numbers load the same as ones that don't. Unknown categories
/// fall back to `other`.
pub fn parse_expenses_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_col = required_column(&headers, "date")?;
    let amount_col = required_column(&headers, "amount")?;
    let category_col = column(&headers, "category");
    let description_col = column(&headers, "description");

    let mut expenses = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        let line = row + 2;

        let date = parse_date(field(&record, Some(date_col)).unwrap_or_default())
            .map_err(|e| at_line(line, e))?;
        let amount = parse_amount(field(&record, Some(amount_col)).unwrap_or_default())
            .map_err(|e| at_line(line, e))?
            .abs();

        let category = match field(&record, category_col) {
            Some(raw) => raw.parse::<Category>().unwrap_or_else(|e| {
                warn!("Line {}: {}, using other", line, e);
                Category::Other
            }),
            None => Category::Other,
        };

        expenses.push(Expense {
            id: next_id(expenses.len()),
            amount,
            date,
            category,
            description: field(&record, description_col).map(str::to_string),
        });
    }

    debug!("Parsed {} expenses", expenses.len());
    Ok(expenses)
}

/// Parse incomes: `date,amount,source,recurring,description`
pub fn parse_incomes_csv<R: Read>(reader: R) -> Result<Vec<Income>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_col = required_column(&headers, "date")?;
    let amount_col = required_column(&headers, "amount")?;
    let source_col = column(&headers, "source");
    let recurring_col = column(&headers, "recurring");
    let description_col = column(&headers, "description");

    let mut incomes = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        let line = row + 2;

        let date = parse_date(field(&record, Some(date_col)).unwrap_or_default())
            .map_err(|e| at_line(line, e))?;
        let amount = parse_amount(field(&record, Some(amount_col)).unwrap_or_default())
            .map_err(|e| at_line(line, e))?;
        if amount.is_sign_negative() {
            return Err(Error::Import(format!(
                "Line {}: income amount cannot be negative",
                line
            )));
        }

        let source = match field(&record, source_col) {
            Some(raw) => raw.parse::<IncomeSource>().unwrap_or_else(|e| {
                warn!("Line {}: {}, using other", line, e);
                IncomeSource::Other
            }),
            None => IncomeSource::Other,
        };
        let recurring = match field(&record, recurring_col) {
            Some(raw) => parse_bool(raw).map_err(|e| at_line(line, e))?,
            None => false,
        };

        incomes.push(Income {
            id: next_id(incomes.len()),
            amount,
            date,
            recurring,
            source,
            description: field(&record, description_col).map(str::to_string),
        });
    }

    debug!("Parsed {} incomes", incomes.len());
    Ok(incomes)
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn required_column(headers: &StringRecord, name: &str) -> Result<usize> {
    column(headers, name).ok_or_else(|| Error::Import(format!("Missing '{}' column", name)))
}

/// Non-empty field value; missing and empty cells are both `None`
fn field(record: &StringRecord, col: Option<usize>) -> Option<&str> {
    col.and_then(|i| record.get(i)).filter(|s| !s.is_empty())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n + 1)
}

fn at_line(line: usize, err: Error) -> Error {
    match err {
        Error::Import(msg) => Error::Import(format!("Line {}: {}", line, msg)),
        other => other,
    }
}

/// Parse a date in one of the formats common in spreadsheet exports
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%Y/%m/%d", // 2024/01/15
        "%d.%m.%Y", // 15.01.2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols, thousands separators
/// and accounting-style parentheses for negatives
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<Decimal>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(Error::Import(format!("Unable to parse recurring flag: {}", s))),
    }
}
