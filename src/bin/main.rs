// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use billing_ledger_rs::{
    CustomerAccount, CustomerId, LedgerConfig, LedgerEngine, ObjectStore, Price, StoreProvider,
    Transaction, TransactionKind,
};
use chrono::NaiveDate;
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Billing Ledger - Apply transaction CSV batches to customer accounts
///
/// Reads transactions from a CSV file, applies them against the configured
/// object store, persists the updated account documents, and writes the
/// resulting balances to stdout.
#[derive(Parser, Debug)]
#[command(name = "billing-ledger-rs")]
#[command(about = "Applies a transaction batch to customer billing accounts", long_about = None)]
struct Args {
    /// Path to CSV file with transactions
    ///
    /// Expected format: type,customer,amount,currency,date
    /// Example: cargo run -- transactions.csv > balances.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Store documents under this local directory instead of the
    /// configured provider
    #[arg(long, value_name = "DIR")]
    local_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match LedgerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    if let Some(root) = args.local_root {
        config.provider = StoreProvider::Fs { root };
    }

    let store = match ObjectStore::from_config(&config.provider, &config.store) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error building store: {}", e);
            process::exit(1);
        }
    };
    let engine = LedgerEngine::new(store, config.store);

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let batch = match read_transactions(BufReader::new(file)) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error reading transactions: {}", e);
            process::exit(1);
        }
    };

    let accounts = match engine.apply_transactions(&batch).await {
        Ok(accounts) => accounts,
        Err(e) => {
            eprintln!("Error applying transactions: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = engine.save_accounts(&accounts).await {
        eprintln!("Error persisting accounts: {}", e);
        process::exit(1);
    }

    if let Err(e) = write_balances(&accounts, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `type, customer, amount, currency, date`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "type")]
    tx_type: String,
    customer: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    amount: Option<Decimal>,
    currency: Option<String>,
    date: NaiveDate,
}

impl CsvRecord {
    /// Converts a CSV record to a [`Transaction`].
    ///
    /// Returns `None` for unknown transaction types, missing amounts or
    /// unsupported currencies.
    fn into_transaction(self) -> Option<Transaction> {
        let kind = match self.tx_type.to_lowercase().as_str() {
            "charge" => TransactionKind::Charge,
            "payment" => TransactionKind::Payment,
            _ => return None,
        };

        match self.currency.as_deref() {
            None | Some("") | Some("GBP") => {}
            Some(_) => return None,
        }

        Some(Transaction {
            kind,
            value: Price::gbp(self.amount?),
            customer_id: CustomerId::from(self.customer),
            date: self.date,
        })
    }
}

/// Reads a transaction batch from a CSV reader.
///
/// Streaming parse; malformed rows and invalid records are silently
/// skipped so one bad row never drops the rest of the batch.
///
/// # CSV Format
///
/// Expected columns: `type, customer, amount, currency, date`
/// - `type`: `charge` or `payment`
/// - `customer`: Customer ID (raw string)
/// - `amount`: Decimal amount
/// - `currency`: `GBP` (optional, GBP assumed)
/// - `date`: `yyyy-MM-dd`
///
/// # Example
///
/// ```csv
/// type,customer,amount,currency,date
/// charge,c-1,20.00,GBP,2024-03-05
/// charge,c-2,50.00,,2024-03-05
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader itself fails.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, csv::Error> {
    let mut batch = Vec::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                let Some(tx) = record.into_transaction() else {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping invalid transaction record");
                    continue;
                };
                batch.push(tx);
            }
            Err(e) => {
                #[cfg(debug_assertions)]
                eprintln!("Skipping malformed row: {}", e);
                continue;
            }
        }
    }

    Ok(batch)
}

/// Writes resulting balances to a CSV writer.
///
/// # CSV Format
///
/// Columns: `customer, balance, currency, statements`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_balances<W: Write>(
    accounts: &[CustomerAccount],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["customer", "balance", "currency", "statements"])?;

    for account in accounts {
        wtr.write_record([
            account.customer_id.as_str(),
            &account.credit_account.balance.amount.to_string(),
            &account.credit_account.balance.currency_code.to_string(),
            &account.credit_account.statements.len().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
