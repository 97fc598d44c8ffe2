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

//! # Billing Ledger
//!
//! Per-customer credit ledger persisted as one JSON document per customer
//! in an object store. Batches of incoming transactions are applied with a
//! read-modify-write cycle: fetch (or open) the account, subtract the
//! charge, append a dated statement snapshot, persist.
//!
//! ## Core Components
//!
//! - [`LedgerEngine`]: applies transaction batches and persists accounts
//! - [`ObjectStore`]: gateway to S3, filesystem or in-memory storage
//! - [`CustomerAccount`]: the persisted per-customer document
//! - [`Transaction`]: an incoming charge against a customer
//! - [`LedgerError`]: processing failure taxonomy
//!
//! ## Example
//!
//! ```
//! use billing_ledger_rs::{
//!     CustomerId, LedgerEngine, ObjectStore, Price, StoreProvider, StoreSettings,
//!     Transaction, TransactionKind,
//! };
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), billing_ledger_rs::LedgerError> {
//! let settings = StoreSettings::default();
//! let store = ObjectStore::from_config(&StoreProvider::Memory, &settings)?;
//! let engine = LedgerEngine::new(store, settings);
//!
//! let batch = vec![Transaction {
//!     kind: TransactionKind::Charge,
//!     value: Price::gbp(dec!(20.00)),
//!     customer_id: CustomerId::from("c-1"),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
//! }];
//!
//! let accounts = engine.apply_transactions(&batch).await?;
//! assert_eq!(accounts[0].credit_account.balance.amount, dec!(80.00));
//!
//! engine.save_accounts(&accounts).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Batches process strictly sequentially. There is no locking or
//! conditional writing; concurrent batches touching the same customer race
//! and the last writer wins.

pub mod account;
mod base;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;
mod transaction;

pub use account::{CreditAccount, CustomerAccount, SingleTransaction, Statement};
pub use base::{Currency, CustomerId, Price};
pub use config::{LedgerConfig, StoreProvider, StoreSettings};
pub use engine::LedgerEngine;
pub use error::LedgerError;
pub use store::ObjectStore;
pub use transaction::{Transaction, TransactionKind};
