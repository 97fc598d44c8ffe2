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

//! Customer account documents.
//!
//! A [`CustomerAccount`] is the unit of persistence: one JSON document per
//! customer. Applying a transaction mutates the balance and appends a
//! [`Statement`] snapshot; statements are append-only and never rewritten.
//!
//! # Example
//!
//! ```
//! use billing_ledger_rs::{CustomerAccount, CustomerId};
//! use rust_decimal_macros::dec;
//!
//! let account = CustomerAccount::open(CustomerId::from("c-1"));
//! assert_eq!(account.credit_account.balance.amount, dec!(100));
//! ```

use crate::base::{CustomerId, Price};
use crate::transaction::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer's persisted billing document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAccount {
    #[serde(alias = "CustomerId")]
    pub customer_id: CustomerId,
    #[serde(alias = "CreditAccount")]
    pub credit_account: CreditAccount,
}

impl CustomerAccount {
    /// Balance every brand-new account starts from, in GBP.
    pub const OPENING_BALANCE: Decimal = Decimal::ONE_HUNDRED;

    /// Opens a fresh account with the opening balance and no history.
    pub fn open(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            credit_account: CreditAccount {
                balance: Price::gbp(Self::OPENING_BALANCE),
                statements: Vec::new(),
            },
        }
    }

    /// Applies an incoming transaction: subtracts the charge and appends a
    /// statement snapshot. Both new and existing accounts go through here.
    pub fn apply(&mut self, transaction: &Transaction) {
        self.credit_account.apply(transaction);
    }
}

/// Running balance plus the full statement history, in append order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAccount {
    #[serde(alias = "Balance")]
    pub balance: Price,
    #[serde(alias = "Statements")]
    pub statements: Vec<Statement>,
}

impl CreditAccount {
    /// Subtracts the transaction's charge from the balance, then records a
    /// statement carrying the post-mutation balance. Balances may go
    /// negative; no floor is enforced.
    pub fn apply(&mut self, transaction: &Transaction) {
        self.balance.amount -= transaction.charge();
        self.statements
            .push(Statement::record(transaction, self.balance.amount));
    }
}

/// One dated entry in the account history.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    #[serde(alias = "Balance")]
    pub balance: Price,
    #[serde(alias = "Date")]
    pub date: NaiveDate,
    #[serde(alias = "Transactions")]
    pub transactions: Vec<SingleTransaction>,
}

impl Statement {
    /// Builds the statement for one applied transaction.
    ///
    /// The balance is a snapshot taken after the mutation. Every statement
    /// carries exactly two records: one of the incoming kind and one tagged
    /// as a payment, both with the transaction's value.
    pub fn record(transaction: &Transaction, balance: Decimal) -> Self {
        Self {
            balance: Price::gbp(balance),
            date: transaction.date,
            transactions: vec![
                SingleTransaction {
                    kind: transaction.kind,
                    value: transaction.value.clone(),
                },
                SingleTransaction {
                    kind: TransactionKind::Payment,
                    value: transaction.value.clone(),
                },
            ],
        }
    }
}

/// A single record inside a statement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleTransaction {
    #[serde(rename = "type", alias = "Type")]
    pub kind: TransactionKind,
    #[serde(alias = "Value")]
    pub value: Price,
}
