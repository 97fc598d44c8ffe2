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

//! Incoming transactions.
//!
//! A [`Transaction`] is the input shape fed to the engine. It is never
//! persisted as-is; applying it produces statement records inside the
//! customer's account document.

use crate::base::{CustomerId, Price};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of a transaction or statement record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum TransactionKind {
    #[default]
    Charge,
    Payment,
}

/// An incoming transaction against a customer's credit account.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "type", alias = "Type")]
    pub kind: TransactionKind,
    #[serde(alias = "Value")]
    pub value: Price,
    #[serde(alias = "CustomerId")]
    pub customer_id: CustomerId,
    #[serde(alias = "Date")]
    pub date: NaiveDate,
}

impl Transaction {
    /// The amount subtracted from the account balance.
    ///
    /// Every transaction is treated as a charge regardless of its kind.
    pub fn charge(&self) -> Decimal {
        self.value.amount
    }
}
