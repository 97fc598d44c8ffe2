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

//! Error types for ledger processing.
//!
//! Absence of a document is not an error; the store gateway reports it as
//! `Ok(None)` and callers decide what an absent account means.

use thiserror::Error;

/// Ledger processing errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Object store transport or access failure. Not raised for absent
    /// keys; those come back as `Ok(None)` from the gateway.
    #[error("store operation failed for key {key} in bucket {bucket}")]
    Store {
        bucket: String,
        key: String,
        #[source]
        source: opendal::Error,
    },

    /// A stored document could not be deserialized.
    #[error("failed to decode stored document at key {key}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An account could not be serialized for persistence.
    #[error("failed to encode account document for customer {customer_id}")]
    Encode {
        customer_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Store provider or settings bootstrap failure.
    #[error("configuration error: {0}")]
    Configuration(String),
}
