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

//! Ledger engine.
//!
//! The [`LedgerEngine`] owns the store gateway and the key-derivation
//! settings and implements the read-modify-write cycle over per-customer
//! documents.
//!
//! # Processing model
//!
//! - Transactions in a batch are processed strictly in order, one awaited
//!   store round-trip at a time. No pipelining, no fan-out.
//! - Every transaction re-reads its customer's document from the store,
//!   including repeated customer ids within the same batch. The store is
//!   authoritative mid-batch; in-memory results are never chained.
//! - Persisting and applying are separate steps. Concurrent batches for
//!   the same customer race and the last writer wins.
//!
//! # Invariants
//!
//! - A brand-new account starts from the opening balance of 100 GBP.
//! - The engine only ever subtracts from a balance; balances may go
//!   negative.
//! - Statements are append-only and carry post-mutation balance snapshots.

use crate::account::CustomerAccount;
use crate::base::CustomerId;
use crate::config::StoreSettings;
use crate::error::LedgerError;
use crate::store::ObjectStore;
use crate::transaction::Transaction;
use tracing::{debug, error};

/// Content type attached to every persisted account document.
const DOCUMENT_CONTENT_TYPE: &str = "application/json";

/// Applies transaction batches to per-customer account documents.
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    store: ObjectStore,
    settings: StoreSettings,
}

impl LedgerEngine {
    /// Creates an engine over the given gateway and settings.
    pub fn new(store: ObjectStore, settings: StoreSettings) -> Self {
        Self { store, settings }
    }

    /// Applies a batch of transactions, returning one updated account per
    /// input, in input order.
    ///
    /// Each transaction fetches its customer's document from the store. An
    /// absent document opens a fresh account; a present one is mutated in
    /// place. The returned accounts are not persisted; call
    /// [`save_accounts`](Self::save_accounts) for that.
    ///
    /// # Errors
    ///
    /// Propagates the first store or decode failure unchanged. Absence is
    /// never a failure on this path.
    pub async fn apply_transactions(
        &self,
        batch: &[Transaction],
    ) -> Result<Vec<CustomerAccount>, LedgerError> {
        let mut accounts = Vec::with_capacity(batch.len());

        for transaction in batch {
            let key = self.settings.key_for(&transaction.customer_id);
            let mut account = match self.fetch(&key).await? {
                Some(existing) => existing,
                None => CustomerAccount::open(transaction.customer_id.clone()),
            };

            account.apply(transaction);
            debug!(
                customer_id = %transaction.customer_id,
                balance = %account.credit_account.balance.amount,
                "applied transaction"
            );
            accounts.push(account);
        }

        Ok(accounts)
    }

    /// Persists accounts sequentially, one write per account, in input
    /// order. The key is derived from each account's customer id.
    ///
    /// # Errors
    ///
    /// The first failure aborts the loop; accounts already written stay
    /// written. There is no rollback.
    pub async fn save_accounts(&self, accounts: &[CustomerAccount]) -> Result<(), LedgerError> {
        for account in accounts {
            let key = self.settings.key_for(&account.customer_id);
            let body = serde_json::to_vec(account).map_err(|e| {
                error!(customer_id = %account.customer_id, error = %e, "failed to encode account");
                LedgerError::Encode {
                    customer_id: account.customer_id.to_string(),
                    source: e,
                }
            })?;

            self.store.put(&key, body, DOCUMENT_CONTENT_TYPE).await?;
        }

        Ok(())
    }

    /// Reads a customer's account document.
    ///
    /// An absent document yields an empty default account rather than an
    /// error; transport and decode failures still propagate.
    pub async fn customer_account(
        &self,
        customer_id: &CustomerId,
    ) -> Result<CustomerAccount, LedgerError> {
        let key = self.settings.key_for(customer_id);
        Ok(self.fetch(&key).await?.unwrap_or_default())
    }

    async fn fetch(&self, key: &str) -> Result<Option<CustomerAccount>, LedgerError> {
        match self.store.get(key).await? {
            Some(body) => {
                let account = serde_json::from_slice(&body).map_err(|e| {
                    error!(key, error = %e, "failed to decode account document");
                    LedgerError::Decode {
                        key: key.to_owned(),
                        source: e,
                    }
                })?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }
}
