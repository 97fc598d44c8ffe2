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

//! Object store gateway.
//!
//! Thin wrapper over an [`opendal::Operator`]. Keys are opaque here; the
//! gateway reads and writes bytes and never interprets document content.
//! An absent key is a first-class outcome, not an error.

use crate::config::{StoreProvider, StoreSettings};
use crate::error::LedgerError;
use opendal::services;
use opendal::{ErrorKind, Operator};
use tracing::{debug, error, info};

/// Gateway to the object store holding account documents.
///
/// Cheap to clone; clones share the underlying operator and are safe to
/// use concurrently.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    op: Operator,
    bucket: String,
}

impl ObjectStore {
    /// Builds a gateway for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Configuration`] when the operator cannot be
    /// constructed from the given provider settings.
    pub fn from_config(
        provider: &StoreProvider,
        settings: &StoreSettings,
    ) -> Result<Self, LedgerError> {
        let op = match provider {
            StoreProvider::S3 {
                endpoint,
                region,
                access_key_id,
                secret_access_key,
            } => {
                let builder = services::S3::default()
                    .bucket(&settings.bucket)
                    .endpoint(endpoint)
                    .region(region)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key);
                Operator::new(builder)
                    .map_err(|e| {
                        LedgerError::Configuration(format!("failed to build S3 operator: {e}"))
                    })?
                    .finish()
            }
            StoreProvider::Fs { root } => {
                let root = root.join(&settings.bucket);
                let builder = services::Fs::default().root(&root.to_string_lossy());
                Operator::new(builder)
                    .map_err(|e| {
                        LedgerError::Configuration(format!(
                            "failed to build filesystem operator: {e}"
                        ))
                    })?
                    .finish()
            }
            StoreProvider::Memory => {
                let builder = services::Memory::default();
                Operator::new(builder)
                    .map_err(|e| {
                        LedgerError::Configuration(format!("failed to build memory operator: {e}"))
                    })?
                    .finish()
            }
        };

        Ok(Self {
            op,
            bucket: settings.bucket.clone(),
        })
    }

    /// Name of the bucket this gateway reads and writes.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Fetches the object at `key`.
    ///
    /// Returns `Ok(None)` when the key does not exist. Every other failure
    /// surfaces as [`LedgerError::Store`] with bucket and key context.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        debug!(bucket = %self.bucket, key, "reading object");
        match self.op.read(key).await {
            Ok(buffer) => Ok(Some(buffer.to_vec())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(bucket = %self.bucket, key, "object not found");
                Ok(None)
            }
            Err(e) => {
                error!(bucket = %self.bucket, key, error = %e, "failed to read object");
                Err(LedgerError::Store {
                    bucket: self.bucket.clone(),
                    key: key.to_owned(),
                    source: e,
                })
            }
        }
    }

    /// Writes `body` to `key`, overwriting any existing object.
    ///
    /// No conditional write is attempted; the last writer wins.
    pub async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), LedgerError> {
        info!(bucket = %self.bucket, key, content_type, "uploading object");
        self.op
            .write_with(key, body)
            .content_type(content_type)
            .await
            .map_err(|e| {
                error!(bucket = %self.bucket, key, error = %e, "failed to store object");
                LedgerError::Store {
                    bucket: self.bucket.clone(),
                    key: key.to_owned(),
                    source: e,
                }
            })?;
        info!(bucket = %self.bucket, key, "stored object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> ObjectStore {
        ObjectStore::from_config(&StoreProvider::Memory, &StoreSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = memory_store();
        store
            .put("billing/account_c-1.json", b"{}".to_vec(), "application/json")
            .await
            .unwrap();

        let body = store.get("billing/account_c-1.json").await.unwrap();
        assert_eq!(body, Some(b"{}".to_vec()));
    }

    #[tokio::test]
    async fn absent_key_is_none_not_error() {
        let store = memory_store();
        let body = store.get("billing/account_missing.json").await.unwrap();
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn put_overwrites_existing_object() {
        let store = memory_store();
        store
            .put("k", b"first".to_vec(), "application/json")
            .await
            .unwrap();
        store
            .put("k", b"second".to_vec(), "application/json")
            .await
            .unwrap();

        let body = store.get("k").await.unwrap();
        assert_eq!(body, Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn clones_share_the_backing_store() {
        let store = memory_store();
        let clone = store.clone();
        store
            .put("k", b"shared".to_vec(), "application/json")
            .await
            .unwrap();

        let body = clone.get("k").await.unwrap();
        assert_eq!(body, Some(b"shared".to_vec()));
    }
}
