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

//! Store settings and configuration loading.

use crate::base::CustomerId;
use serde::Deserialize;
use std::path::PathBuf;

/// Location and naming scheme for persisted account documents.
///
/// Passed by reference wherever key derivation happens; nothing reads
/// settings from ambient state.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Bucket (or root container) holding the documents.
    pub bucket: String,
    /// Key prefix within the bucket.
    #[serde(default = "default_folder")]
    pub folder: String,
    /// File name stem preceding the customer id.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Extension appended after the customer id, including the dot.
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

fn default_folder() -> String {
    "billing".to_string()
}

fn default_file_name() -> String {
    "account".to_string()
}

fn default_file_extension() -> String {
    ".json".to_string()
}

impl StoreSettings {
    /// Derives the storage key for a customer's document.
    ///
    /// The id is interpolated verbatim. Ids containing `/` or `_` produce
    /// keys indistinguishable from other folder/name combinations; existing
    /// stored documents depend on this exact format.
    pub fn key_for(&self, customer_id: &CustomerId) -> String {
        format!(
            "{}/{}_{}{}",
            self.folder, self.file_name, customer_id, self.file_extension
        )
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            bucket: "billing".to_string(),
            folder: default_folder(),
            file_name: default_file_name(),
            file_extension: default_file_extension(),
        }
    }
}

/// Which backing store the gateway talks to.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreProvider {
    /// S3-compatible object storage.
    S3 {
        endpoint: String,
        region: String,
        access_key_id: String,
        secret_access_key: String,
    },
    /// Local filesystem, documents under `root`.
    Fs { root: PathBuf },
    /// In-memory, for tests and demos.
    Memory,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub store: StoreSettings,
    pub provider: StoreProvider,
}

impl LedgerConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Reads `config/default` then `config/{RUN_MODE}` (both optional) and
    /// overlays `BILLING`-prefixed environment variables, e.g.
    /// `BILLING__STORE__BUCKET` or `BILLING__PROVIDER__KIND`.
    ///
    /// # Errors
    ///
    /// Returns an error if no source yields a complete configuration.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BILLING").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
