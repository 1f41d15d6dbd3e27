// Copyright 2026 The Mempool Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Operator-facing configuration, loaded from a TOML file alongside the
//! runtime-tunable fee floor the chain collaborator supplies.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{
	COINBASE_RESERVED_SIZE, KEPT_BY_BLOCK_TTL_SECS, MAX_ALIAS_PER_BLOCK, MAX_TX_BLOB,
	NORMAL_TTL_SECS,
};

/// Pool-wide configuration. Defaults mirror the compile-time tunables in
/// [`crate::types`]; operators may override any of them via TOML.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PoolConfig {
	pub max_tx_blob: u64,
	pub coinbase_reserved_size: u64,
	pub max_alias_per_block: usize,
	pub normal_ttl_secs: u64,
	pub kept_by_block_ttl_secs: u64,
	/// Directory holding `pool.bin`.
	pub data_dir: PathBuf,
}

impl Default for PoolConfig {
	fn default() -> Self {
		PoolConfig {
			max_tx_blob: MAX_TX_BLOB,
			coinbase_reserved_size: COINBASE_RESERVED_SIZE,
			max_alias_per_block: MAX_ALIAS_PER_BLOCK,
			normal_ttl_secs: NORMAL_TTL_SECS,
			kept_by_block_ttl_secs: KEPT_BY_BLOCK_TTL_SECS,
			data_dir: PathBuf::from("."),
		}
	}
}

impl PoolConfig {
	/// Load from a TOML file. A missing file is not an error — callers get
	/// `PoolConfig::default()` back, matching the persistence layer's own
	/// "missing file is success" rule.
	pub fn from_file(path: &Path) -> Result<PoolConfig, ConfigError> {
		match fs::read_to_string(path) {
			Ok(contents) => toml::from_str(&contents).map_err(ConfigError::Parse),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PoolConfig::default()),
			Err(e) => Err(ConfigError::Io(e)),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read pool config: {0}")]
	Io(#[from] std::io::Error),
	#[error("failed to parse pool config: {0}")]
	Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_file_yields_defaults() {
		let cfg = PoolConfig::from_file(Path::new("/nonexistent/pool.toml")).unwrap();
		assert_eq!(cfg, PoolConfig::default());
	}

	#[test]
	fn round_trips_through_toml() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("pool.toml");
		let mut cfg = PoolConfig::default();
		cfg.max_alias_per_block = 4;
		fs::write(&path, toml::to_string(&cfg).unwrap()).unwrap();

		let loaded = PoolConfig::from_file(&path).unwrap();
		assert_eq!(loaded.max_alias_per_block, 4);
	}
}
