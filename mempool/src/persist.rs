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

//! On-disk persistence (C7), mirroring `init`/`deinit`: load is best-effort
//! and never fails the caller, save logs failures rather than propagating
//! them. A corrupt or version-mismatched `pool.bin` just means an empty pool,
//! not a fatal error — the chain is always the ultimate source of truth.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::indexes::ConflictIndexes;
use crate::store::PoolStore;

/// Bump whenever `PersistedPool`'s shape changes incompatibly. A file with a
/// different version is treated the same as a missing file: logged, then
/// discarded.
pub const POOL_FORMAT_VERSION: u32 = 1;

const POOL_FILE_NAME: &str = "pool.bin";

#[derive(Serialize, Deserialize)]
struct PersistedPool {
	version: u32,
	store: PoolStore,
	indexes: ConflictIndexes,
}

fn pool_file_path(data_dir: &Path) -> PathBuf {
	data_dir.join(POOL_FILE_NAME)
}

/// Loads `pool.bin` from `data_dir`. Never returns an error: a missing file,
/// an undecodable file, or a version mismatch all produce an empty pool, each
/// logged at a level appropriate to how surprising it is.
pub fn load(data_dir: &Path) -> (PoolStore, ConflictIndexes) {
	let path = pool_file_path(data_dir);
	let bytes = match fs::read(&path) {
		Ok(bytes) => bytes,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
			info!("no pool state at {} (first run)", path.display());
			return (PoolStore::new(), ConflictIndexes::new());
		}
		Err(e) => {
			warn!("failed to read pool state at {}: {}", path.display(), e);
			return (PoolStore::new(), ConflictIndexes::new());
		}
	};

	match bincode::deserialize::<PersistedPool>(&bytes) {
		Ok(persisted) if persisted.version == POOL_FORMAT_VERSION => {
			info!(
				"loaded {} resident transaction(s) from {}",
				persisted.store.count(),
				path.display()
			);
			(persisted.store, persisted.indexes)
		}
		Ok(persisted) => {
			warn!(
				"pool state at {} has version {}, expected {}; starting empty",
				path.display(),
				persisted.version,
				POOL_FORMAT_VERSION
			);
			(PoolStore::new(), ConflictIndexes::new())
		}
		Err(e) => {
			warn!(
				"failed to decode pool state at {}: {}; starting empty",
				path.display(),
				e
			);
			(PoolStore::new(), ConflictIndexes::new())
		}
	}
}

/// Serializes the current store and indexes to `pool.bin` under `data_dir`,
/// creating the directory if needed. Failures are logged at error level and
/// swallowed: a failed save must never take the node down.
pub fn save(data_dir: &Path, store: &PoolStore, indexes: &ConflictIndexes) {
	if let Err(e) = fs::create_dir_all(data_dir) {
		error!(
			"failed to create pool data directory {}: {}",
			data_dir.display(),
			e
		);
		return;
	}

	let persisted = PersistedPool {
		version: POOL_FORMAT_VERSION,
		store: store.clone(),
		indexes: indexes.clone(),
	};

	let bytes = match bincode::serialize(&persisted) {
		Ok(bytes) => bytes,
		Err(e) => {
			error!("failed to encode pool state: {}", e);
			return;
		}
	};

	let path = pool_file_path(data_dir);
	if let Err(e) = fs::write(&path, bytes) {
		error!("failed to write pool state to {}: {}", path.display(), e);
	} else {
		info!(
			"saved {} resident transaction(s) to {}",
			store.count(),
			path.display()
		);
	}
}
