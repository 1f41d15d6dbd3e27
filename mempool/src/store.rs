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

//! The primary tx-id -> [`PoolEntry`] mapping. A pure, in-memory container:
//! no operation here ever touches I/O or blocks on the chain collaborator.

use crate::types::{now_secs, PoolEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::tx::TxId;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoolStore {
	entries: HashMap<TxId, PoolEntry>,
}

impl PoolStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, id: TxId, entry: PoolEntry) -> Option<PoolEntry> {
		self.entries.insert(id, entry)
	}

	pub fn remove(&mut self, id: &TxId) -> Option<PoolEntry> {
		self.entries.remove(id)
	}

	pub fn get(&self, id: &TxId) -> Option<&PoolEntry> {
		self.entries.get(id)
	}

	pub fn get_mut(&mut self, id: &TxId) -> Option<&mut PoolEntry> {
		self.entries.get_mut(id)
	}

	pub fn contains(&self, id: &TxId) -> bool {
		self.entries.contains_key(id)
	}

	pub fn count(&self) -> usize {
		self.entries.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&TxId, &PoolEntry)> {
		self.entries.iter()
	}

	/// Sum of `blob_size` across all resident entries, used by the
	/// long-form `print_pool` diagnostic.
	pub fn total_blob_size(&self) -> u64 {
		self.entries.values().map(|e| e.blob_size).sum()
	}

	/// Age, in seconds, of the oldest resident entry. `None` if empty.
	pub fn oldest_entry_age(&self) -> Option<u64> {
		let now = now_secs();
		self.entries.values().map(|e| e.age_secs(now)).max()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tx::{Id32, Transaction};

	fn entry() -> PoolEntry {
		PoolEntry {
			tx: Transaction {
				inputs: vec![],
				outputs: vec![],
				extra: vec![],
				attachments: vec![],
			},
			blob_size: 100,
			fee: 10,
			kept_by_block: false,
			max_used_block_height: 0,
			max_used_block_id: Id32::NULL,
			last_failed_height: 0,
			last_failed_id: Id32::NULL,
			receive_time: now_secs(),
		}
	}

	#[test]
	fn insert_get_remove_round_trip() {
		let mut store = PoolStore::new();
		let id = Id32([1u8; 32]);
		assert!(store.insert(id, entry()).is_none());
		assert!(store.contains(&id));
		assert_eq!(store.count(), 1);
		assert!(store.remove(&id).is_some());
		assert!(!store.contains(&id));
		assert_eq!(store.count(), 0);
	}

	#[test]
	fn total_blob_size_sums_entries() {
		let mut store = PoolStore::new();
		store.insert(Id32([1u8; 32]), entry());
		store.insert(Id32([2u8; 32]), entry());
		assert_eq!(store.total_blob_size(), 200);
	}
}
