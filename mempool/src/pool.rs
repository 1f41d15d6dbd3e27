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

//! Admission (C4): the single entry point through which transactions enter
//! and leave the pool. `TransactionPool` owns the one mutex (§5) that guards
//! the store and the conflict indexes as a single unit; every other module
//! operates on the data it is handed, never on shared state of its own.

use std::sync::Arc;

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::blockchain::BlockChain;
use crate::config::PoolConfig;
use crate::error::PoolFault;
use crate::indexes::ConflictIndexes;
use crate::store::PoolStore;
use crate::tx::{Transaction, TxId};
use crate::types::{PoolEntry, TxSource, VerificationContext};
use crate::validator;

/// The store and its indexes, always locked and modified together.
pub struct PoolInner {
	pub store: PoolStore,
	pub indexes: ConflictIndexes,
}

impl PoolInner {
	fn new() -> Self {
		PoolInner {
			store: PoolStore::new(),
			indexes: ConflictIndexes::new(),
		}
	}
}

/// The transaction pool. Cheap to clone (an `Arc` handle) so it can be shared
/// across the node's threads — the reaper, the template builder, and the
/// networking layer all hold one.
pub struct TransactionPool {
	chain: Arc<dyn BlockChain>,
	config: PoolConfig,
	inner: Mutex<PoolInner>,
}

impl TransactionPool {
	pub fn new(chain: Arc<dyn BlockChain>, config: PoolConfig) -> Self {
		TransactionPool {
			chain,
			config,
			inner: Mutex::new(PoolInner::new()),
		}
	}

	/// Restores a pool previously produced by [`crate::persist::load`]. Used
	/// only during startup, before any caller can observe the pool.
	pub fn from_parts(
		chain: Arc<dyn BlockChain>,
		config: PoolConfig,
		store: PoolStore,
		indexes: ConflictIndexes,
	) -> Self {
		TransactionPool {
			chain,
			config,
			inner: Mutex::new(PoolInner { store, indexes }),
		}
	}

	pub fn config(&self) -> &PoolConfig {
		&self.config
	}

	pub fn chain(&self) -> &Arc<dyn BlockChain> {
		&self.chain
	}

	/// Direct access to the locked store and indexes, for callers that need
	/// to run several operations (e.g. the template builder) without
	/// re-acquiring the mutex between them.
	pub fn lock(&self) -> parking_lot::MutexGuard<'_, PoolInner> {
		self.inner.lock()
	}

	/// The admission entry point (§4.3 / §4.4). Runs the full stateless check
	/// sequence, then — on success — links the conflict indexes and inserts
	/// the entry, all under one critical section.
	///
	/// A `PoolFault` here means the indexes and the store have diverged from
	/// what the Validator just confirmed was conflict-free; per §7 this is a
	/// broken invariant, not a rejection, and the caller must treat it as
	/// fatal to the mempool subsystem.
	pub fn add_tx(
		&self,
		tx: Transaction,
		source: TxSource,
		kept_by_block: bool,
	) -> Result<VerificationContext, PoolFault> {
		let tx_id = tx_id_of(&tx);
		let blob_size = tx.blob_size();

		let mut guard = self.inner.lock();

		if guard.store.contains(&tx_id) {
			debug!(
				"tx {} from {} ({}) rejected: already in pool",
				tx_id, source.debug_name, source.identifier
			);
			return Ok(VerificationContext::rejected(
				crate::error::RejectReason::AlreadyInPool,
			));
		}

		let outcome = validator::check_admission(
			self.chain.as_ref(),
			&guard.indexes,
			&tx,
			blob_size,
			kept_by_block,
			self.config.max_tx_blob,
		);

		let (fee, check) = match outcome {
			Ok(pair) => pair,
			Err(reason) => {
				info!(
					"tx {} from {} ({}) rejected: {}",
					tx_id, source.debug_name, source.identifier, reason
				);
				return Ok(VerificationContext::rejected(reason));
			}
		};

		guard.indexes.link(tx_id, &tx, kept_by_block)?;

		let entry = PoolEntry {
			tx,
			blob_size,
			fee,
			kept_by_block,
			max_used_block_height: check.max_used_block_height,
			max_used_block_id: check.max_used_block_id,
			last_failed_height: 0,
			last_failed_id: crate::tx::Id32::NULL,
			receive_time: crate::types::now_secs(),
		};
		guard.store.insert(tx_id, entry);

		info!(
			"tx {} from {} ({}) admitted, fee={}, kept_by_block={}",
			tx_id, source.debug_name, source.identifier, fee, kept_by_block
		);

		Ok(VerificationContext::admitted(
			!kept_by_block && fee > 0,
			check.verification_impossible,
		))
	}

	/// Removes and returns a resident transaction, unlinking its indexes.
	/// Used when a transaction is pulled into a mined block, or discarded by
	/// the reaper.
	pub fn take_tx(&self, id: &TxId) -> Result<Option<Transaction>, PoolFault> {
		let mut guard = self.inner.lock();
		let Some(entry) = guard.store.remove(id) else {
			return Ok(None);
		};
		guard.indexes.unlink(*id, &entry.tx)?;
		Ok(Some(entry.tx))
	}

	/// Removes every resident transaction, for shutdown or in tests.
	pub fn purge(&self) {
		let mut guard = self.inner.lock();
		let ids: Vec<TxId> = guard.store.iter().map(|(id, _)| *id).collect();
		for id in ids {
			if let Some(entry) = guard.store.remove(&id) {
				if let Err(fault) = guard.indexes.unlink(id, &entry.tx) {
					error!("purge: index divergence unlinking {}: {}", id, fault);
				}
			}
		}
	}

	pub fn count(&self) -> usize {
		self.inner.lock().store.count()
	}

	pub fn contains(&self, id: &TxId) -> bool {
		self.inner.lock().store.contains(id)
	}

	/// The `on_blockchain_inc`/`on_blockchain_dec` hook (§9 design note).
	/// Intentionally a no-op: re-validation against a moving tip happens
	/// lazily, through `ready_to_go`, not eagerly on every chain event.
	pub fn on_chain_event(&self, event: crate::types::ChainEvent) {
		match event {
			crate::types::ChainEvent::Incremented { height, block_id } => {
				debug!("chain incremented to {} ({})", height, block_id);
			}
			crate::types::ChainEvent::Decremented { height, block_id } => {
				warn!("chain decremented to {} ({})", height, block_id);
			}
		}
	}
}

/// Deterministic id for a transaction, used as the primary key. Real node
/// code derives this from a content hash; absent that codec (§1, out of
/// scope) we fold the blob through a cheap, stable hash of its bincode
/// encoding.
pub fn tx_id_of(tx: &Transaction) -> TxId {
	use std::collections::hash_map::DefaultHasher;
	use std::hash::{Hash, Hasher};

	let mut hasher = DefaultHasher::new();
	let encoded = bincode::serialize(tx).unwrap_or_default();
	encoded.hash(&mut hasher);
	let h = hasher.finish();

	let mut bytes = [0u8; 32];
	bytes[..8].copy_from_slice(&h.to_le_bytes());
	crate::tx::Id32(bytes)
}
