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

//! The blockchain collaborator boundary.
//!
//! Everything the mempool needs from chain state, input validation, and
//! consensus parameters is reached through this trait. The mempool never owns
//! an implementation; it only ever holds a non-owning, `Arc`-shared handle.
//! `check_tx_inputs`, `validate_cancel_order` and `has_tx_keyimages_as_spent`
//! are called while the pool mutex is held (§5), so implementations must be
//! reentrant-safe and must never call back into the mempool.

use crate::tx::{BlockId, Transaction, TxId};

/// Runtime-tunable parameters the chain exposes to the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreRuntimeConfig {
	pub tx_pool_min_fee: u64,
}

/// The external blockchain storage engine, as consulted by the pool.
pub trait BlockChain: Send + Sync {
	/// Verifies ring-signatures and input references. On success returns the
	/// height and block-id of the tip the inputs were checked against —
	/// always the current tip, i.e. the same value `current_blockchain_height`
	/// would return at the time of the call.
	fn check_tx_inputs(&self, tx: &Transaction) -> Result<(u64, BlockId), ()>;

	/// Deterministic chain lookup.
	fn block_id_by_height(&self, height: u64) -> Option<BlockId>;

	/// Height of the current tip. Monotonically non-decreasing except on
	/// reorg.
	fn current_blockchain_height(&self) -> u64;

	/// Consensus reward curve. Fails if `current_size` exceeds the permitted
	/// ceiling for the given parameters.
	fn get_block_reward(
		&self,
		median_size: u64,
		current_size: u64,
		already_generated_coins: u64,
		height: u64,
		pos_diff: u64,
	) -> Result<u64, ()>;

	/// True if any input key-image of `tx` is spent on-chain.
	fn has_tx_keyimages_as_spent(&self, tx: &Transaction) -> bool;

	/// True if `name` is registered on-chain.
	fn get_alias_info(&self, name: &str) -> bool;

	/// True if the cancel targets a currently live order.
	fn validate_cancel_order(&self, target_order: TxId) -> bool;

	/// Runtime-tunable fee floor and friends.
	fn get_core_runtime_config(&self) -> CoreRuntimeConfig;
}

#[cfg(any(test, feature = "test-support"))]
pub mod mock {
	//! An in-memory `BlockChain` double for tests, analogous to the teacher's
	//! `DummyChainImpl`.

	use super::*;
	use std::collections::{HashMap, HashSet};
	use std::sync::RwLock;

	#[derive(Default)]
	struct State {
		height: u64,
		block_ids: HashMap<u64, BlockId>,
		spent_keyimages: HashSet<TxId>,
		registered_aliases: HashSet<String>,
		live_orders: HashSet<TxId>,
		min_fee: u64,
		check_inputs_ok: bool,
		reward_ceiling: Option<u64>,
	}

	/// A fully mutable, in-memory blockchain double.
	pub struct MockChain {
		state: RwLock<State>,
	}

	impl Default for MockChain {
		fn default() -> Self {
			Self::new()
		}
	}

	impl MockChain {
		pub fn new() -> Self {
			MockChain {
				state: RwLock::new(State {
					check_inputs_ok: true,
					min_fee: 0,
					..Default::default()
				}),
			}
		}

		pub fn set_height(&self, height: u64) {
			self.state.write().unwrap().height = height;
		}

		pub fn set_block_id(&self, height: u64, id: BlockId) {
			self.state.write().unwrap().block_ids.insert(height, id);
		}

		pub fn mark_spent(&self, image: TxId) {
			self.state.write().unwrap().spent_keyimages.insert(image);
		}

		pub fn register_alias(&self, name: &str) {
			self.state
				.write()
				.unwrap()
				.registered_aliases
				.insert(name.to_string());
		}

		pub fn post_order(&self, order: TxId) {
			self.state.write().unwrap().live_orders.insert(order);
		}

		pub fn cancel_order(&self, order: TxId) {
			self.state.write().unwrap().live_orders.remove(&order);
		}

		pub fn set_min_fee(&self, fee: u64) {
			self.state.write().unwrap().min_fee = fee;
		}

		pub fn set_check_inputs_ok(&self, ok: bool) {
			self.state.write().unwrap().check_inputs_ok = ok;
		}

		/// Cap block size so `get_block_reward` fails above `ceiling`,
		/// mimicking the consensus reward curve's size limit.
		pub fn set_reward_ceiling(&self, ceiling: Option<u64>) {
			self.state.write().unwrap().reward_ceiling = ceiling;
		}
	}

	impl BlockChain for MockChain {
		fn check_tx_inputs(&self, tx: &Transaction) -> Result<(u64, BlockId), ()> {
			let state = self.state.read().unwrap();
			if !state.check_inputs_ok {
				return Err(());
			}
			let height = state.height;
			let id = state
				.block_ids
				.get(&height)
				.copied()
				.unwrap_or(BlockId::NULL);
			let _ = tx;
			Ok((height, id))
		}

		fn block_id_by_height(&self, height: u64) -> Option<BlockId> {
			self.state.read().unwrap().block_ids.get(&height).copied()
		}

		fn current_blockchain_height(&self) -> u64 {
			self.state.read().unwrap().height
		}

		fn get_block_reward(
			&self,
			_median_size: u64,
			current_size: u64,
			_already_generated_coins: u64,
			_height: u64,
			_pos_diff: u64,
		) -> Result<u64, ()> {
			let state = self.state.read().unwrap();
			if let Some(ceiling) = state.reward_ceiling {
				if current_size > ceiling {
					return Err(());
				}
			}
			Ok(1_000_000)
		}

		fn has_tx_keyimages_as_spent(&self, tx: &Transaction) -> bool {
			let state = self.state.read().unwrap();
			tx.key_images().any(|ki| state.spent_keyimages.contains(&ki))
		}

		fn get_alias_info(&self, name: &str) -> bool {
			self.state.read().unwrap().registered_aliases.contains(name)
		}

		fn validate_cancel_order(&self, target_order: TxId) -> bool {
			self.state
				.read()
				.unwrap()
				.live_orders
				.contains(&target_order)
		}

		fn get_core_runtime_config(&self) -> CoreRuntimeConfig {
			CoreRuntimeConfig {
				tx_pool_min_fee: self.state.read().unwrap().min_fee,
			}
		}
	}
}
