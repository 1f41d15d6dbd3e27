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

//! Block template assembly (C6): `fill_block_template`'s revenue-maximizing
//! prefix selection over a fee-per-byte sorted candidate list. Holds the pool
//! mutex for the whole build, per §5 — the `ready_to_go` re-validation it
//! runs per candidate updates each entry's verification cache in place, and
//! that update must land in the resident store, not a throwaway copy.

use std::collections::HashSet;

use log::{debug, error, info};

use crate::pool::TransactionPool;
use crate::tx::TxId;
use crate::types::TemplateResult;
use crate::validator;

#[derive(Clone, Copy)]
struct Candidate {
	id: TxId,
	fee: u64,
	blob_size: u64,
}

/// Orders two candidates by fee-per-byte, descending, using the exact
/// `u128`-widened cross-multiplication so no floating point or truncating
/// division is needed (§9 design note). Ties break on `TxId` for a
/// deterministic ordering.
fn fee_per_byte_cmp(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
	let lhs = (a.fee as u128) * (b.blob_size as u128);
	let rhs = (b.fee as u128) * (a.blob_size as u128);
	rhs.cmp(&lhs).then_with(|| a.id.cmp(&b.id))
}

pub struct TemplateBuilder;

impl TemplateBuilder {
	/// Builds a block template against `median_size`/`already_generated_coins`
	/// `/pos_diff`, reserving `coinbase_reserved_size` bytes up front and
	/// capping the number of fresh alias registrations at
	/// `max_alias_per_block`.
	///
	/// Walks the fee-per-byte sorted candidates accumulating a running
	/// `current_size`/`current_fee`, but only *commits* to a prefix —
	/// recording it as `best_position` — when extending the walk actually
	/// raises total block revenue (`current_reward + current_fee` against
	/// `best_money`). A later candidate can still be skipped for being
	/// ineligible without ending the walk, but once the reward curve itself
	/// rejects the accumulated size the walk stops outright: no candidate
	/// past that point can ever be included, since the block can only grow
	/// from there.
	pub fn fill_block_template(
		pool: &TransactionPool,
		median_size: u64,
		already_generated_coins: u64,
		height: u64,
		pos_diff: u64,
	) -> TemplateResult {
		let mut guard = pool.lock();

		let mut candidates: Vec<Candidate> = guard
			.store
			.iter()
			.map(|(id, entry)| Candidate {
				id: *id,
				fee: entry.fee,
				blob_size: entry.blob_size,
			})
			.collect();
		candidates.sort_by(fee_per_byte_cmp);

		let reserved = pool.config().coinbase_reserved_size;
		let max_alias_per_block = pool.config().max_alias_per_block;

		let mut best_money = match pool.chain().get_block_reward(
			median_size,
			reserved,
			already_generated_coins,
			height,
			pos_diff,
		) {
			Ok(reward) => reward,
			Err(()) => {
				error!("template: a block with just a coinbase is already too large, aborting");
				return TemplateResult {
					tx_ids: Vec::new(),
					total_size: 0,
					total_fee: 0,
				};
			}
		};

		let mut best_position = 0usize;
		let mut total_size = 0u64;
		let mut total_fee = 0u64;

		let mut current_size = 0u64;
		let mut current_fee = 0u64;
		let mut alias_count = 0usize;
		let mut used_key_images = HashSet::new();

		// Mirrors the original's `txs[i] = NULL`: a candidate excluded here
		// (alias cap, not ready, or an in-selection key-image conflict) never
		// contributes to current_size/current_fee and can never be part of
		// the chosen prefix, but it still occupies slot `i` so `best_position`
		// indexes line up with the walk.
		let mut slots: Vec<Option<TxId>> = Vec::with_capacity(candidates.len());

		for candidate in candidates {
			let entry = match guard.store.get_mut(&candidate.id) {
				Some(entry) => entry,
				None => {
					slots.push(None);
					continue;
				}
			};

			if let Some((_, is_update)) = entry.tx.alias_registration() {
				if !is_update && alias_count >= max_alias_per_block {
					slots.push(None);
					continue;
				}
			}

			if !validator::ready_to_go(pool.chain().as_ref(), entry)
				|| entry.tx.key_images().any(|ki| used_key_images.contains(&ki))
			{
				slots.push(None);
				continue;
			}

			if let Some((_, is_update)) = entry.tx.alias_registration() {
				if !is_update {
					alias_count += 1;
				}
			}
			used_key_images.extend(entry.tx.key_images());

			current_size += entry.blob_size;
			current_fee += entry.fee;
			slots.push(Some(candidate.id));

			let current_reward = match pool.chain().get_block_reward(
				median_size,
				current_size + reserved,
				already_generated_coins,
				height,
				pos_diff,
			) {
				Ok(reward) => reward,
				Err(()) => {
					debug!(
						"template: reward curve rejects a block of {} bytes, stopping the walk",
						current_size + reserved
					);
					break;
				}
			};

			if best_money < current_reward + current_fee {
				best_money = current_reward + current_fee;
				best_position = slots.len();
				total_size = current_size;
				total_fee = current_fee;
			}
		}

		let chosen: Vec<TxId> = slots[..best_position].iter().filter_map(|id| *id).collect();

		info!(
			"template: selected {} transaction(s), {} bytes, {} total fee",
			chosen.len(),
			total_size,
			total_fee
		);

		TemplateResult {
			tx_ids: chosen,
			total_size,
			total_fee,
		}
	}
}
