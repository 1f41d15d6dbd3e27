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

//! Secondary indexes the pool keeps alongside the primary tx-id -> entry map:
//! key-image holders, alias refcounts, and the cancel-order dedup set.

use crate::error::PoolFault;
use crate::tx::{Transaction, TxId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Key-image -> set of tx-ids holding it, alias-name -> refcount, and the
/// cancel-order target set. A key-image set holds more than one id only when
/// every holder is `kept_by_block` (§4.1).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConflictIndexes {
	key_images: HashMap<TxId, HashSet<TxId>>,
	aliases: HashMap<String, u32>,
	cancel_orders: HashSet<TxId>,
}

impl ConflictIndexes {
	pub fn new() -> Self {
		Self::default()
	}

	/// True if admitting `tx` would conflict with what is already linked.
	pub fn has_conflict(&self, tx: &Transaction, kept_by_block: bool) -> bool {
		if tx
			.key_images()
			.any(|ki| self.key_images.get(&ki).map_or(false, |s| !s.is_empty()))
		{
			return true;
		}
		if let Some((name, is_update)) = tx.alias_registration() {
			if !is_update && !kept_by_block && self.aliases.contains_key(name) {
				return true;
			}
		}
		if let Some(target) = tx.cancel_offer() {
			if self.cancel_orders.contains(&target) {
				return true;
			}
		}
		false
	}

	/// Links `tx_id`'s key-images, alias registration, and cancel-offer
	/// target into the indexes. Fails with [`PoolFault::KeyImageAlreadyLinked`]
	/// if a key-image is already held and `kept_by_block` was not asserted —
	/// the Validator must have caught that double-spend first.
	pub fn link(
		&mut self,
		tx_id: TxId,
		tx: &Transaction,
		kept_by_block: bool,
	) -> Result<(), PoolFault> {
		for ki in tx.key_images() {
			let holders = self.key_images.entry(ki).or_default();
			if !holders.is_empty() && !kept_by_block {
				return Err(PoolFault::KeyImageAlreadyLinked {
					image: ki,
					existing: *holders.iter().next().unwrap(),
					incoming: tx_id,
				});
			}
			holders.insert(tx_id);
		}

		if let Some((name, is_update)) = tx.alias_registration() {
			if !is_update {
				*self.aliases.entry(name.to_string()).or_insert(0) += 1;
			}
		}

		if let Some(target) = tx.cancel_offer() {
			self.cancel_orders.insert(target);
		}

		Ok(())
	}

	/// The exact inverse of [`ConflictIndexes::link`].
	pub fn unlink(&mut self, tx_id: TxId, tx: &Transaction) -> Result<(), PoolFault> {
		for ki in tx.key_images() {
			match self.key_images.get_mut(&ki) {
				Some(holders) if holders.remove(&tx_id) => {
					if holders.is_empty() {
						self.key_images.remove(&ki);
					}
				}
				_ => {
					return Err(PoolFault::KeyImageNotLinked {
						image: ki,
						tx: tx_id,
					})
				}
			}
		}

		if let Some((name, is_update)) = tx.alias_registration() {
			if !is_update {
				match self.aliases.get_mut(name) {
					Some(count) if *count > 0 => {
						*count -= 1;
						if *count == 0 {
							self.aliases.remove(name);
						}
					}
					_ => {
						return Err(PoolFault::AliasRefcountUnderflow {
							name: name.to_string(),
						})
					}
				}
			}
		}

		if let Some(target) = tx.cancel_offer() {
			if !self.cancel_orders.remove(&target) {
				return Err(PoolFault::CancelOrderNotTracked { target });
			}
		}

		Ok(())
	}

	pub fn alias_refcount(&self, name: &str) -> u32 {
		self.aliases.get(name).copied().unwrap_or(0)
	}

	pub fn key_image_holders(&self, image: &TxId) -> Option<&HashSet<TxId>> {
		self.key_images.get(image)
	}

	pub fn cancel_order_targets(&self) -> &HashSet<TxId> {
		&self.cancel_orders
	}

	pub fn is_empty(&self) -> bool {
		self.key_images.is_empty() && self.aliases.is_empty() && self.cancel_orders.is_empty()
	}
}
