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

//! Age-based eviction (C5). Mirrors `remove_stuck_transactions`: there is no
//! internal timer here, the pool library stays passive and a caller (the
//! `node` binary's maintenance loop) decides when to invoke
//! [`Reaper::run_once`].

use log::info;

use crate::pool::TransactionPool;
use crate::types::now_secs;

pub struct Reaper;

impl Reaper {
	/// Evicts every resident entry whose age exceeds its TTL —
	/// `kept_by_block_ttl_secs` for entries admitted via `kept_by_block`,
	/// `normal_ttl_secs` otherwise. Returns the number evicted.
	pub fn run_once(pool: &TransactionPool) -> usize {
		let now = now_secs();
		let (normal_ttl, kept_ttl) = {
			let cfg = pool.config();
			(cfg.normal_ttl_secs, cfg.kept_by_block_ttl_secs)
		};

		let expired: Vec<_> = {
			let guard = pool.lock();
			guard
				.store
				.iter()
				.filter(|(_, entry)| {
					let ttl = if entry.kept_by_block {
						kept_ttl
					} else {
						normal_ttl
					};
					entry.age_secs(now) > ttl
				})
				.map(|(id, _)| *id)
				.collect()
		};

		let mut evicted = 0;
		for id in &expired {
			match pool.take_tx(id) {
				Ok(Some(_)) => {
					evicted += 1;
					info!("reaper: evicted {} (stuck past its TTL)", id);
				}
				Ok(None) => {}
				Err(fault) => {
					log::error!("reaper: index divergence evicting {}: {}", id, fault);
				}
			}
		}
		evicted
	}
}
