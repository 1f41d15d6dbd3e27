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

//! The `print_pool` diagnostic. Intended for an operator console or a status
//! RPC, not for machine consumption — hence a formatted `String` rather than
//! a structured type.

use std::fmt::Write as _;

use crate::pool::TransactionPool;
use crate::types::now_secs;

/// Renders the current pool state. `short` gives one line per transaction;
/// the long form additionally reports aggregate size and the oldest resident
/// entry's age.
pub fn print_pool(pool: &TransactionPool, short: bool) -> String {
	let guard = pool.lock();
	let now = now_secs();
	let mut out = String::new();

	let _ = writeln!(out, "pool: {} transaction(s)", guard.store.count());

	let mut entries: Vec<_> = guard.store.iter().collect();
	entries.sort_by_key(|(id, _)| **id);

	for (id, entry) in &entries {
		if short {
			let _ = writeln!(
				out,
				"{}  size={}  fee={}  kept_by_block={}  age={}s",
				id,
				entry.blob_size,
				entry.fee,
				entry.kept_by_block,
				entry.age_secs(now)
			);
		} else {
			let tx_json = serde_json::to_string(&entry.tx)
				.unwrap_or_else(|e| format!("<failed to serialize: {}>", e));
			let _ = writeln!(
				out,
				"{}\n  {}\n  size={}\n  fee={}\n  kept_by_block={}\n  max_used_block_height={}\n  max_used_block_id={}\n  last_failed_height={}\n  last_failed_id={}\n  age={}s",
				id,
				tx_json,
				entry.blob_size,
				entry.fee,
				entry.kept_by_block,
				entry.max_used_block_height,
				entry.max_used_block_id,
				entry.last_failed_height,
				entry.last_failed_id,
				entry.age_secs(now)
			);
		}
	}

	if !short {
		let _ = writeln!(out, "total_blob_size={}", guard.store.total_blob_size());
		match guard.store.oldest_entry_age() {
			Some(age) => {
				let _ = writeln!(out, "oldest_entry_age={}s", age);
			}
			None => {
				let _ = writeln!(out, "oldest_entry_age=n/a");
			}
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::blockchain::mock::MockChain;
	use crate::config::PoolConfig;
	use crate::tx::{Id32, Input, Output, Transaction};
	use crate::types::TxSource;
	use std::sync::Arc;

	#[test]
	fn short_form_has_one_line_per_entry() {
		let chain: Arc<dyn crate::blockchain::BlockChain> = Arc::new(MockChain::new());
		let pool = TransactionPool::new(chain, PoolConfig::default());
		let tx = Transaction {
			inputs: vec![Input::KeyImage {
				image: Id32([1u8; 32]),
				amount: 10,
			}],
			outputs: vec![Output { amount: 5 }],
			extra: vec![],
			attachments: vec![],
		};
		pool.add_tx(tx, TxSource::default(), false).unwrap();

		let rendered = print_pool(&pool, true);
		assert!(rendered.contains("kept_by_block=false"));
		assert!(!rendered.contains("total_blob_size"));
	}

	#[test]
	fn long_form_reports_aggregate_stats() {
		let chain: Arc<dyn crate::blockchain::BlockChain> = Arc::new(MockChain::new());
		let pool = TransactionPool::new(chain, PoolConfig::default());
		let tx = Transaction {
			inputs: vec![Input::KeyImage {
				image: Id32([1u8; 32]),
				amount: 10,
			}],
			outputs: vec![Output { amount: 5 }],
			extra: vec![],
			attachments: vec![],
		};
		pool.add_tx(tx, TxSource::default(), false).unwrap();

		let rendered = print_pool(&pool, false);
		assert!(rendered.contains("total_blob_size"));
		assert!(rendered.contains("oldest_entry_age"));
		assert!(rendered.contains("\"inputs\""));
	}
}
