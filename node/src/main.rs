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

//! A thin demo binary: wires the mempool library to an in-memory chain
//! double, runs a short admission scenario, and exercises the maintenance
//! loop the way a real node would drive it (reaper sweeps on a timer,
//! `print_pool` for an operator to inspect, a clean `deinit` on shutdown).

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::info;

use mempool::blockchain::mock::MockChain;
use mempool::{
	persist, print_pool, BlockChain, Id32, Input, Output, PoolConfig, Reaper, TemplateBuilder,
	Transaction, TransactionPool, TxSource,
};

fn demo_tx(seed: u8, input_amount: u64, output_amount: u64) -> Transaction {
	let mut image = [0u8; 32];
	image[0] = seed;
	Transaction {
		inputs: vec![Input::KeyImage {
			image: Id32(image),
			amount: input_amount,
		}],
		outputs: vec![Output {
			amount: output_amount,
		}],
		extra: vec![],
		attachments: vec![],
	}
}

fn main() {
	env_logger::init();

	let data_dir = PathBuf::from("./pool-data");
	let config = PoolConfig {
		data_dir: data_dir.clone(),
		..PoolConfig::default()
	};

	let chain = Arc::new(MockChain::new());
	chain.set_height(1);
	chain.set_block_id(1, Id32([1u8; 32]));
	let chain_handle: Arc<dyn BlockChain> = chain.clone();

	let (store, indexes) = persist::load(&data_dir);
	info!("starting with {} transaction(s) restored from disk", store.count());
	let pool = TransactionPool::from_parts(chain_handle, config, store, indexes);

	for (seed, inp, out) in [(1u8, 100, 90), (2, 50, 45), (3, 10, 9)] {
		let ctx = pool
			.add_tx(demo_tx(seed, inp, out), TxSource::default(), false)
			.expect("index divergence is a fatal mempool fault");
		info!("admitted seed {}: {:?}", seed, ctx.added_to_pool);
	}

	println!("{}", print_pool(&pool, true));

	// A freshly admitted entry caches its verification height against the
	// current tip; ready_to_go withholds it from templates until the tip
	// advances past that height (see DESIGN.md), so pretend one more block
	// landed before asking for a template, as a real node would after it
	// mines or receives the next block.
	chain.set_height(2);
	chain.set_block_id(2, Id32([2u8; 32]));

	let template = TemplateBuilder::fill_block_template(&pool, 100_000, 0, 2, 0);
	info!(
		"template: {} tx, {} bytes, {} fee",
		template.tx_ids.len(),
		template.total_size,
		template.total_fee
	);

	let evicted = Reaper::run_once(&pool);
	info!("reaper evicted {} stale transaction(s) on startup sweep", evicted);

	thread::sleep(Duration::from_millis(10));

	{
		let guard = pool.lock();
		persist::save(&data_dir, &guard.store, &guard.indexes);
	}
	info!("shut down cleanly");
}
