#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mempool::blockchain::mock::MockChain;
use mempool::{BlockChain, PoolConfig, Transaction, TransactionPool, TxSource};

fuzz_target!(|data: &[u8]| {
	let mut unstructured = arbitrary::Unstructured::new(data);
	let tx: Transaction = match Transaction::arbitrary(&mut unstructured) {
		Ok(tx) => tx,
		Err(_) => return,
	};

	let chain = Arc::new(MockChain::new());
	chain.set_height(1);
	let kept_by_block = data.first().map(|b| b % 2 == 0).unwrap_or(false);
	let chain_handle: Arc<dyn BlockChain> = chain;
	let pool = TransactionPool::new(chain_handle, PoolConfig::default());

	// add_tx must never return PoolFault for fuzzer-generated input: a
	// conflict-index divergence here would mean the Validator and the
	// indexes disagreed about a transaction this same call admitted.
	if let Err(fault) = pool.add_tx(tx, TxSource::default(), kept_by_block) {
		panic!("invariant violated: {fault:?}");
	}
});
