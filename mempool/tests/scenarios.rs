mod common;

use common::{alias_tx, cancel_tx, pool_with_chain, tx};

use mempool::{Id32, Reaper, RejectReason, TemplateBuilder, TxSource};

#[test]
fn double_spend_rejection() {
	let (pool, _chain) = pool_with_chain();

	let a = tx(1, 100, 90);
	let ctx_a = pool.add_tx(a, TxSource::default(), false).unwrap();
	assert!(ctx_a.added_to_pool);

	// Same key-image (seed 1) as tx A, different fee.
	let b = tx(1, 30, 10);
	let ctx_b = pool.add_tx(b, TxSource::default(), false).unwrap();
	assert!(ctx_b.verification_failed);
	assert!(matches!(
		ctx_b.reject_reason,
		Some(RejectReason::DoubleSpendInPool { .. })
	));
}

#[test]
fn reorg_invalidates_verification_cache() {
	let (pool, chain) = pool_with_chain();
	chain.set_height(1000);
	chain.set_block_id(1000, Id32([0xAA; 32]));

	let a = tx(1, 100, 90);
	let ctx = pool.add_tx(a, TxSource::default(), false).unwrap();
	assert!(ctx.added_to_pool);

	{
		let guard = pool.lock();
		let id = mempool::tx_id_of(&tx(1, 100, 90));
		let entry = guard.store.get(&id).unwrap();
		assert_eq!(entry.max_used_block_height, 1000);
		assert_eq!(entry.max_used_block_id, Id32([0xAA; 32]));
	}

	// Reorg: the id at height 1000 changes and inputs now fail re-verification.
	chain.set_block_id(1000, Id32([0xBB; 32]));
	chain.set_height(1001);
	chain.set_check_inputs_ok(false);

	let template = TemplateBuilder::fill_block_template(&pool, 100_000, 0, 1001, 0);
	assert!(template.tx_ids.is_empty());

	{
		let guard = pool.lock();
		let id = mempool::tx_id_of(&tx(1, 100, 90));
		let entry = guard.store.get(&id).unwrap();
		assert_eq!(entry.last_failed_height, 1000);
		assert_eq!(entry.last_failed_id, Id32([0xBB; 32]));
	}

	// Chain recovers: inputs verify again, the tx becomes eligible.
	chain.set_check_inputs_ok(true);
	chain.set_height(1002);
	chain.set_block_id(1002, Id32([0xCC; 32]));
	let template = TemplateBuilder::fill_block_template(&pool, 100_000, 0, 1002, 0);
	assert_eq!(template.tx_ids.len(), 1);
}

#[test]
fn fee_greedy_prefix() {
	let (pool, chain) = pool_with_chain();
	chain.set_height(1);
	chain.set_block_id(1, Id32([1u8; 32]));

	pool.add_tx(tx(1, 110, 100), TxSource::default(), false)
		.unwrap(); // fee 10, blob tiny but we only control fee/amounts here
	pool.add_tx(tx(2, 430, 400), TxSource::default(), false)
		.unwrap(); // fee 30
	pool.add_tx(tx(3, 51, 50), TxSource::default(), false)
		.unwrap(); // fee 1

	// Each entry cached max_used_block_id against height 1 during admission;
	// ready_to_go withholds a freshly-cached entry until the tip advances
	// past that height (see the DESIGN.md note on this), so the template
	// build must see a later tip even though nothing else has changed.
	chain.set_height(2);
	chain.set_block_id(2, Id32([2u8; 32]));

	let template = TemplateBuilder::fill_block_template(&pool, 1_000_000, 0, 2, 0);
	assert_eq!(template.tx_ids.len(), 3);
	assert_eq!(template.total_fee, 10 + 30 + 1);
}

#[test]
fn cancel_offer_carve_out() {
	let (pool, chain) = pool_with_chain();
	chain.set_min_fee(100);
	let order = Id32([0xEE; 32]);
	chain.post_order(order);

	let cancel = cancel_tx(1, order, 10, 10); // fee 0, below the 100 floor
	let ctx = pool.add_tx(cancel, TxSource::default(), false).unwrap();
	assert!(ctx.added_to_pool);

	// A second cancel targeting the same live order is rejected as a
	// duplicate in-pool cancel, not re-admitted.
	let cancel_again = cancel_tx(2, order, 10, 10);
	let ctx2 = pool.add_tx(cancel_again, TxSource::default(), false).unwrap();
	assert!(ctx2.verification_failed);
}

#[test]
fn age_eviction() {
	let (pool, _chain) = pool_with_chain();

	let a = tx(1, 100, 90);
	pool.add_tx(a.clone(), TxSource::default(), false).unwrap();

	{
		let mut guard = pool.lock();
		let id = mempool::tx_id_of(&a);
		let entry = guard.store.get_mut(&id).unwrap();
		entry.receive_time = entry
			.receive_time
			.saturating_sub(mempool::types::NORMAL_TTL_SECS + 1);
	}

	let evicted = Reaper::run_once(&pool);
	assert_eq!(evicted, 1);
	assert_eq!(pool.count(), 0);
	assert!(pool.lock().indexes.is_empty());
}

#[test]
fn kept_by_block_admits_despite_invalid_inputs() {
	let (pool, chain) = pool_with_chain();
	chain.set_check_inputs_ok(false);

	let a = tx(1, 100, 90);
	let ctx = pool.add_tx(a, TxSource::default(), true).unwrap();
	assert!(ctx.added_to_pool);
	assert!(ctx.verification_impossible);

	let guard = pool.lock();
	let id = mempool::tx_id_of(&tx(1, 100, 90));
	let entry = guard.store.get(&id).unwrap();
	assert!(entry.max_used_block_id.is_null());
}

#[test]
fn alias_registration_conflicts_in_pool_and_on_chain() {
	let (pool, chain) = pool_with_chain();

	let first = alias_tx(1, "alice", false);
	let ctx = pool.add_tx(first, TxSource::default(), false).unwrap();
	assert!(ctx.added_to_pool);

	let duplicate = alias_tx(2, "alice", false);
	let ctx2 = pool.add_tx(duplicate, TxSource::default(), false).unwrap();
	assert!(matches!(
		ctx2.reject_reason,
		Some(RejectReason::AliasInPool { .. })
	));

	chain.register_alias("bob");
	let onchain_conflict = alias_tx(3, "bob", false);
	let ctx3 = pool
		.add_tx(onchain_conflict, TxSource::default(), false)
		.unwrap();
	assert!(matches!(
		ctx3.reject_reason,
		Some(RejectReason::AliasInBlockchain { .. })
	));
}
