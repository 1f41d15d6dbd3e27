use std::sync::Arc;

use mempool::blockchain::mock::MockChain;
use mempool::{BlockChain, Id32, Input, Output, PoolConfig, Transaction, TransactionPool};

pub fn tx(seed: u8, input_amount: u64, output_amount: u64) -> Transaction {
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

pub fn alias_tx(seed: u8, name: &str, is_update: bool) -> Transaction {
	let mut image = [0u8; 32];
	image[0] = seed;
	Transaction {
		inputs: vec![Input::KeyImage {
			image: Id32(image),
			amount: 100,
		}],
		outputs: vec![Output { amount: 10 }],
		extra: vec![mempool::ExtraField::AliasRegistration {
			name: name.to_string(),
			is_update,
		}],
		attachments: vec![],
	}
}

pub fn cancel_tx(seed: u8, target: Id32, input_amount: u64, output_amount: u64) -> Transaction {
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
		attachments: vec![mempool::Attachment::CancelOffer {
			target_order: target,
		}],
	}
}

pub fn pool_with_chain() -> (TransactionPool, Arc<MockChain>) {
	let chain = Arc::new(MockChain::new());
	chain.set_height(1);
	chain.set_block_id(1, Id32([1u8; 32]));
	let dyn_chain: Arc<dyn BlockChain> = chain.clone();
	(TransactionPool::new(dyn_chain, PoolConfig::default()), chain)
}
