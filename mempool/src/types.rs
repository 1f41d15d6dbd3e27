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

//! Base types shared across the pool: resident entries, the verification
//! outcome, the compile-time tunables, and the bit of provenance a caller
//! attaches to an incoming transaction.

use crate::error::RejectReason;
use crate::tx::{BlockId, Transaction, TxId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Rejection threshold for non-`kept_by_block` transactions.
pub const MAX_TX_BLOB: u64 = 128 * 1024;
/// Bytes reserved for the coinbase transaction when sizing a block template.
pub const COINBASE_RESERVED_SIZE: u64 = 600;
/// Cap on fresh-alias registrations admitted into a single block template.
pub const MAX_ALIAS_PER_BLOCK: usize = 1;
/// Reaper TTL, in seconds, for ordinary pool entries.
pub const NORMAL_TTL_SECS: u64 = 24 * 60 * 60;
/// Reaper TTL, in seconds, for entries admitted via `kept_by_block`.
pub const KEPT_BY_BLOCK_TTL_SECS: u64 = 3 * 24 * 60 * 60;

/// Where a candidate transaction came from. Logged, not interpreted.
#[derive(Clone, Debug)]
pub struct TxSource {
	pub debug_name: String,
	pub identifier: String,
}

impl Default for TxSource {
	fn default() -> Self {
		TxSource {
			debug_name: "local".to_string(),
			identifier: "0.0.0.0".to_string(),
		}
	}
}

/// One resident transaction, as tracked by [`crate::store::PoolStore`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolEntry {
	pub tx: Transaction,
	pub blob_size: u64,
	pub fee: u64,
	pub kept_by_block: bool,

	/// Tip against which inputs last verified successfully. `TxId::NULL`
	/// means "never verified here."
	pub max_used_block_height: u64,
	pub max_used_block_id: BlockId,

	/// Negative cache: the tip at which the most recent `check_tx_inputs`
	/// rejection occurred. `TxId::NULL` means "no recorded failure."
	pub last_failed_height: u64,
	pub last_failed_id: BlockId,

	pub receive_time: u64,
}

impl PoolEntry {
	pub fn age_secs(&self, now: u64) -> u64 {
		now.saturating_sub(self.receive_time)
	}
}

/// Current wall-clock time, in seconds since the epoch.
pub fn now_secs() -> u64 {
	Utc::now().timestamp().max(0) as u64
}

/// Outcome of an `add_tx` call. Exactly one of `added_to_pool` /
/// `verification_failed` is true on return; `should_be_relayed` implies
/// `added_to_pool`. Fields are set exactly once, from the final outcome —
/// never flipped to `true` provisionally and corrected later (see the
/// "m_verifivation_failed" design note).
#[derive(Clone, Debug, Default)]
pub struct VerificationContext {
	pub added_to_pool: bool,
	pub verification_failed: bool,
	pub verification_impossible: bool,
	pub should_be_relayed: bool,
	pub reject_reason: Option<RejectReason>,
}

impl VerificationContext {
	pub fn rejected(reason: RejectReason) -> Self {
		VerificationContext {
			added_to_pool: false,
			verification_failed: true,
			verification_impossible: false,
			should_be_relayed: false,
			reject_reason: Some(reason),
		}
	}

	pub fn admitted(should_be_relayed: bool, verification_impossible: bool) -> Self {
		VerificationContext {
			added_to_pool: true,
			verification_failed: false,
			verification_impossible,
			should_be_relayed,
			reject_reason: None,
		}
	}
}

/// A reorg-driven hook. Present so a future chain-following layer has
/// somewhere to call into; intentionally inert today (see the
/// `on_blockchain_inc`/`dec` design note).
#[derive(Clone, Copy, Debug)]
pub enum ChainEvent {
	Incremented { height: u64, block_id: BlockId },
	Decremented { height: u64, block_id: BlockId },
}

/// A line item produced by [`crate::template_builder::TemplateBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateResult {
	pub tx_ids: Vec<TxId>,
	pub total_size: u64,
	pub total_fee: u64,
}
