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

//! Error types surfaced by the pool.
//!
//! Transaction-level rejections never escape as an `Err`; they are carried as
//! a [`RejectReason`] inside a [`crate::types::VerificationContext`]. Only a
//! broken internal invariant escapes as a real `Err`, since that is the one
//! condition §7 says should abort the mempool subsystem rather than simply be
//! reported to the caller.

use crate::tx::TxId;
use thiserror::Error;

/// Why a candidate transaction was not admitted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RejectReason {
	#[error("transaction blob is {actual} bytes, exceeding the {limit} byte limit")]
	TooLarge { actual: u64, limit: u64 },

	#[error("transaction carries an unsupported input type")]
	UnsupportedInput,

	#[error("transaction outputs ({out}) are not less than inputs ({inp})")]
	NegativeOrZeroFee { inp: u64, out: u64 },

	#[error("fee {fee} is below the pool floor {floor}")]
	FeeTooLow { fee: u64, floor: u64 },

	#[error("key-image already spent by transaction {other}")]
	DoubleSpendInPool { other: TxId },

	#[error("alias '{name}' is already registered in the pool")]
	AliasInPool { name: String },

	#[error("alias '{name}' is already registered on-chain")]
	AliasInBlockchain { name: String },

	#[error("transaction inputs failed chain validation")]
	InputsInvalid,

	#[error("transaction is already resident in the pool")]
	AlreadyInPool,
}

/// A broken mempool invariant. Indicates the indexes and the pool store have
/// diverged; per §7 this must be logged at error level and treated as fatal to
/// the mempool subsystem, since consensus safety is no longer assured.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PoolFault {
	#[error("key-image {image} already linked to {existing} while linking {incoming} without kept_by_block")]
	KeyImageAlreadyLinked {
		image: TxId,
		existing: TxId,
		incoming: TxId,
	},

	#[error("attempted to unlink key-image {image} from {tx} but it was not linked")]
	KeyImageNotLinked { image: TxId, tx: TxId },

	#[error("attempted to unlink alias '{name}' but its refcount was already zero")]
	AliasRefcountUnderflow { name: String },

	#[error("attempted to remove cancel-order target {target} that was not tracked")]
	CancelOrderNotTracked { target: TxId },
}
