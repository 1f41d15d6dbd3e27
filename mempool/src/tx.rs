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

//! Minimal transaction model consulted by the pool.
//!
//! The pool treats transaction contents as opaque except through the accessors
//! below; it never interprets signatures or amounts beyond the bookkeeping
//! this file exposes. Inputs, extras and attachments are closed, tagged enums
//! rather than a trait-object hierarchy (see the "Polymorphic input/attachment
//! containers" design note).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte identifier. Used for transaction ids, key-images and block ids.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub struct Id32(pub [u8; 32]);

impl Id32 {
	/// Sentinel meaning "no id" (e.g. never verified, no recorded failure).
	pub const NULL: Id32 = Id32([0u8; 32]);

	pub fn is_null(&self) -> bool {
		*self == Self::NULL
	}
}

impl fmt::Debug for Id32 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self)
	}
}

impl fmt::Display for Id32 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in &self.0 {
			write!(f, "{:02x}", byte)?;
		}
		Ok(())
	}
}

/// Transaction identifier.
pub type TxId = Id32;
/// Key-image identifier, unique to the coin an input spends.
pub type KeyImage = Id32;
/// Block identifier.
pub type BlockId = Id32;

/// A single transaction input. Only the key-image variant is currently
/// consensus-supported; other variants exist so that `Validator::check_inputs`
/// has something concrete to reject.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum Input {
	/// Spends a previously unspent output identified by its key-image.
	KeyImage { image: KeyImage, amount: u64 },
	/// Any input type the pool does not (yet) support admitting.
	Unsupported,
}

/// A single transaction output.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub struct Output {
	pub amount: u64,
}

/// An entry carried in a transaction's `extra` field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum ExtraField {
	/// Registers (or updates) a human-readable alias.
	AliasRegistration { name: String, is_update: bool },
	/// Anything else the pool does not need to act on.
	Other,
}

/// An attachment carried alongside a transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum Attachment {
	/// Revokes a previously posted trade order.
	CancelOffer { target_order: TxId },
	/// Anything else the pool does not need to act on.
	Other,
}

/// The transaction payload itself. Opaque to the pool beyond these fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub struct Transaction {
	pub inputs: Vec<Input>,
	pub outputs: Vec<Output>,
	pub extra: Vec<ExtraField>,
	pub attachments: Vec<Attachment>,
}

impl Transaction {
	/// Sum of all input amounts. Only meaningful once inputs are known to be
	/// key-images; callers must validate input types first.
	pub fn inputs_amount(&self) -> u64 {
		self.inputs
			.iter()
			.map(|i| match i {
				Input::KeyImage { amount, .. } => *amount,
				Input::Unsupported => 0,
			})
			.sum()
	}

	/// Sum of all output amounts.
	pub fn outputs_amount(&self) -> u64 {
		self.outputs.iter().map(|o| o.amount).sum()
	}

	/// True if every input is a recognized key-image input.
	pub fn inputs_supported(&self) -> bool {
		self.inputs
			.iter()
			.all(|i| matches!(i, Input::KeyImage { .. }))
	}

	/// All key-images consumed by this transaction.
	pub fn key_images(&self) -> impl Iterator<Item = KeyImage> + '_ {
		self.inputs.iter().filter_map(|i| match i {
			Input::KeyImage { image, .. } => Some(*image),
			Input::Unsupported => None,
		})
	}

	/// The alias registration carried in `extra`, if any.
	pub fn alias_registration(&self) -> Option<(&str, bool)> {
		self.extra.iter().find_map(|e| match e {
			ExtraField::AliasRegistration { name, is_update } => Some((name.as_str(), *is_update)),
			ExtraField::Other => None,
		})
	}

	/// The single cancel-offer attachment, if any. A transaction carrying more
	/// than one is treated as carrying none, since the carve-out in §4.3.1
	/// requires "exactly one."
	pub fn cancel_offer(&self) -> Option<TxId> {
		let mut found = None;
		for a in &self.attachments {
			if let Attachment::CancelOffer { target_order } = a {
				if found.is_some() {
					return None;
				}
				found = Some(*target_order);
			}
		}
		found
	}

	/// Canonical serialized size in bytes, as the pool would charge against
	/// `MAX_TX_BLOB`. Real encoding is out of scope (§1); we approximate with
	/// the `bincode` size of this struct, which is deterministic and
	/// monotonic in the fields that matter for tests and templates.
	pub fn blob_size(&self) -> u64 {
		bincode::serialized_size(self).unwrap_or(0)
	}
}
