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

//! A transaction memory pool for a UTXO-style, key-image-based chain: admits
//! candidate transactions, tracks double-spend and alias conflicts, evicts
//! stale entries, and assembles fee-ordered block templates.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

pub mod blockchain;
pub mod config;
pub mod error;
mod indexes;
pub mod persist;
pub mod pool;
pub mod print;
pub mod reaper;
mod store;
pub mod template_builder;
pub mod tx;
pub mod types;
mod validator;

pub use blockchain::{BlockChain, CoreRuntimeConfig};
pub use config::{ConfigError, PoolConfig};
pub use error::{PoolFault, RejectReason};
pub use pool::{tx_id_of, PoolInner, TransactionPool};
pub use print::print_pool;
pub use reaper::Reaper;
pub use template_builder::TemplateBuilder;
pub use tx::{Attachment, ExtraField, Id32, Input, Output, Transaction, TxId};
pub use types::{ChainEvent, PoolEntry, TemplateResult, TxSource, VerificationContext};
