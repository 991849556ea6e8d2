//! The legacy/witness/ForkID transaction family: a single version of the transaction record
//! with an optional segwit flag and optional per-input witnesses, dispatching its sighash
//! formula off the active network profile.

use utxo_core::{hashes::hash256::Hash256Digest, mark_32_byte_hash};

mark_32_byte_hash!(
    /// A transaction identifier: double-SHA256 of the witness-stripped serialization.
    Txid,
    Hash256Digest
);
mark_32_byte_hash!(
    /// A witness transaction identifier: double-SHA256 of the full serialization, witnesses
    /// included.
    Wtxid,
    Hash256Digest
);

/// Outpoint, TxIn, and the per-transaction input list.
pub mod txin;
/// TxOut and the per-transaction output list.
pub mod txout;
/// InputWitness (a witness stack) and the per-transaction witness list.
pub mod witness;
/// The transaction record itself: construction, (de)serialization, tx-id, and sighash.
pub mod transaction;

pub use transaction::{LegacySighashArgs, Sighash, StandardTx, WitnessSighashArgs};
pub use txin::{Outpoint, TxIn};
pub use txout::TxOut;
pub use witness::InputWitness;
