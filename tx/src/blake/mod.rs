//! The Blake family: a Decred-shaped transaction record hashed with BLAKE-256 instead of
//! SHA-256, with its encoding split across a prefix stream (committed to by the transaction id)
//! and a witness stream (committed to separately).

use utxo_core::{hashes::blake256::Blake256Digest, mark_32_byte_hash};

mark_32_byte_hash!(
    /// A Blake-family transaction identifier: double-BLAKE-256 of the prefix stream alone.
    BlakeTxid,
    Blake256Digest
);
mark_32_byte_hash!(
    /// The double-BLAKE-256 digest of a Blake-family transaction's witness stream.
    WitnessHash,
    Blake256Digest
);

pub mod txin;
pub mod txout;
pub mod witness;
pub mod transaction;

pub use transaction::BlakeTx;
pub use txin::{BlakeOutpoint, BlakeTxIn};
pub use txout::BlakeTxOut;
pub use witness::BlakeInputWitness;
