//! Byte-level primitives shared by every UTXO network family implemented in this workspace:
//! canonical (de)serialization, hash adapters, marked-digest types, and process-wide consensus
//! profile selection.

/// Canonical binary (de)serialization (`ByteFormat`) and the compact VarInt encoding.
pub mod ser;

/// Hash adapters (double-SHA256, HASH160, BLAKE-256 variants) and marker-trait machinery.
pub mod hashes;

/// Process-wide consensus profile selection.
pub mod network;

/// Macros for declaring wire types: hex serde impls, prefixed byte vectors, marked digests.
#[macro_use]
pub mod macros;
