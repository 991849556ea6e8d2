//! Hash adapters shared by every network family, plus the marker-trait machinery used to keep
//! differently-purposed digests (txid, wtxid, sighash, ...) from being confused with one
//! another.

/// Marker traits for named digests.
pub mod marked;

/// Double-SHA256 and HASH160, used by the legacy/witness/ForkID families.
pub mod hash256;

/// Double- and single-BLAKE-256, used by the Blake family.
pub mod blake256;

pub use blake256::*;
pub use hash256::*;
pub use marked::*;
