//! Marker traits that prevent type confusion between differently-named 32-byte digests (a txid
//! is not interchangeable with a wtxid, even though both are `[u8; 32]`).

use std::io::Write;

use crate::ser::ByteFormat;

/// Marks a raw hash function digest (the output of a hash adapter, before it is wrapped in a
/// named `MarkedDigest`).
pub trait Digest: Default + ByteFormat + Copy {}

/// Wraps a raw [`Digest`] in a newtype named for its role (txid, wtxid, ...), so that digests
/// computed for different purposes cannot be silently substituted for one another.
pub trait MarkedDigest: Default + ByteFormat + Copy {
    /// The underlying digest type being marked.
    type Digest: Digest;

    /// Wraps a digest in the marker.
    fn new(hash: Self::Digest) -> Self;

    /// Returns a copy of the wrapped digest.
    fn internal(&self) -> Self::Digest;

    /// Returns the underlying bytes, in the order they were produced by the hash function.
    fn bytes(&self) -> Vec<u8>;

    /// Returns a clone with the byte order reversed. Used to convert between a hash function's
    /// native (little-endian) digest and the big-endian "display" form conventionally shown to
    /// users.
    fn reversed(&self) -> Self {
        let mut buf = self.bytes();
        buf.reverse();
        Self::read_from(&mut buf.as_slice()).expect("reversed digest has the same fixed length")
    }
}

/// A `Write` sink that accumulates bytes and, when finished, produces a digest of the
/// parameterized marked-digest type.
pub trait MarkedDigestWriter<T: Digest>: Default + Write {
    /// Consumes the writer and returns the accumulated digest.
    fn finish(self) -> T;

    /// Consumes the writer and wraps the resulting digest in a [`MarkedDigest`].
    fn finish_marked<M: MarkedDigest<Digest = T>>(self) -> M
    where
        Self: Sized,
    {
        MarkedDigest::new(self.finish())
    }
}
