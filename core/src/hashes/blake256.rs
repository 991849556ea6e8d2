//! Double- and single-BLAKE-256, used by the Blake family of UTXO networks in place of
//! double-SHA256.
//!
//! BLAKE-256 and BLAKE2s are different algorithms with different outputs, so this module uses
//! `blake_hash`, a dedicated BLAKE-256 implementation, rather than the `blake2` crate some
//! BLAKE2b-based chains in the wider corpus depend on.

use std::io::{Read, Result as IOResult, Write};

use blake_hash::{Blake256 as RealBlake256, Digest as BlakeDigest};

use crate::{
    hashes::marked::{Digest, MarkedDigestWriter},
    ser::{ByteFormat, SerError, SerResult},
};

/// A 32-byte BLAKE-256 digest.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Blake256Digest([u8; 32]);

impl Digest for Blake256Digest {}

impl std::fmt::Debug for Blake256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blake256Digest({})", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Blake256Digest {
    fn from(buf: [u8; 32]) -> Self {
        Self(buf)
    }
}

impl AsRef<[u8; 32]> for Blake256Digest {
    fn as_ref(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsMut<[u8; 32]> for Blake256Digest {
    fn as_mut(&mut self) -> &mut [u8; 32] {
        &mut self.0
    }
}

impl ByteFormat for Blake256Digest {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        32
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
        Self: Sized,
    {
        let mut buf = [0u8; 32];
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        Ok(writer.write(&self.0)?)
    }
}

/// Accumulates bytes and, on `finish`, emits their double-BLAKE-256 digest.
#[derive(Default)]
pub struct Blake256Writer {
    internal: RealBlake256,
}

impl Write for Blake256Writer {
    fn write(&mut self, buf: &[u8]) -> IOResult<usize> {
        BlakeDigest::update(&mut self.internal, buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> IOResult<()> {
        Ok(())
    }
}

impl MarkedDigestWriter<Blake256Digest> for Blake256Writer {
    fn finish(self) -> Blake256Digest {
        let first = self.internal.finalize();
        let second = RealBlake256::digest(&first);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&second);
        Blake256Digest(digest)
    }
}

/// Computes a single (non-doubled) BLAKE-256 digest of `data`. Used for the Blake family's
/// witness-signing hash, which per the wire format is hashed only once.
pub fn single_blake256(data: &[u8]) -> Blake256Digest {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&RealBlake256::digest(data));
    Blake256Digest(digest)
}

/// RIPEMD-160(BLAKE-256(data)): the HASH160 variant used when the active network is the Blake
/// family.
pub fn hash160_blake(data: &[u8]) -> [u8; 20] {
    use ripemd::{Digest as RipemdDigest, Ripemd160};
    let first = RealBlake256::digest(data);
    let ripe = Ripemd160::digest(first);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripe);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_hashes_deterministically() {
        let mut w1 = Blake256Writer::default();
        w1.write_all(b"hello").unwrap();
        let d1 = w1.finish();

        let mut w2 = Blake256Writer::default();
        w2.write_all(b"hello").unwrap();
        let d2 = w2.finish();

        assert_eq!(d1, d2);
        assert_ne!(d1.as_ref(), &[0u8; 32]);
    }

    #[test]
    fn single_and_double_blake_differ() {
        let doubled = {
            let mut w = Blake256Writer::default();
            w.write_all(b"abc").unwrap();
            w.finish()
        };
        let single = single_blake256(b"abc");
        assert_ne!(doubled, single);
    }
}
