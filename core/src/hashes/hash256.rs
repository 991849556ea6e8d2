//! Double-SHA256, and the RIPEMD-160(SHA-256(x)) composite ("HASH160") used by legacy and
//! SegWit script templates.

use std::io::{Read, Result as IOResult, Write};

use ripemd::Ripemd160;
use sha2::{Digest as Sha2Digest, Sha256};

use crate::{
    hashes::marked::{Digest, MarkedDigestWriter},
    ser::{ByteFormat, SerError, SerResult},
};

/// A 32-byte double-SHA256 digest.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256Digest([u8; 32]);

impl Digest for Hash256Digest {}

impl std::fmt::Debug for Hash256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hash256Digest({})", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Hash256Digest {
    fn from(buf: [u8; 32]) -> Self {
        Self(buf)
    }
}

impl AsRef<[u8; 32]> for Hash256Digest {
    fn as_ref(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsMut<[u8; 32]> for Hash256Digest {
    fn as_mut(&mut self) -> &mut [u8; 32] {
        &mut self.0
    }
}

impl ByteFormat for Hash256Digest {
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

/// Accumulates bytes and, on `finish`, emits their double-SHA256 digest.
#[derive(Default)]
pub struct Hash256Writer {
    internal: Sha256,
}

impl Write for Hash256Writer {
    fn write(&mut self, buf: &[u8]) -> IOResult<usize> {
        std::io::Write::write(&mut self.internal, buf)
    }
    fn flush(&mut self) -> IOResult<()> {
        Ok(())
    }
}

impl MarkedDigestWriter<Hash256Digest> for Hash256Writer {
    fn finish(self) -> Hash256Digest {
        let first = self.internal.finalize();
        let second = Sha256::digest(&first);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&second);
        Hash256Digest(digest)
    }
}

/// Computes RIPEMD-160(SHA-256(data)), the "HASH160" used inside P2PKH/P2SH/P2WPKH templates.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let ripe = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripe);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_hashes_hash256_of_a_single_byte() {
        let mut w = Hash256Writer::default();
        w.write_all(&[0u8]).unwrap();
        let digest = w.finish();
        assert_eq!(
            digest,
            Hash256Digest::deserialize_hex(
                "1406e05881e299367766d313e26c05564ec91bf721d31726bd6e46e60689539a"
            )
            .unwrap()
        );
    }

    #[test]
    fn it_computes_hash160() {
        // RIPEMD160(SHA256("")) well-known test vector.
        let out = hash160(b"");
        assert_eq!(
            hex::encode(out),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
    }
}
