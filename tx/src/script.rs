//! Opaque byte-blob wrapper types consumed by transaction records. Scripts and witness items
//! carry no assembly/disassembly semantics here; callers that need to interpret them do so
//! externally.

use std::io::{Read, Write};

use utxo_core::ser::{read_compact_int, write_compact_int, ByteFormat, SerError, SerResult};
use utxo_core::{impl_hex_serde, wrap_prefixed_byte_vector};

use crate::error::{TxError, TxResult};

wrap_prefixed_byte_vector!(
    /// The spend-authorization bytes a legacy input contributes directly (as opposed to bytes
    /// supplied by a witness or a redeem script).
    StackScript
);
wrap_prefixed_byte_vector!(
    /// The serialized redeem script an input spends against, when the prevout is P2SH or
    /// P2WSH-shaped.
    RedeemScript
);

/// A single item on a segregated-witness stack. Bounded to 520 bytes, matching the maximum
/// push size consensus allows.
#[derive(Clone, Debug, Eq, PartialEq, Default, Hash, PartialOrd, Ord)]
pub struct WitnessStackItem(Vec<u8>);

/// The maximum size of a single witness stack item.
pub const WITNESS_ITEM_MAX_LEN: usize = 520;

impl WitnessStackItem {
    /// Wraps `v` as a witness stack item, rejecting anything over 520 bytes.
    pub fn new(v: Vec<u8>) -> TxResult<Self> {
        if v.len() > WITNESS_ITEM_MAX_LEN {
            return Err(TxError::WitnessItemTooLarge(v.len()));
        }
        Ok(Self(v))
    }

    /// The empty stack item.
    pub fn null() -> Self {
        Self(vec![])
    }

    /// The wrapped bytes.
    pub fn items(&self) -> &[u8] {
        &self.0
    }

    /// The length of the wrapped bytes (not counting the VarInt prefix).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the wrapped bytes are empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for WitnessStackItem {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ByteFormat for WitnessStackItem {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        utxo_core::ser::prefix_byte_len(self.0.len() as u64) as usize + self.0.len()
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        let (len, _) = read_compact_int(reader, false)?;
        let mut buf = vec![0u8; len as usize];
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut written = write_compact_int(writer, self.0.len() as u64)?;
        written += writer.write(&self.0)?;
        Ok(written)
    }
}

impl_hex_serde!(WitnessStackItem);

/// The maximum declared `output_script` length this implementation will accept on decode.
/// Longer scripts are refused outright rather than silently accepted; see `DESIGN.md` for the
/// reasoning behind pinning this to the VarInt's first two-byte-prefix threshold.
pub const OUTPUT_SCRIPT_MAX_DECODE_LEN: u64 = 0xfd;

/// A locking script attached to a transaction output, with an enforced upper bound on the
/// length this implementation will decode.
#[derive(Clone, Debug, Eq, PartialEq, Default, Hash, PartialOrd, Ord)]
pub struct OutputScript(Vec<u8>);

impl OutputScript {
    /// Wraps `v` as an output script. Construction from already-decoded values is never
    /// length-checked; the decode-time rejection in [`ByteFormat::read_from`] only applies to
    /// bytes coming off the wire.
    pub fn new(v: Vec<u8>) -> Self {
        Self(v)
    }

    /// The empty output script.
    pub fn null() -> Self {
        Self(vec![])
    }

    /// The wrapped bytes.
    pub fn items(&self) -> &[u8] {
        &self.0
    }

    /// The length of the wrapped bytes (not counting the VarInt prefix).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the wrapped bytes are empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for OutputScript {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for OutputScript {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl ByteFormat for OutputScript {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        utxo_core::ser::prefix_byte_len(self.0.len() as u64) as usize + self.0.len()
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let (len, _) = read_compact_int(reader, false)?;
        if len >= OUTPUT_SCRIPT_MAX_DECODE_LEN {
            return Err(TxError::ScriptTooLong(len));
        }
        let mut buf = vec![0u8; len as usize];
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut written = write_compact_int(writer, self.0.len() as u64)?;
        written += writer.write(&self.0)?;
        Ok(written)
    }
}

impl_hex_serde!(OutputScript);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rejects_oversized_witness_items() {
        let buf = vec![0u8; WITNESS_ITEM_MAX_LEN + 1];
        assert!(matches!(
            WitnessStackItem::new(buf),
            Err(TxError::WitnessItemTooLarge(_))
        ));
        assert!(WitnessStackItem::new(vec![0u8; WITNESS_ITEM_MAX_LEN]).is_ok());
    }

    #[test]
    fn it_round_trips_an_output_script() {
        let script = OutputScript::new(hex::decode("76a914").unwrap());
        let hex = script.serialize_hex().unwrap();
        let back = OutputScript::deserialize_hex(&hex).unwrap();
        assert_eq!(script, back);
    }

    #[test]
    fn it_rejects_an_overlong_declared_output_script_length() {
        // 0xfd flag byte declaring a 2-byte length that is itself >= 0xfd.
        let mut buf = vec![0xfdu8];
        buf.extend_from_slice(&253u16.to_le_bytes());
        buf.extend(vec![0u8; 253]);
        assert!(matches!(
            OutputScript::read_from(&mut buf.as_slice()),
            Err(TxError::ScriptTooLong(253))
        ));
    }
}
