//! The per-input witness stack of the legacy/witness/ForkID transaction family.

use std::io::{Read, Write};

use utxo_core::ser::{prefix_byte_len, read_compact_int, write_compact_int, ByteFormat};

use crate::error::TxResult;
use crate::script::WitnessStackItem;

/// The witness stack attached to a single input: an ordered list of stack items, supplied
/// instead of (or alongside) `stack_script` when the input spends a segregated-witness output.
#[derive(Clone, Debug, Eq, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct InputWitness(Vec<WitnessStackItem>);

impl InputWitness {
    /// Wraps a list of stack items as a witness.
    pub fn new(items: Vec<WitnessStackItem>) -> Self {
        Self(items)
    }

    /// The empty witness, used for legacy (non-witness) inputs carried inside a witness
    /// transaction.
    pub fn null() -> Self {
        Self(vec![])
    }

    /// The stack items, in push order.
    pub fn items(&self) -> &[WitnessStackItem] {
        &self.0
    }

    /// True if this input carries no witness data.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last stack item, conventionally the redeem script for a P2WSH spend.
    pub fn witness_redeem_script(&self) -> Option<&WitnessStackItem> {
        self.0.last()
    }
}

impl ByteFormat for InputWitness {
    type Error = crate::error::TxError;

    fn serialized_length(&self) -> usize {
        let mut len = prefix_byte_len(self.0.len() as u64) as usize;
        for item in self.0.iter() {
            len += item.serialized_length();
        }
        len
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let (count, _) = read_compact_int(reader, false)?;
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            items.push(WitnessStackItem::read_from(reader)?);
        }
        Ok(Self(items))
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut written = write_compact_int(writer, self.0.len() as u64)?;
        for item in self.0.iter() {
            written += item.write_to(writer)?;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_a_witness_stack() {
        let witness = InputWitness::new(vec![
            WitnessStackItem::new(vec![0xde, 0xad]).unwrap(),
            WitnessStackItem::new(vec![]).unwrap(),
        ]);
        let hex = witness.serialize_hex().unwrap();
        assert_eq!(hex, "0202dead00");
        assert_eq!(InputWitness::deserialize_hex(&hex).unwrap(), witness);
    }

    #[test]
    fn empty_witness_is_a_single_zero_byte() {
        assert_eq!(InputWitness::null().serialize_hex().unwrap(), "00");
    }
}
