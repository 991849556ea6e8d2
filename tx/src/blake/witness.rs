//! The Blake-family per-input witness: value, block height, and index of the spent output, plus
//! the scripts that authorize the spend. Unlike the legacy family, every input carries one of
//! these, and it lives in a stream separate from the input's outpoint/sequence.

use std::io::{Read, Write};

use utxo_core::ser::ByteFormat;

use crate::error::{TxError, TxResult};
use crate::script::{RedeemScript, StackScript};

/// The spend-authorization data for one Blake-family input, carried in the witness stream.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlakeInputWitness {
    /// The value of the output being spent, as recorded by the spending transaction.
    pub value: u64,
    /// The block height the spent output was mined at.
    pub height: u32,
    /// The index of the spent output's transaction within that block.
    pub index: u32,
    /// The directly-supplied spend-authorization bytes.
    pub stack_script: StackScript,
    /// The redeem script, when the prevout is script-hash-shaped.
    pub redeem_script: RedeemScript,
}

impl BlakeInputWitness {
    /// Builds a new witness entry.
    pub fn new(
        value: u64,
        height: u32,
        index: u32,
        stack_script: StackScript,
        redeem_script: RedeemScript,
    ) -> Self {
        Self {
            value,
            height,
            index,
            stack_script,
            redeem_script,
        }
    }

    /// A copy of this witness with its `stack_script` emptied, used while assembling the
    /// per-input witness-signing serialization.
    pub fn blanked(&self) -> Self {
        Self {
            value: self.value,
            height: self.height,
            index: self.index,
            stack_script: StackScript::null(),
            redeem_script: self.redeem_script.clone(),
        }
    }
}

impl ByteFormat for BlakeInputWitness {
    type Error = crate::error::TxError;

    fn serialized_length(&self) -> usize {
        8 + 4
            + 4
            + self.stack_script.serialized_length()
            + self.redeem_script.serialized_length()
    }

    /// Unimplemented: parsing a Blake-family witness stream back into records is not supported.
    fn read_from<R>(_reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        Err(TxError::NotImplemented)
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u64_le(writer, self.value)?;
        len += Self::write_u32_le(writer, self.height)?;
        len += Self::write_u32_le(writer, self.index)?;
        len += self.stack_script.write_to(writer)?;
        len += self.redeem_script.write_to(writer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_serializes_a_witness_entry() {
        let w = BlakeInputWitness::new(
            5_000_000_000,
            11,
            1,
            StackScript::from(vec![0xde, 0xad]),
            RedeemScript::null(),
        );
        let hex = w.serialize_hex().unwrap();
        assert_eq!(hex, "00f2052a010000000b0000000100000002dead00");
    }

    #[test]
    fn parsing_a_witness_stream_is_not_implemented() {
        let buf = [0u8; 18];
        assert!(matches!(
            BlakeInputWitness::read_from(&mut buf.as_slice()),
            Err(TxError::NotImplemented)
        ));
    }

    #[test]
    fn blanking_empties_only_the_stack_script() {
        let w = BlakeInputWitness::new(1, 1, 1, StackScript::from(vec![1, 2, 3]), RedeemScript::null());
        let blanked = w.blanked();
        assert!(blanked.stack_script.is_empty());
        assert_eq!(blanked.value, w.value);
    }
}
