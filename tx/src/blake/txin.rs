//! The Blake-family Outpoint and TxIn: an outpoint carrying an extra "tree" selector byte, and
//! an input stripped down to outpoint plus sequence (the spend-authorization bytes live in the
//! separate witness stream).

use std::io::{Read, Write};

use utxo_core::ser::ByteFormat;

use crate::error::TxError;
use crate::legacy::Txid;

/// A reference to a prior output within a specific tree of a Blake-family block: the output's
/// transaction id, its index, and the tree it was mined into (regular or stake).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BlakeOutpoint {
    /// The id of the transaction that created the referenced output.
    pub txid: Txid,
    /// The index of the referenced output within that transaction's output list.
    pub idx: u32,
    /// The tree the referenced transaction was mined into.
    pub tree: u8,
}

impl BlakeOutpoint {
    /// Builds an outpoint from a txid, output index, and tree selector.
    pub fn new(txid: Txid, idx: u32, tree: u8) -> Self {
        Self { txid, idx, tree }
    }

    /// The null outpoint (zero txid, index `0xffff_ffff`, tree 0) used by coinbase inputs.
    pub fn null() -> Self {
        Self {
            txid: Txid::default(),
            idx: 0xffff_ffff,
            tree: 0,
        }
    }
}

impl Default for BlakeOutpoint {
    fn default() -> Self {
        Self::null()
    }
}

impl ByteFormat for BlakeOutpoint {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        37
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        let txid = Txid::read_from(reader)?;
        let idx = Self::read_u32_le(reader)?;
        let mut tree = [0u8; 1];
        reader.read_exact(&mut tree)?;
        Ok(Self {
            txid,
            idx,
            tree: tree[0],
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.txid.write_to(writer)?;
        len += Self::write_u32_le(writer, self.idx)?;
        len += writer.write(&[self.tree])?;
        Ok(len)
    }
}

/// A Blake-family transaction input: a reference to a prior output plus its sequence number.
/// The spend-authorization bytes for this input live in the sibling
/// [`crate::blake::witness::BlakeInputWitness`] at the same index, not here.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BlakeTxIn {
    /// The previous output being spent.
    pub outpoint: BlakeOutpoint,
    /// The sequence number.
    pub sequence: u32,
}

impl BlakeTxIn {
    /// Builds a new input.
    pub fn new(outpoint: BlakeOutpoint, sequence: u32) -> Self {
        Self { outpoint, sequence }
    }
}

impl ByteFormat for BlakeTxIn {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        self.outpoint.serialized_length() + 4
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        let outpoint = BlakeOutpoint::read_from(reader)?;
        let sequence = Self::read_u32_le(reader)?;
        Ok(Self { outpoint, sequence })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.outpoint.write_to(writer)?;
        len += Self::write_u32_le(writer, self.sequence)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_the_null_outpoint_with_its_tree_byte() {
        let op = BlakeOutpoint::null();
        let hex = op.serialize_hex().unwrap();
        assert_eq!(
            hex,
            "0000000000000000000000000000000000000000000000000000000000000000ffffffff00"
        );
        assert_eq!(BlakeOutpoint::deserialize_hex(&hex).unwrap(), op);
    }

    #[test]
    fn it_round_trips_a_txin() {
        let input = BlakeTxIn::new(BlakeOutpoint::new(Txid::default(), 3, 1), 0xffffffff);
        let hex = input.serialize_hex().unwrap();
        assert_eq!(BlakeTxIn::deserialize_hex(&hex).unwrap(), input);
    }
}
