//! The Outpoint and TxIn records of the legacy/witness/ForkID transaction family.

use std::io::{Read, Write};

use utxo_core::ser::{prefix_byte_len, read_compact_int, write_compact_int, ByteFormat};

use crate::error::{TxError, TxResult};
use crate::legacy::Txid;
use crate::script::{RedeemScript, StackScript};

/// The maximum combined length of a `TxIn`'s `stack_script` and `redeem_script`.
pub const MAX_SCRIPT_SIG_LEN: usize = 1650;

/// A unique reference to a prior transaction output: the output's transaction id plus its
/// index within that transaction's output list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Outpoint {
    /// The id of the transaction that created the referenced output.
    pub txid: Txid,
    /// The index of the referenced output within that transaction's output list.
    pub idx: u32,
}

impl Outpoint {
    /// Builds an outpoint from a txid and output index.
    pub fn new(txid: Txid, idx: u32) -> Self {
        Self { txid, idx }
    }

    /// The null outpoint (zero txid, index `0xffff_ffff`) used by coinbase inputs.
    pub fn null() -> Self {
        Self {
            txid: Txid::default(),
            idx: 0xffff_ffff,
        }
    }
}

impl Default for Outpoint {
    fn default() -> Self {
        Self::null()
    }
}

impl ByteFormat for Outpoint {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        36
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let txid = Txid::read_from(reader)?;
        let idx = Self::read_u32_le(reader)?;
        Ok(Self { txid, idx })
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = self.txid.write_to(writer)?;
        len += Self::write_u32_le(writer, self.idx)?;
        Ok(len)
    }
}

/// A transaction input: a reference to a prior output, the bytes spending it, and a sequence
/// number (which may additionally encode relative-locktime/RBF signaling).
///
/// `stack_script` and `redeem_script` are tracked separately so that `script_code` (used to
/// build signature preimages) can apply the redeem-script-first rule, but on the wire
/// they are a single concatenated `script_sig` blob; a parsed input always has its full
/// `script_sig` in `stack_script` with an empty `redeem_script`, since the split cannot be
/// recovered from the encoding alone. Callers building a P2SH spend supply the split explicitly.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TxIn {
    /// The previous output being spent.
    pub outpoint: Outpoint,
    /// The directly-supplied spend-authorization bytes.
    pub stack_script: StackScript,
    /// The redeem script, when the prevout is P2SH/P2WSH-shaped.
    pub redeem_script: RedeemScript,
    /// The sequence number.
    pub sequence: u32,
}

impl TxIn {
    /// Builds a new input, rejecting a combined `stack_script`/`redeem_script` length over 1650
    /// bytes.
    pub fn new(
        outpoint: Outpoint,
        stack_script: StackScript,
        redeem_script: RedeemScript,
        sequence: u32,
    ) -> TxResult<Self> {
        let combined = stack_script.len() + redeem_script.len();
        if combined > MAX_SCRIPT_SIG_LEN {
            return Err(TxError::ScriptTooLarge(combined));
        }
        Ok(Self {
            outpoint,
            stack_script,
            redeem_script,
            sequence,
        })
    }

    /// The concatenated on-wire `script_sig`: `stack_script || redeem_script`.
    pub fn script_sig_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.stack_script.len() + self.redeem_script.len());
        buf.extend_from_slice(self.stack_script.items());
        buf.extend_from_slice(self.redeem_script.items());
        buf
    }

    /// A copy of this input with an empty `script_sig`, used while assembling sighash preimages.
    pub fn blanked(&self) -> Self {
        Self {
            outpoint: self.outpoint,
            stack_script: StackScript::null(),
            redeem_script: RedeemScript::null(),
            sequence: self.sequence,
        }
    }
}

impl ByteFormat for TxIn {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        let script_sig_len = self.stack_script.len() + self.redeem_script.len();
        self.outpoint.serialized_length()
            + prefix_byte_len(script_sig_len as u64) as usize
            + script_sig_len
            + 4
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let outpoint = Outpoint::read_from(reader)?;
        let (len, _) = read_compact_int(reader, false)?;
        let mut buf = vec![0u8; len as usize];
        reader.read_exact(&mut buf)?;
        let sequence = Self::read_u32_le(reader)?;
        Ok(Self {
            outpoint,
            stack_script: StackScript::from(buf),
            redeem_script: RedeemScript::null(),
            sequence,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = self.outpoint.write_to(writer)?;
        let script_sig = self.script_sig_bytes();
        len += write_compact_int(writer, script_sig.len() as u64)?;
        len += writer.write(&script_sig)?;
        len += Self::write_u32_le(writer, self.sequence)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_the_null_outpoint() {
        let op = Outpoint::null();
        let hex = op.serialize_hex().unwrap();
        assert_eq!(
            hex,
            "0000000000000000000000000000000000000000000000000000000000000000ffffffff"
        );
        assert_eq!(Outpoint::deserialize_hex(&hex).unwrap(), op);
    }

    #[test]
    fn it_rejects_an_oversized_combined_script() {
        let stack = StackScript::from(vec![0u8; 1000]);
        let redeem = RedeemScript::from(vec![0u8; 651]);
        assert!(matches!(
            TxIn::new(Outpoint::null(), stack, redeem, 0),
            Err(TxError::ScriptTooLarge(1651))
        ));
    }

    #[test]
    fn it_round_trips_a_concatenated_script_sig() {
        let input = TxIn::new(
            Outpoint::null(),
            StackScript::from(vec![0xde, 0xad]),
            RedeemScript::from(vec![0xbe, 0xef]),
            0x1234abcd,
        )
        .unwrap();
        let hex = input.serialize_hex().unwrap();
        let back = TxIn::read_from(&mut hex::decode(&hex).unwrap().as_slice()).unwrap();
        assert_eq!(back.stack_script.items(), &[0xde, 0xad, 0xbe, 0xef]);
        assert!(back.redeem_script.is_empty());
        assert_eq!(back.serialize_hex().unwrap(), hex);
    }
}
