//! The TxOut record of the legacy/witness/ForkID transaction family.

use std::io::{Read, Write};

use utxo_core::ser::ByteFormat;

use crate::error::{TxError, TxResult};
use crate::script::OutputScript;

/// The minimum `value` a `TxOut` may carry. Outputs below this are considered uneconomical to
/// spend ("dust") and are refused at construction.
pub const DUST_LIMIT: u64 = 546;

/// A transaction output: an amount and the script that locks it.
///
/// `TxOut::null()` carries a value of `0xffff_ffff_ffff_ffff` and an empty script; it is used
/// only internally, to stand in for blanked outputs during legacy sighash preimage assembly,
/// and is exempt from the dust-limit check that applies to constructed outputs.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TxOut {
    /// The output's value, in the smallest unit of the active network's asset.
    pub value: u64,
    /// The script that locks this output.
    pub output_script: OutputScript,
}

impl TxOut {
    /// Builds a new output, refusing a value below the dust limit.
    pub fn new(value: u64, output_script: OutputScript) -> TxResult<Self> {
        if value < DUST_LIMIT {
            return Err(TxError::BelowDustLimit(value));
        }
        Ok(Self {
            value,
            output_script,
        })
    }

    /// The sentinel "null" output used while blanking outputs for SIGHASH_SINGLE preimages.
    pub fn null() -> Self {
        Self {
            value: 0xffff_ffff_ffff_ffff,
            output_script: OutputScript::null(),
        }
    }
}

impl ByteFormat for TxOut {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        8 + self.output_script.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let value = Self::read_u64_le(reader)?;
        let output_script = OutputScript::read_from(reader)?;
        Ok(Self {
            value,
            output_script,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u64_le(writer, self.value)?;
        len += self.output_script.write_to(writer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_refuses_dust() {
        assert!(matches!(
            TxOut::new(545, OutputScript::null()),
            Err(TxError::BelowDustLimit(545))
        ));
        assert!(TxOut::new(546, OutputScript::null()).is_ok());
    }

    #[test]
    fn it_round_trips() {
        let out = TxOut::new(100_000, OutputScript::new(hex::decode("76a914").unwrap())).unwrap();
        let hex = out.serialize_hex().unwrap();
        assert_eq!(TxOut::deserialize_hex(&hex).unwrap(), out);
    }

    #[test]
    fn the_null_output_bypasses_the_dust_limit() {
        let null = TxOut::null();
        assert_eq!(null.value, 0xffff_ffff_ffff_ffff);
        assert!(null.output_script.is_empty());
    }
}
