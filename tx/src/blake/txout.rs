//! The Blake-family TxOut: a legacy-shaped output with an extra 2-byte version field.

use std::io::{Read, Write};

use utxo_core::ser::ByteFormat;

use crate::error::{TxError, TxResult};
use crate::legacy::txout::DUST_LIMIT;
use crate::script::OutputScript;

/// A Blake-family transaction output: an amount, a script version, and the locking script.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlakeTxOut {
    /// The output's value, in atoms.
    pub value: u64,
    /// The output script's version, usually `0`.
    pub script_version: u16,
    /// The script that locks this output.
    pub output_script: OutputScript,
}

impl BlakeTxOut {
    /// Builds a new output, refusing a value below the dust limit.
    pub fn new(value: u64, script_version: u16, output_script: OutputScript) -> TxResult<Self> {
        if value < DUST_LIMIT {
            return Err(TxError::BelowDustLimit(value));
        }
        Ok(Self {
            value,
            script_version,
            output_script,
        })
    }

    /// The sentinel "null" output used while blanking outputs for ALL-preimage assembly.
    pub fn null() -> Self {
        Self {
            value: 0xffff_ffff_ffff_ffff,
            script_version: 0,
            output_script: OutputScript::null(),
        }
    }
}

impl ByteFormat for BlakeTxOut {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        8 + 2 + self.output_script.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let value = Self::read_u64_le(reader)?;
        let mut version_buf = [0u8; 2];
        reader.read_exact(&mut version_buf)?;
        let output_script = OutputScript::read_from(reader)?;
        Ok(Self {
            value,
            script_version: u16::from_le_bytes(version_buf),
            output_script,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u64_le(writer, self.value)?;
        len += writer.write(&self.script_version.to_le_bytes())?;
        len += self.output_script.write_to(writer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_with_its_version_field() {
        let out = BlakeTxOut::new(
            5_000_000_000,
            0xf0f0,
            OutputScript::new(hex::decode("76a914").unwrap()),
        )
        .unwrap();
        let hex = out.serialize_hex().unwrap();
        let back = BlakeTxOut::deserialize_hex(&hex).unwrap();
        assert_eq!(back, out);
        assert_eq!(back.script_version, 0xf0f0);
    }

    #[test]
    fn it_refuses_dust() {
        assert!(matches!(
            BlakeTxOut::new(10, 0, OutputScript::null()),
            Err(TxError::BelowDustLimit(10))
        ));
    }
}
