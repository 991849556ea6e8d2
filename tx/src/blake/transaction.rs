//! The Blake-family transaction record: two independently-hashed streams (prefix and witness),
//! and a BLAKE-256 sighash formula that mixes a digest of each.

use std::io::{Read, Write};

use utxo_core::hashes::blake256::{single_blake256, Blake256Digest, Blake256Writer};
use utxo_core::hashes::marked::MarkedDigestWriter;
use utxo_core::network::{self, Family};
use utxo_core::ser::ByteFormat;

use crate::blake::txin::BlakeTxIn;
use crate::blake::txout::BlakeTxOut;
use crate::blake::witness::BlakeInputWitness;
use crate::blake::{BlakeTxid, WitnessHash};
use crate::error::{TxError, TxResult};
use crate::legacy::transaction::{MAX_IO_COUNT, MAX_TX_BYTES};
use crate::legacy::transaction::Sighash;

/// A Blake-family transaction: version, inputs, outputs, locktime, expiry, and one witness per
/// input, encoded as two logically separate streams.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlakeTx {
    version: u32,
    vin: Vec<BlakeTxIn>,
    vout: Vec<BlakeTxOut>,
    witnesses: Vec<BlakeInputWitness>,
    locktime: u32,
    expiry: u32,
}

impl BlakeTx {
    /// Builds a new transaction. Unlike the legacy/witness family, a witness entry is mandatory
    /// for every input.
    pub fn new(
        version: u32,
        vin: Vec<BlakeTxIn>,
        vout: Vec<BlakeTxOut>,
        witnesses: Vec<BlakeInputWitness>,
        locktime: u32,
        expiry: u32,
    ) -> TxResult<Self> {
        if vin.is_empty() {
            return Err(TxError::TooFewInputs);
        }
        if vin.len() > MAX_IO_COUNT {
            return Err(TxError::TooManyInputs(vin.len()));
        }
        if vout.is_empty() {
            return Err(TxError::TooFewOutputs);
        }
        if vout.len() > MAX_IO_COUNT {
            return Err(TxError::TooManyOutputs(vout.len()));
        }
        if witnesses.len() != vin.len() {
            return Err(TxError::WitnessLengthMismatch {
                got: witnesses.len(),
                expected: vin.len(),
            });
        }

        let tx = Self {
            version,
            vin,
            vout,
            witnesses,
            locktime,
            expiry,
        };

        let len = tx.prefix_stream()?.len() + tx.witness_stream()?.len();
        if len >= MAX_TX_BYTES {
            return Err(TxError::TxTooLarge(len));
        }
        Ok(tx)
    }

    /// The inputs.
    pub fn inputs(&self) -> &[BlakeTxIn] {
        &self.vin
    }

    /// The outputs.
    pub fn outputs(&self) -> &[BlakeTxOut] {
        &self.vout
    }

    /// The per-input witnesses.
    pub fn witnesses(&self) -> &[BlakeInputWitness] {
        &self.witnesses
    }

    /// A deep, independent clone.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn prefix_stream(&self) -> TxResult<Vec<u8>> {
        let mut buf = vec![];
        Self::write_u32_le(&mut buf, self.version)?;
        Self::write_prefix_vec(&mut buf, &self.vin)?;
        Self::write_prefix_vec(&mut buf, &self.vout)?;
        Self::write_u32_le(&mut buf, self.locktime)?;
        Self::write_u32_le(&mut buf, self.expiry)?;
        Ok(buf)
    }

    fn witness_stream(&self) -> TxResult<Vec<u8>> {
        let mut buf = vec![];
        Self::write_u32_le(&mut buf, self.version)?;
        Self::write_prefix_vec(&mut buf, &self.witnesses)?;
        Ok(buf)
    }

    /// The double-BLAKE-256 digest of the prefix stream alone.
    pub fn tx_id(&self) -> TxResult<BlakeTxid> {
        let mut w = Blake256Writer::default();
        w.write_all(&self.prefix_stream()?)?;
        Ok(w.finish_marked())
    }

    /// The double-BLAKE-256 digest of the witness stream alone.
    pub fn witness_hash(&self) -> TxResult<WitnessHash> {
        let mut w = Blake256Writer::default();
        w.write_all(&self.witness_stream()?)?;
        Ok(w.finish_marked())
    }

    /// `sum(prevout_values_for_each_input) - sum(output_values)`.
    pub fn fee(&self, prevout_values: &[u64]) -> TxResult<i64> {
        if prevout_values.len() != self.vin.len() {
            return Err(TxError::FeeValueCountMismatch {
                got: prevout_values.len(),
                expected: self.vin.len(),
            });
        }
        let total_in: i128 = prevout_values.iter().map(|v| *v as i128).sum();
        let total_out: i128 = self.vout.iter().map(|o| o.value as i128).sum();
        Ok((total_in - total_out) as i64)
    }

    /// The witness-signing serialization for input `i`: a re-emission of the witness stream
    /// with every `stack_script` blanked except input `i`'s, which is replaced by
    /// `prevout_script`.
    fn witness_signing_stream(&self, index: usize, prevout_script: &[u8]) -> TxResult<Vec<u8>> {
        let mut buf = vec![];
        Self::write_u32_le(&mut buf, self.version)?;
        utxo_core::ser::write_compact_int(&mut buf, self.witnesses.len() as u64)
            .map_err(TxError::from)?;
        for (i, w) in self.witnesses.iter().enumerate() {
            if i == index {
                let mut signing = w.blanked();
                signing.stack_script = crate::script::StackScript::from(prevout_script.to_vec());
                signing.write_to(&mut buf)?;
            } else {
                w.blanked().write_to(&mut buf)?;
            }
        }
        Ok(buf)
    }

    /// The single (non-doubled) BLAKE-256 digest of [`Self::witness_signing_stream`].
    fn witness_signing_hash(&self, index: usize, prevout_script: &[u8]) -> TxResult<Blake256Digest> {
        Ok(single_blake256(&self.witness_signing_stream(index, prevout_script)?))
    }

    fn prefix_with_sighash_rules(&self, index: usize, flag: Sighash) -> TxResult<Vec<u8>> {
        let mut copy_vout = self.vout.clone();

        if flag == Sighash::Single || flag == Sighash::SingleAcp {
            let mut truncated: Vec<BlakeTxOut> = (0..index).map(|_| BlakeTxOut::null()).collect();
            truncated.push(copy_vout[index].clone());
            copy_vout = truncated;
        }

        let mut copy_vin = self.vin.clone();
        if flag == Sighash::Single || flag == Sighash::SingleAcp {
            for (i, input) in copy_vin.iter_mut().enumerate() {
                if i != index {
                    input.sequence = 0;
                }
            }
        }
        let copy_vin = if flag.is_anyone_can_pay() {
            vec![copy_vin[index]]
        } else {
            copy_vin
        };

        let mut buf = vec![];
        Self::write_u32_le(&mut buf, self.version)?;
        Self::write_prefix_vec(&mut buf, &copy_vin)?;
        Self::write_prefix_vec(&mut buf, &copy_vout)?;
        Self::write_u32_le(&mut buf, self.locktime)?;
        Self::write_u32_le(&mut buf, self.expiry)?;
        Ok(buf)
    }

    fn compute(&self, index: usize, flag: Sighash, prevout_script: &[u8]) -> TxResult<Blake256Digest> {
        if network::active().family() != Family::Blake {
            return Err(TxError::DecredOpOnNonDecred);
        }
        if flag == Sighash::None || flag == Sighash::NoneAcp {
            return Err(TxError::DisallowedSighashNone);
        }
        if index >= self.vin.len() {
            return Err(TxError::BadIndex {
                index,
                n_inputs: self.vin.len(),
            });
        }
        if (flag == Sighash::Single || flag == Sighash::SingleAcp) && index >= self.vout.len() {
            return Err(TxError::RefusedSighashSingleBug {
                index,
                n_outputs: self.vout.len(),
            });
        }

        let prefix_digest = {
            let mut w = Blake256Writer::default();
            w.write_all(&self.prefix_with_sighash_rules(index, flag)?)?;
            w.finish()
        };
        let witness_digest = self.witness_signing_hash(index, prevout_script)?;

        let mut preimage = vec![];
        preimage.extend_from_slice(&(flag as u32).to_le_bytes());
        preimage.extend_from_slice(prefix_digest.as_ref());
        preimage.extend_from_slice(witness_digest.as_ref());
        Ok(single_blake256(&preimage))
    }

    /// Computes the `SIGHASH_ALL` digest for input `index`.
    pub fn sighash_all(
        &self,
        index: usize,
        prevout_script: &[u8],
        anyone_can_pay: bool,
    ) -> TxResult<Blake256Digest> {
        let flag = if anyone_can_pay {
            Sighash::AllAcp
        } else {
            Sighash::All
        };
        self.compute(index, flag, prevout_script)
    }

    /// Computes the `SIGHASH_SINGLE` digest for input `index`.
    pub fn sighash_single(
        &self,
        index: usize,
        prevout_script: &[u8],
        anyone_can_pay: bool,
    ) -> TxResult<Blake256Digest> {
        let flag = if anyone_can_pay {
            Sighash::SingleAcp
        } else {
            Sighash::Single
        };
        self.compute(index, flag, prevout_script)
    }

    /// `SIGHASH_NONE` is refused unconditionally.
    pub fn sighash_none(&self) -> TxResult<Blake256Digest> {
        Err(TxError::DisallowedSighashNone)
    }
}

impl ByteFormat for BlakeTx {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        self.prefix_stream().map(|b| b.len()).unwrap_or(0)
            + self.witness_stream().map(|b| b.len()).unwrap_or(0)
    }

    /// Unimplemented: parsing a Blake-family transaction is not supported.
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
        let prefix = self.prefix_stream()?;
        let witness = self.witness_stream()?;
        writer.write_all(&prefix)?;
        writer.write_all(&witness)?;
        Ok(prefix.len() + witness.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blake::txin::{BlakeOutpoint, BlakeTxIn};
    use crate::legacy::Txid;
    use crate::script::{OutputScript, RedeemScript, StackScript};
    use utxo_core::network::{self, Profile};

    fn sample_tx() -> BlakeTx {
        let outpoint = BlakeOutpoint::new(Txid::default(), 0xffffffff, 0);
        let input = BlakeTxIn::new(outpoint, 0xffffffff);
        let output = BlakeTxOut::new(
            5_000_000_000,
            0xf0f0,
            OutputScript::new(hex::decode("76a914000000000000000000000000000000000000000088ac").unwrap()),
        )
        .unwrap();
        let witness = BlakeInputWitness::new(0, 0, 0, StackScript::null(), RedeemScript::null());
        BlakeTx::new(1, vec![input], vec![output], vec![witness], 0, 0).unwrap()
    }

    #[test]
    fn tx_id_is_computed_from_the_prefix_stream_alone() {
        let tx = sample_tx();
        let prefix_only = {
            let mut w = Blake256Writer::default();
            w.write_all(&tx.prefix_stream().unwrap()).unwrap();
            w.finish()
        };
        let via_api: Blake256Digest = tx.tx_id().unwrap().into();
        assert_eq!(via_api, prefix_only);

        // Changing a witness field must not move the tx id.
        let mut other = tx.clone();
        other.witnesses[0].stack_script = StackScript::from(vec![1, 2, 3]);
        assert_eq!(other.tx_id().unwrap(), tx.tx_id().unwrap());
    }

    #[test]
    fn witness_hash_changes_when_a_witness_field_changes_but_tx_id_does_not() {
        let tx = sample_tx();
        let mut other = tx.clone();
        other.witnesses[0].stack_script = StackScript::from(vec![1, 2, 3]);
        assert_ne!(tx.witness_hash().unwrap(), other.witness_hash().unwrap());
        assert_eq!(tx.tx_id().unwrap(), other.tx_id().unwrap());
    }

    #[test]
    fn sighash_requires_the_blake_profile() {
        let original = network::active();
        network::set_active(Profile::witness());
        let tx = sample_tx();
        assert!(matches!(
            tx.sighash_all(0, &[], false),
            Err(TxError::DecredOpOnNonDecred)
        ));
        network::set_active(original);
    }

    #[test]
    fn sighash_all_is_deterministic_and_sensitive_to_the_prevout_script() {
        let original = network::active();
        network::set_active(Profile::blake());

        let tx = sample_tx();
        let a = tx.sighash_all(0, &[0xaa], false).unwrap();
        let b = tx.sighash_all(0, &[0xaa], false).unwrap();
        let c = tx.sighash_all(0, &[0xbb], false).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        network::set_active(original);
    }

    #[test]
    fn sighash_none_is_always_refused() {
        let original = network::active();
        network::set_active(Profile::blake());
        let tx = sample_tx();
        assert!(matches!(tx.sighash_none(), Err(TxError::DisallowedSighashNone)));
        network::set_active(original);
    }

    #[test]
    fn sighash_single_refuses_the_out_of_range_bug() {
        let original = network::active();
        network::set_active(Profile::blake());

        let outpoint = BlakeOutpoint::null();
        let input = || BlakeTxIn::new(outpoint, 0xffffffff);
        let output = BlakeTxOut::new(5_000_000_000, 0, OutputScript::null()).unwrap();
        let witness = || BlakeInputWitness::new(0, 0, 0, StackScript::null(), RedeemScript::null());
        let tx = BlakeTx::new(
            1,
            vec![input(), input(), input()],
            vec![output.clone(), output],
            vec![witness(), witness(), witness()],
            0,
            0,
        )
        .unwrap();

        assert!(matches!(
            tx.sighash_single(2, &[], false),
            Err(TxError::RefusedSighashSingleBug {
                index: 2,
                n_outputs: 2
            })
        ));

        network::set_active(original);
    }

    #[test]
    fn parsing_is_not_implemented() {
        let buf = [0u8; 4];
        assert!(matches!(
            BlakeTx::read_from(&mut buf.as_slice()),
            Err(TxError::NotImplemented)
        ));
    }

    #[test]
    fn copy_produces_an_equal_but_distinct_value() {
        let tx = sample_tx();
        assert_eq!(tx, tx.copy());
    }
}
