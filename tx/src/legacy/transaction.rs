//! The legacy/witness/ForkID transaction record, and its sighash dispatch.

use std::io::{Read, Write};

use utxo_core::hashes::hash256::{Hash256Digest, Hash256Writer};
use utxo_core::hashes::marked::MarkedDigestWriter;
use utxo_core::network::{self, Family};
use utxo_core::ser::{prefix_byte_len, write_compact_int, ByteFormat};

use crate::error::{TxError, TxResult};
use crate::legacy::txin::TxIn;
use crate::legacy::txout::TxOut;
use crate::legacy::witness::InputWitness;
use crate::legacy::{Txid, Wtxid};
use crate::script::{RedeemScript, StackScript};

/// The maximum number of inputs or outputs a transaction may declare.
pub const MAX_IO_COUNT: usize = 255;

/// The maximum encoded size of a transaction.
pub const MAX_TX_BYTES: usize = 100_000;

/// The sighash modes this implementation recognizes. `None` and `NoneAcp` name valid wire
/// values but are never produced by [`StandardTx::sighash_all`]/[`StandardTx::sighash_single`];
/// they exist so [`Sighash::from_u8`] can round-trip an arbitrary sighash-type byte pulled off
/// the wire (e.g. the trailing byte of an existing signature) without losing information.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sighash {
    /// Commit to all inputs and all outputs.
    All = 0x01,
    /// Commit to all inputs and no outputs. Always refused.
    None = 0x02,
    /// Commit to all inputs and the single output at the signed input's index.
    Single = 0x03,
    /// `All`, but committing only to the signed input.
    AllAcp = 0x81,
    /// `None`, but committing only to the signed input. Always refused.
    NoneAcp = 0x82,
    /// `Single`, but committing only to the signed input.
    SingleAcp = 0x83,
}

impl Sighash {
    /// Parses a sighash-type byte.
    pub fn from_u8(flag: u8) -> TxResult<Self> {
        match flag {
            0x01 => Ok(Sighash::All),
            0x02 => Ok(Sighash::None),
            0x03 => Ok(Sighash::Single),
            0x81 => Ok(Sighash::AllAcp),
            0x82 => Ok(Sighash::NoneAcp),
            0x83 => Ok(Sighash::SingleAcp),
            _ => Err(TxError::UnknownSighash(flag)),
        }
    }

    /// True for the three `*Acp` variants.
    pub fn is_anyone_can_pay(self) -> bool {
        (self as u8) & 0x80 == 0x80
    }
}

/// Arguments for a legacy-style sighash call, pre-BIP143.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegacySighashArgs<'a> {
    /// The index of the input being signed.
    pub index: usize,
    /// The sighash mode.
    pub sighash_flag: Sighash,
    /// The script substituted into the signed input's `script_sig` slot.
    pub prevout_script: &'a [u8],
}

/// Arguments for a BIP-143 witness (or ForkID-replay-protected) sighash call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WitnessSighashArgs<'a> {
    /// The index of the input being signed.
    pub index: usize,
    /// The sighash mode.
    pub sighash_flag: Sighash,
    /// The script code substituted into the preimage.
    pub prevout_script: &'a [u8],
    /// The value of the output being spent.
    pub prevout_value: u64,
}

/// A transaction in the legacy/witness/ForkID family: an optional segwit flag and, when present,
/// one witness per input. Which sighash preimage formula applies to a given call is decided by
/// the active network profile and by whether a prevout value is supplied; this struct itself
/// has no "legacy tx" / "witness tx" subtypes.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StandardTx {
    version: u32,
    vin: Vec<TxIn>,
    vout: Vec<TxOut>,
    witnesses: Option<Vec<InputWitness>>,
    locktime: u32,
}

impl StandardTx {
    /// Builds a new transaction, validating input/output counts, witness-list consistency, and
    /// total encoded size.
    pub fn new(
        version: u32,
        vin: Vec<TxIn>,
        vout: Vec<TxOut>,
        witnesses: Option<Vec<InputWitness>>,
        locktime: u32,
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
        if let Some(w) = &witnesses {
            if w.is_empty() {
                return Err(TxError::WitnessFlagMismatch);
            }
            if w.len() != vin.len() {
                return Err(TxError::WitnessLengthMismatch {
                    got: w.len(),
                    expected: vin.len(),
                });
            }
        }

        let tx = Self {
            version,
            vin,
            vout,
            witnesses,
            locktime,
        };

        let len = tx.serialized_length();
        if len >= MAX_TX_BYTES {
            return Err(TxError::TxTooLarge(len));
        }
        Ok(tx)
    }

    /// The transaction's declared version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The inputs.
    pub fn inputs(&self) -> &[TxIn] {
        &self.vin
    }

    /// The outputs.
    pub fn outputs(&self) -> &[TxOut] {
        &self.vout
    }

    /// The per-input witnesses, if any are present.
    pub fn witnesses(&self) -> Option<&[InputWitness]> {
        self.witnesses.as_deref()
    }

    /// True if this transaction carries a segwit flag and witnesses.
    pub fn has_witness(&self) -> bool {
        self.witnesses.is_some()
    }

    /// The locktime.
    pub fn locktime(&self) -> u32 {
        self.locktime
    }

    /// A deep, independent clone.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// The witness-stripped transaction id: double-SHA256 of the serialization with the segwit
    /// flag and witnesses omitted.
    pub fn txid(&self) -> Txid {
        let mut w = Hash256Writer::default();
        Self::write_u32_le(&mut w, self.version).expect("hash writer is infallible");
        Self::write_prefix_vec(&mut w, &self.vin).expect("hash writer is infallible");
        Self::write_prefix_vec(&mut w, &self.vout).expect("hash writer is infallible");
        Self::write_u32_le(&mut w, self.locktime).expect("hash writer is infallible");
        w.finish_marked()
    }

    /// The witness transaction id: double-SHA256 of the full serialization. Equal to [`Self::txid`]
    /// when no witnesses are present.
    pub fn wtxid(&self) -> Wtxid {
        let mut w = Hash256Writer::default();
        self.write_to(&mut w).expect("hash writer is infallible");
        w.finish_marked()
    }

    /// `sum(prevout_values) - sum(output values)`. `prevout_values` must supply exactly one
    /// value per input, in input order.
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

    /// The script code for input `index`: its `redeem_script` if non-empty, else its witness's
    /// redeem script (last stack item) if any, else its `stack_script`.
    pub fn script_code(&self, index: usize) -> TxResult<Vec<u8>> {
        let input = self.vin.get(index).ok_or(TxError::BadIndex {
            index,
            n_inputs: self.vin.len(),
        })?;
        if !input.redeem_script.is_empty() {
            return Ok(input.redeem_script.items().to_vec());
        }
        if let Some(item) = self
            .witnesses
            .as_ref()
            .and_then(|w| w.get(index))
            .and_then(|w| w.witness_redeem_script())
        {
            if !item.is_empty() {
                return Ok(item.items().to_vec());
            }
        }
        Ok(input.stack_script.items().to_vec())
    }

    fn legacy_preimage_digest(
        &self,
        index: usize,
        flag: Sighash,
        prevout_script: &[u8],
    ) -> TxResult<Hash256Digest> {
        let mut copy_vin = self.vin.clone();
        for (i, input) in copy_vin.iter_mut().enumerate() {
            if i == index {
                input.stack_script = StackScript::from(prevout_script.to_vec());
                input.redeem_script = RedeemScript::null();
            } else {
                input.stack_script = StackScript::null();
                input.redeem_script = RedeemScript::null();
            }
        }
        let mut copy_vout = self.vout.clone();

        if flag == Sighash::Single || flag == Sighash::SingleAcp {
            let mut truncated: Vec<TxOut> = (0..index).map(|_| TxOut::null()).collect();
            truncated.push(copy_vout[index].clone());
            copy_vout = truncated;
            for (i, input) in copy_vin.iter_mut().enumerate() {
                if i != index {
                    input.sequence = 0;
                }
            }
        }

        if flag.is_anyone_can_pay() {
            copy_vin = vec![copy_vin[index].clone()];
        }

        let mut w = Hash256Writer::default();
        Self::write_u32_le(&mut w, self.version)?;
        Self::write_prefix_vec(&mut w, &copy_vin)?;
        Self::write_prefix_vec(&mut w, &copy_vout)?;
        Self::write_u32_le(&mut w, self.locktime)?;
        Self::write_u32_le(&mut w, flag as u32)?;
        Ok(w.finish())
    }

    fn witness_preimage_digest(
        &self,
        index: usize,
        flag: Sighash,
        prevout_script: &[u8],
        prevout_value: u64,
        fork_id: u8,
    ) -> TxResult<Hash256Digest> {
        let input = &self.vin[index];

        let hash_prevouts = if flag.is_anyone_can_pay() {
            Hash256Digest::default()
        } else {
            let mut w = Hash256Writer::default();
            for input in self.vin.iter() {
                input.outpoint.write_to(&mut w)?;
            }
            w.finish()
        };

        let hash_sequence = if flag.is_anyone_can_pay()
            || flag == Sighash::Single
            || flag == Sighash::SingleAcp
        {
            Hash256Digest::default()
        } else {
            let mut w = Hash256Writer::default();
            for input in self.vin.iter() {
                Self::write_u32_le(&mut w, input.sequence)?;
            }
            w.finish()
        };

        let hash_outputs = match flag {
            Sighash::All | Sighash::AllAcp => {
                let mut w = Hash256Writer::default();
                for output in self.vout.iter() {
                    output.write_to(&mut w)?;
                }
                w.finish()
            }
            Sighash::Single | Sighash::SingleAcp => {
                let mut w = Hash256Writer::default();
                self.vout[index].write_to(&mut w)?;
                w.finish()
            }
            _ => Hash256Digest::default(),
        };

        let mut w = Hash256Writer::default();
        Self::write_u32_le(&mut w, self.version)?;
        hash_prevouts.write_to(&mut w)?;
        hash_sequence.write_to(&mut w)?;
        input.outpoint.write_to(&mut w)?;
        write_compact_int(&mut w, prevout_script.len() as u64)?;
        w.write_all(prevout_script)?;
        Self::write_u64_le(&mut w, prevout_value)?;
        Self::write_u32_le(&mut w, input.sequence)?;
        hash_outputs.write_to(&mut w)?;
        Self::write_u32_le(&mut w, self.locktime)?;
        Self::write_u32_le(&mut w, (flag as u32) | (fork_id as u32))?;
        Ok(w.finish())
    }

    /// Guards common to every sighash entry point, regardless of which preimage formula it ends
    /// up using: `SIGHASH_NONE` is refused, `index` must name an input, and `SIGHASH_SINGLE`
    /// must name an output.
    fn guard_sighash_request(&self, index: usize, flag: Sighash) -> TxResult<()> {
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
        Ok(())
    }

    fn dispatch_sighash(
        &self,
        index: usize,
        flag: Sighash,
        prevout_script: &[u8],
        prevout_value: Option<u64>,
    ) -> TxResult<Hash256Digest> {
        self.guard_sighash_request(index, flag)?;

        match network::active().family() {
            Family::Blake => Err(TxError::DecredOpOnNonDecred),
            Family::Standard => match prevout_value {
                Some(value) => self.witness_preimage_digest(index, flag, prevout_script, value, 0),
                None => self.legacy_preimage_digest(index, flag, prevout_script),
            },
            Family::ForkId => {
                let value = prevout_value.ok_or(TxError::MissingPrevoutValue)?;
                let fork_id = network::active().fork_id();
                self.witness_preimage_digest(index, flag, prevout_script, value, fork_id)
            }
        }
    }

    /// Computes the `SIGHASH_ALL` digest for input `index`.
    pub fn sighash_all(
        &self,
        index: usize,
        prevout_script: &[u8],
        prevout_value: Option<u64>,
        anyone_can_pay: bool,
    ) -> TxResult<Hash256Digest> {
        let flag = if anyone_can_pay {
            Sighash::AllAcp
        } else {
            Sighash::All
        };
        self.dispatch_sighash(index, flag, prevout_script, prevout_value)
    }

    /// Computes the `SIGHASH_SINGLE` digest for input `index`. Fails with
    /// [`TxError::RefusedSighashSingleBug`] if `index` has no matching output.
    pub fn sighash_single(
        &self,
        index: usize,
        prevout_script: &[u8],
        prevout_value: Option<u64>,
        anyone_can_pay: bool,
    ) -> TxResult<Hash256Digest> {
        let flag = if anyone_can_pay {
            Sighash::SingleAcp
        } else {
            Sighash::Single
        };
        self.dispatch_sighash(index, flag, prevout_script, prevout_value)
    }

    /// `SIGHASH_NONE` is refused unconditionally.
    pub fn sighash_none(&self) -> TxResult<Hash256Digest> {
        Err(TxError::DisallowedSighashNone)
    }

    /// Equivalent to [`Self::sighash_all`]/[`Self::sighash_single`], taking a bundled argument
    /// struct and forcing a legacy (pre-BIP143) preimage regardless of the active profile.
    /// Subject to the same `SIGHASH_NONE`/index/`SIGHASH_SINGLE` guards as
    /// [`Self::sighash_all`].
    pub fn sighash_legacy(&self, args: &LegacySighashArgs) -> TxResult<Hash256Digest> {
        self.guard_sighash_request(args.index, args.sighash_flag)?;
        self.legacy_preimage_digest(args.index, args.sighash_flag, args.prevout_script)
    }

    /// Equivalent to [`Self::sighash_all`]/[`Self::sighash_single`], taking a bundled argument
    /// struct and forcing a BIP-143 witness preimage regardless of the active profile's
    /// `prevout_value` plumbing. `fork_id` is folded in from the active profile as usual.
    /// Subject to the same `SIGHASH_NONE`/index/`SIGHASH_SINGLE` guards as
    /// [`Self::sighash_all`].
    pub fn sighash_witness(&self, args: &WitnessSighashArgs) -> TxResult<Hash256Digest> {
        self.guard_sighash_request(args.index, args.sighash_flag)?;
        let fork_id = match network::active().family() {
            Family::Blake => return Err(TxError::DecredOpOnNonDecred),
            Family::ForkId => network::active().fork_id(),
            Family::Standard => 0,
        };
        self.witness_preimage_digest(
            args.index,
            args.sighash_flag,
            args.prevout_script,
            args.prevout_value,
            fork_id,
        )
    }
}

fn read_varint_count_from_first_byte<R: Read>(reader: &mut R, first: u8) -> TxResult<u64> {
    Ok(match first {
        0xfd => {
            let mut buf = [0u8; 2];
            reader.read_exact(&mut buf)?;
            u16::from_le_bytes(buf) as u64
        }
        0xfe => {
            let mut buf = [0u8; 4];
            reader.read_exact(&mut buf)?;
            u32::from_le_bytes(buf) as u64
        }
        0xff => {
            let mut buf = [0u8; 8];
            reader.read_exact(&mut buf)?;
            u64::from_le_bytes(buf)
        }
        b => b as u64,
    })
}

impl ByteFormat for StandardTx {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        let mut len = 4; // version
        if self.witnesses.is_some() {
            len += 2;
        }
        len += prefix_byte_len(self.vin.len() as u64) as usize;
        len += self.vin.iter().map(|i| i.serialized_length()).sum::<usize>();
        len += prefix_byte_len(self.vout.len() as u64) as usize;
        len += self
            .vout
            .iter()
            .map(|o| o.serialized_length())
            .sum::<usize>();
        if let Some(witnesses) = &self.witnesses {
            len += witnesses
                .iter()
                .map(|w| w.serialized_length())
                .sum::<usize>();
        }
        len += 4; // locktime
        len
    }

    fn read_from<R>(reader: &mut R) -> TxResult<Self>
    where
        R: Read,
    {
        let version = Self::read_u32_le(reader)?;

        let mut marker = [0u8; 1];
        reader.read_exact(&mut marker)?;

        if marker[0] == 0 {
            let mut flag = [0u8; 1];
            reader.read_exact(&mut flag)?;
            if flag[0] != 1 {
                return Err(TxError::InvalidSegwitFlag([marker[0], flag[0]]));
            }
            let vin = Self::read_prefix_vec(reader, false)?;
            let vout = Self::read_prefix_vec(reader, false)?;
            let mut witnesses = Vec::with_capacity(vin.len());
            for _ in vin.iter() {
                witnesses.push(InputWitness::read_from(reader)?);
            }
            let locktime = Self::read_u32_le(reader)?;
            Self::new(version, vin, vout, Some(witnesses), locktime)
        } else {
            let n_in = read_varint_count_from_first_byte(reader, marker[0])?;
            let mut vin = Vec::with_capacity(n_in as usize);
            for _ in 0..n_in {
                vin.push(TxIn::read_from(reader)?);
            }
            let vout = Self::read_prefix_vec(reader, false)?;
            let locktime = Self::read_u32_le(reader)?;
            Self::new(version, vin, vout, None, locktime)
        }
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u32_le(writer, self.version)?;
        if self.witnesses.is_some() {
            len += writer.write(&[0u8, 1u8])?;
        }
        len += Self::write_prefix_vec(writer, &self.vin)?;
        len += Self::write_prefix_vec(writer, &self.vout)?;
        if let Some(witnesses) = &self.witnesses {
            for w in witnesses.iter() {
                len += w.write_to(writer)?;
            }
        }
        len += Self::write_u32_le(writer, self.locktime)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::txin::Outpoint;
    use crate::script::OutputScript;

    const LEGACY_TX_HEX: &str = "0100000001813f79011acb80925dfe69b3def355fe914bd1d96a3f5f71bf8303c6a989c7d1000000006b483045022100ed81ff192e75a3fd2304004dcadb746fa5e24c5031ccfcf21320b0277457c98f02207a986d955c6e0cb35d446a89d3f56100f4d7f67801c31967743a9c8e10615bed01210349fc4e631e3624a545de3f89f5d8684c7b8138bd94bdd531d2e213bf016b278afeffffff02a135ef01000000001976a914bc3b654dca7e56b04dca18f2566cdaf02e8d9ada88ac99c39800000000001976a9141c4bc762dd5423e332166702cb75f40df79fea1288ac19430600";

    #[test]
    fn it_round_trips_a_legacy_tx_and_computes_its_txid() {
        let tx = StandardTx::deserialize_hex(LEGACY_TX_HEX).unwrap();
        assert_eq!(tx.serialized_length(), LEGACY_TX_HEX.len() / 2);
        assert_eq!(tx.serialize_hex().unwrap(), LEGACY_TX_HEX);

        let txid = Txid::deserialize_hex(
            "03ee4f7a4e68f802303bc659f8f817964b4b74fe046facc3ae1be4679d622c45",
        )
        .unwrap();
        assert_eq!(tx.txid(), txid);
        assert_eq!(tx.wtxid().0, tx.txid().0);
    }

    #[test]
    fn it_computes_legacy_sighashes() {
        let tx = StandardTx::deserialize_hex(LEGACY_TX_HEX).unwrap();
        let prevout_script = hex::decode("17a91424d6008f143af0cca57344069c46661aa4fcea2387").unwrap();

        let all = Hash256Digest::deserialize_hex(
            "b85c4f8d1377cc138225dd9b319d0a4ca547f7884270640f44c5fcdf269e0fe8",
        )
        .unwrap();
        let all_acp = Hash256Digest::deserialize_hex(
            "3b67a5114cc9fc837ddd6f6ec11bde38db5f68c34ab6ece2a043d7b25f2cf8bb",
        )
        .unwrap();
        let single = Hash256Digest::deserialize_hex(
            "1dab67d768be0380fc800098005d1f61744ffe585b0852f8d7adc12121a86938",
        )
        .unwrap();
        let single_acp = Hash256Digest::deserialize_hex(
            "d4687b93c0a9090dc0a3384cd3a594ce613834bb37abc56f6032e96c597547e3",
        )
        .unwrap();

        assert_eq!(
            tx.sighash_all(0, &prevout_script, None, false).unwrap(),
            all
        );
        assert_eq!(
            tx.sighash_all(0, &prevout_script, None, true).unwrap(),
            all_acp
        );
        assert_eq!(
            tx.sighash_single(0, &prevout_script, None, false).unwrap(),
            single
        );
        assert_eq!(
            tx.sighash_single(0, &prevout_script, None, true).unwrap(),
            single_acp
        );
    }

    #[test]
    fn it_refuses_sighash_none() {
        let tx = StandardTx::deserialize_hex(LEGACY_TX_HEX).unwrap();
        assert!(matches!(
            tx.sighash_none(),
            Err(TxError::DisallowedSighashNone)
        ));
    }

    const WITNESS_TX_HEX: &str = "02000000000101ee9242c89e79ab2aa537408839329895392b97505b3496d5543d6d2f531b94d20000000000fdffffff0173d301000000000017a914bba5acbec4e6e3374a0345bf3609fa7cfea825f18700cafd0700";

    #[test]
    fn it_round_trips_a_witness_tx_and_computes_its_sighashes() {
        let tx = StandardTx::deserialize_hex(WITNESS_TX_HEX).unwrap();
        assert_eq!(tx.serialized_length(), WITNESS_TX_HEX.len() / 2);
        assert_eq!(tx.serialize_hex().unwrap(), WITNESS_TX_HEX);
        assert!(tx.has_witness());

        let prevout_script =
            hex::decode("160014758ce550380d964051086798d6546bebdca27a73").unwrap();

        let txid = Txid::deserialize_hex(
            "9e77087321b870859ebf08976d665c42d9f98cad18fff6a05a91c1d2da6d6c41",
        )
        .unwrap();
        assert_eq!(tx.txid(), txid);

        let all = Hash256Digest::deserialize_hex(
            "135754ab872e4943f7a9c30d6143c4c7187e33d0f63c75ec82a7f9a15e2f2d00",
        )
        .unwrap();
        let all_acp = Hash256Digest::deserialize_hex(
            "cc7438d5b15e93ba612dcd227cf1937c35273675b3aa7d1b771573667376ddf6",
        )
        .unwrap();
        let single = Hash256Digest::deserialize_hex(
            "d04631d2742e6fd8e80e2e4309dece65becca41d37fd6bc0bcba041c52d824d5",
        )
        .unwrap();
        let single_acp = Hash256Digest::deserialize_hex(
            "ffea9cdda07170af9bc9967cedf485e9fe15b78a622e0c196c0b6fc64f40c615",
        )
        .unwrap();

        assert_eq!(
            tx.sighash_all(0, &prevout_script, Some(120_000), false)
                .unwrap(),
            all
        );
        assert_eq!(
            tx.sighash_all(0, &prevout_script, Some(120_000), true)
                .unwrap(),
            all_acp
        );
        assert_eq!(
            tx.sighash_single(0, &prevout_script, Some(120_000), false)
                .unwrap(),
            single
        );
        assert_eq!(
            tx.sighash_single(0, &prevout_script, Some(120_000), true)
                .unwrap(),
            single_acp
        );

        let legacy_args = LegacySighashArgs {
            index: 0,
            sighash_flag: Sighash::All,
            prevout_script: &prevout_script,
        };
        let witness_args = WitnessSighashArgs {
            index: 0,
            sighash_flag: Sighash::All,
            prevout_script: &prevout_script,
            prevout_value: 120_000,
        };
        assert_eq!(tx.sighash_witness(&witness_args).unwrap(), all);
        assert_ne!(
            tx.sighash_legacy(&legacy_args).unwrap(),
            tx.sighash_witness(&witness_args).unwrap()
        );
    }

    #[test]
    fn it_refuses_the_sighash_single_bug() {
        let outpoint = Outpoint::new(Txid::default(), 0);
        let input = || {
            TxIn::new(
                outpoint,
                StackScript::null(),
                RedeemScript::null(),
                0xffffffff,
            )
            .unwrap()
        };
        let output = TxOut::new(50_000, OutputScript::null()).unwrap();
        let tx = StandardTx::new(
            1,
            vec![input(), input(), input()],
            vec![output.clone(), output],
            None,
            0,
        )
        .unwrap();

        assert!(matches!(
            tx.sighash_single(2, &[], None, false),
            Err(TxError::RefusedSighashSingleBug {
                index: 2,
                n_outputs: 2
            })
        ));
    }

    #[test]
    fn it_computes_fee() {
        let outpoint = Outpoint::new(Txid::default(), 0);
        let input = TxIn::new(outpoint, StackScript::null(), RedeemScript::null(), 0).unwrap();
        let output = TxOut::new(90_000, OutputScript::null()).unwrap();
        let tx = StandardTx::new(1, vec![input], vec![output], None, 0).unwrap();
        assert_eq!(tx.fee(&[100_000]).unwrap(), 10_000);
        assert!(matches!(
            tx.fee(&[1, 2]),
            Err(TxError::FeeValueCountMismatch {
                got: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn it_rejects_a_transaction_with_no_inputs() {
        let output = TxOut::new(50_000, OutputScript::null()).unwrap();
        assert!(matches!(
            StandardTx::new(1, vec![], vec![output], None, 0),
            Err(TxError::TooFewInputs)
        ));
    }

    #[test]
    fn copy_produces_an_equal_but_distinct_value() {
        let tx = StandardTx::deserialize_hex(LEGACY_TX_HEX).unwrap();
        let copy = tx.copy();
        assert_eq!(tx, copy);
    }
}
