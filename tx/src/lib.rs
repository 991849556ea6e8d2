//! Transaction construction, parsing, and signature-hash computation across several UTXO
//! consensus rule sets: legacy and BIP-143-witness Bitcoin-shaped chains, their replay-protected
//! ("ForkID") forks, and a Decred-shaped Blake family with a split prefix/witness encoding.
//!
//! The legacy/witness/ForkID family (a single record shape, [`legacy::StandardTx`]) and the
//! Blake family ([`blake::BlakeTx`]) are variants of one concept rather than a shared base type;
//! [`Transaction`] wraps them as a tagged union and dispatches each operation to the active arm.

pub mod blake;
pub mod error;
pub mod legacy;
pub mod script;

pub use error::{TxError, TxResult};
pub use legacy::{
    InputWitness, LegacySighashArgs, Outpoint, Sighash, StandardTx, TxIn, TxOut, Txid,
    WitnessSighashArgs, Wtxid,
};
pub use blake::{BlakeOutpoint, BlakeTx, BlakeTxIn, BlakeTxOut, BlakeTxid};

use utxo_core::network::{self, Profile};

/// A transaction in either consensus family this crate supports. Dispatches the operations
/// common to both arms; family-specific operations (the ones with no equivalent on the other
/// side, such as a Blake witness's `height`/`index` fields) are only on the concrete types.
#[derive(Clone, Debug, PartialEq)]
pub enum Transaction {
    /// A legacy/witness/ForkID-family transaction.
    Standard(StandardTx),
    /// A Blake-family transaction.
    Blake(BlakeTx),
}

impl Transaction {
    /// Parses a transaction under the currently active network profile. Blake-family parsing is
    /// unimplemented upstream and fails with [`TxError::NotImplemented`].
    pub fn parse_tx(bytes: &[u8]) -> TxResult<Self> {
        use utxo_core::ser::ByteFormat;
        match network::active().family() {
            network::Family::Blake => Err(TxError::NotImplemented),
            _ => {
                let mut cursor = std::io::Cursor::new(bytes);
                Ok(Self::Standard(StandardTx::read_from(&mut cursor)?))
            }
        }
    }

    /// The transaction's id, in the byte order each family produces it (Blake: prefix-stream
    /// BLAKE-256; Standard: witness-stripped double-SHA256).
    pub fn tx_id(&self) -> TxResult<[u8; 32]> {
        match self {
            Self::Standard(tx) => Ok(*tx.txid().0.as_ref()),
            Self::Blake(tx) => Ok(*tx.tx_id()?.0.as_ref()),
        }
    }

    /// `sum(prevout_values) - sum(output values)`.
    pub fn fee(&self, prevout_values: &[u64]) -> TxResult<i64> {
        match self {
            Self::Standard(tx) => tx.fee(prevout_values),
            Self::Blake(tx) => tx.fee(prevout_values),
        }
    }

    /// Computes the `SIGHASH_ALL` digest for input `index`. `prevout_value` is required for a
    /// BIP-143/ForkID digest on the `Standard` arm and ignored on the `Blake` arm, whose witness
    /// entries already carry the spent value.
    pub fn sighash_all(
        &self,
        index: usize,
        prevout_script: &[u8],
        prevout_value: Option<u64>,
        anyone_can_pay: bool,
    ) -> TxResult<[u8; 32]> {
        match self {
            Self::Standard(tx) => Ok(*tx
                .sighash_all(index, prevout_script, prevout_value, anyone_can_pay)?
                .as_ref()),
            Self::Blake(tx) => Ok(*tx.sighash_all(index, prevout_script, anyone_can_pay)?.as_ref()),
        }
    }

    /// Computes the `SIGHASH_SINGLE` digest for input `index`. See [`Self::sighash_all`] for the
    /// `prevout_value` handling.
    pub fn sighash_single(
        &self,
        index: usize,
        prevout_script: &[u8],
        prevout_value: Option<u64>,
        anyone_can_pay: bool,
    ) -> TxResult<[u8; 32]> {
        match self {
            Self::Standard(tx) => Ok(*tx
                .sighash_single(index, prevout_script, prevout_value, anyone_can_pay)?
                .as_ref()),
            Self::Blake(tx) => Ok(*tx
                .sighash_single(index, prevout_script, anyone_can_pay)?
                .as_ref()),
        }
    }

    /// The script code used in a `Standard`-arm sighash preimage for input `index`. The Blake
    /// family has no equivalent rule; its preimage signs the witness stream directly.
    pub fn script_code(&self, index: usize) -> TxResult<Vec<u8>> {
        match self {
            Self::Standard(tx) => tx.script_code(index),
            Self::Blake(_) => Err(TxError::NotImplemented),
        }
    }
}

impl From<StandardTx> for Transaction {
    fn from(tx: StandardTx) -> Self {
        Self::Standard(tx)
    }
}

impl From<BlakeTx> for Transaction {
    fn from(tx: BlakeTx) -> Self {
        Self::Blake(tx)
    }
}

/// Switches the process-wide active network profile by name.
///
/// Recognized names: `"legacy"`, `"witness"`, `"blake"`, `"bitcoin-cash"`, `"bitcoin-sv"`.
/// Unrecognized names fail with [`TxError::UnknownNetwork`].
pub fn select_network(name: &str) -> TxResult<()> {
    let profile = match name {
        "legacy" => Profile::legacy(),
        "witness" => Profile::witness(),
        "blake" => Profile::blake(),
        "bitcoin-cash" => Profile::fork("bitcoin-cash", 0x40),
        "bitcoin-sv" => Profile::fork("bitcoin-sv", 0x40),
        _ => return Err(TxError::UnknownNetwork(name.to_owned())),
    };
    network::set_active(profile);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_network_rejects_an_unknown_name() {
        assert!(matches!(
            select_network("not-a-real-chain"),
            Err(TxError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn select_network_switches_the_active_profile() {
        let original = network::active();
        select_network("blake").unwrap();
        assert_eq!(network::active().family(), network::Family::Blake);
        network::set_active(original);
    }

    #[test]
    fn transaction_enum_dispatches_tx_id_to_the_active_arm() {
        let original = network::active();
        network::set_active(Profile::witness());

        let outpoint = Outpoint::new(Txid::default(), 0);
        let input = TxIn::new(
            outpoint,
            script::StackScript::null(),
            script::RedeemScript::null(),
            0xffffffff,
        )
        .unwrap();
        let output = TxOut::new(50_000, script::OutputScript::null()).unwrap();
        let standard = StandardTx::new(1, vec![input], vec![output], None, 0).unwrap();
        let expected = standard.txid();

        let tx = Transaction::from(standard);
        assert_eq!(tx.tx_id().unwrap(), *expected.0.as_ref());

        network::set_active(original);
    }
}
