//! The error taxonomy shared by every record and transaction type in this crate.

use thiserror::Error;
use utxo_core::ser::SerError;

/// Errors produced while validating, (de)serializing, or signature-hashing a transaction or one
/// of its component records.
#[derive(Debug, Error)]
pub enum TxError {
    /// A lower-level (de)serialization error, usually a truncated or malformed VarInt.
    #[error(transparent)]
    Ser(#[from] SerError),

    /// An IOError bubbled up from a `Read`/`Write` passed to a `ByteFormat` implementation.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A `WitnessStackItem` longer than 520 bytes.
    #[error("witness stack item of {0} bytes exceeds the 520-byte limit")]
    WitnessItemTooLarge(usize),

    /// A `TxIn`'s `stack_script` and `redeem_script` together exceed 1650 bytes.
    #[error("combined stack_script/redeem_script length {0} exceeds the 1650-byte limit")]
    ScriptTooLarge(usize),

    /// A `TxOut` value below the dust limit.
    #[error("txout value {0} is below the dust limit of 546")]
    BelowDustLimit(u64),

    /// A `TxOut`'s `output_script` declared a length of 0xfd or more on decode.
    #[error("output_script length {0} is unsupported (no support for abnormally long scripts)")]
    ScriptTooLong(u64),

    /// A transaction with no inputs.
    #[error("transaction must have at least one input")]
    TooFewInputs,

    /// A transaction with more than 255 inputs.
    #[error("transaction has {0} inputs, exceeding the limit of 255")]
    TooManyInputs(usize),

    /// A transaction with no outputs.
    #[error("transaction must have at least one output")]
    TooFewOutputs,

    /// A transaction with more than 255 outputs.
    #[error("transaction has {0} outputs, exceeding the limit of 255")]
    TooManyOutputs(usize),

    /// A transaction whose encoded size is 100,000 bytes or more.
    #[error("transaction of {0} bytes exceeds the 100,000-byte limit")]
    TxTooLarge(usize),

    /// A segwit flag other than `[0x00, 0x01]`.
    #[error("segwit flag must be exactly [0x00, 0x01], got {0:?}")]
    InvalidSegwitFlag([u8; 2]),

    /// The segwit flag's presence did not match the witness list's presence.
    #[error("segwit flag presence must match witness list presence")]
    WitnessFlagMismatch,

    /// The witness list's length did not match the input list's length.
    #[error("witness list has {got} entries, but there are {expected} inputs")]
    WitnessLengthMismatch {
        /// Number of witnesses present.
        got: usize,
        /// Number of inputs present.
        expected: usize,
    },

    /// `SIGHASH_NONE` was requested. This implementation refuses to compute it.
    #[error("SIGHASH_NONE is refused by this implementation")]
    DisallowedSighashNone,

    /// `SIGHASH_SINGLE` was requested for an input whose index has no matching output. This
    /// implementation refuses to reproduce the historical out-of-range digest.
    #[error("refusing the SIGHASH_SINGLE bug: index {index} has no output ({n_outputs} outputs)")]
    RefusedSighashSingleBug {
        /// The requested input index.
        index: usize,
        /// The number of outputs present.
        n_outputs: usize,
    },

    /// An input index outside the bounds of the transaction's input list.
    #[error("input index {index} is out of range ({n_inputs} inputs)")]
    BadIndex {
        /// The requested input index.
        index: usize,
        /// The number of inputs present.
        n_inputs: usize,
    },

    /// `Sighash::from_u8` was given a byte that does not name a known sighash type.
    #[error("unknown sighash type byte {0:#04x}")]
    UnknownSighash(u8),

    /// A Blake-family operation with no implementation (its `from_bytes` parser, per source).
    #[error("not yet implemented")]
    NotImplemented,

    /// A Blake-family-only operation was invoked while a non-Blake profile was active.
    #[error("this operation requires the Blake-family network profile to be active")]
    DecredOpOnNonDecred,

    /// `select_network` was given a name with no matching profile.
    #[error("unknown network profile: {0}")]
    UnknownNetwork(String),

    /// A replay-protected (`ForkId`) sighash call with no prevout value supplied. The ForkID
    /// digest algorithm always folds the prevout value into its preimage.
    #[error("the active fork-id profile requires a prevout value for every sighash call")]
    MissingPrevoutValue,

    /// `fee` was given a number of prevout values that does not match the number of inputs.
    #[error("fee requires one prevout value per input: got {got}, need {expected}")]
    FeeValueCountMismatch {
        /// Number of prevout values supplied.
        got: usize,
        /// Number of inputs in the transaction.
        expected: usize,
    },
}

/// Type alias for results carrying a [`TxError`].
pub type TxResult<T> = Result<T, TxError>;
