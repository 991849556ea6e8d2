//! A simple trait for binary (de)serialization using `std::io::Read` and `std::io::Write`,
//! plus the compact (Bitcoin-style) variable-length integer used throughout the wire formats
//! this workspace implements.

use std::io::{Cursor, Error as IOError, Read, Write};

use hex::FromHexError;
use thiserror::Error;

/// Errors related to serialization and deserialization of wire types.
#[derive(Debug, Error)]
pub enum SerError {
    /// The VarInt's declared width was wider than the minimal encoding of its value.
    #[error("non-compact VarInt: declared width is wider than the minimal encoding")]
    NonCompactVarInt,

    /// The input ended before a declared length could be satisfied.
    #[error("malformed VarInt: not enough bytes to read the declared width")]
    MalformedVarInt,

    /// IOError bubbled up from a `Read`/`Write` passed to a `ByteFormat` implementation.
    #[error(transparent)]
    IOError(#[from] IOError),

    /// `deserialize_hex` encountered an error on its input.
    #[error(transparent)]
    FromHexError(#[from] FromHexError),

    /// An error produced by a component call during (de)serialization of a composite type.
    #[error("error in component (de)serialization: {0}")]
    ComponentError(String),
}

/// Type alias for serialization results.
pub type SerResult<T> = Result<T, SerError>;

/// Calculates the minimal prefix length for a VarInt encoding of `number`.
pub fn prefix_byte_len(number: u64) -> u8 {
    match number {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Matches a serialized VarInt width to its one-byte flag, if any.
fn first_byte_from_len(width: u8) -> Option<u8> {
    match width {
        3 => Some(0xfd),
        5 => Some(0xfe),
        9 => Some(0xff),
        _ => None,
    }
}

/// Writes a Bitcoin-style compact VarInt. Always emits the minimal encoding.
pub fn write_compact_int<W>(writer: &mut W, number: u64) -> SerResult<usize>
where
    W: Write,
{
    let width = prefix_byte_len(number);
    let written = match first_byte_from_len(width) {
        None => writer.write(&[number as u8])?,
        Some(flag) => {
            let mut written = writer.write(&[flag])?;
            let body = number.to_le_bytes();
            written += writer.write(&body[..width as usize - 1])?;
            written
        }
    };
    Ok(written)
}

/// Reads a Bitcoin-style compact VarInt. Returns the decoded value and the number of bytes
/// consumed from `reader`.
///
/// When `strict` is `true`, rejects any non-minimal encoding (a wide flag byte carrying a
/// value that would fit in a narrower encoding) with [`SerError::NonCompactVarInt`].
pub fn read_compact_int<R>(reader: &mut R, strict: bool) -> SerResult<(u64, usize)>
where
    R: Read,
{
    let mut flag = [0u8; 1];
    reader
        .read_exact(&mut flag)
        .map_err(|_| SerError::MalformedVarInt)?;

    let (value, width) = match flag[0] {
        0xfd => {
            let mut buf = [0u8; 2];
            reader
                .read_exact(&mut buf)
                .map_err(|_| SerError::MalformedVarInt)?;
            (u16::from_le_bytes(buf) as u64, 3)
        }
        0xfe => {
            let mut buf = [0u8; 4];
            reader
                .read_exact(&mut buf)
                .map_err(|_| SerError::MalformedVarInt)?;
            (u32::from_le_bytes(buf) as u64, 5)
        }
        0xff => {
            let mut buf = [0u8; 8];
            reader
                .read_exact(&mut buf)
                .map_err(|_| SerError::MalformedVarInt)?;
            (u64::from_le_bytes(buf), 9)
        }
        b => (b as u64, 1),
    };

    if strict && prefix_byte_len(value) != width {
        return Err(SerError::NonCompactVarInt);
    }

    Ok((value, width.into()))
}

/// A shared contract for wire types: a canonical byte encoding, readable from and writable to
/// any `std::io::Read`/`std::io::Write`, with byte-equality following from equality of the
/// canonical encoding.
pub trait ByteFormat {
    /// An associated error type produced while reading or writing this type.
    type Error: From<SerError> + From<IOError> + std::error::Error;

    /// The byte-length of the canonical encoding of `self`.
    fn serialized_length(&self) -> usize;

    /// Reads an instance of `Self` from `reader`.
    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
        Self: Sized;

    /// Writes the canonical encoding of `self` to `writer`, returning the number of bytes
    /// written.
    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write;

    /// Convenience: reads a LE `u32`.
    fn read_u32_le<R>(reader: &mut R) -> Result<u32, Self::Error>
    where
        R: Read,
    {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf).map_err(SerError::from)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Convenience: reads a LE `u64`.
    fn read_u64_le<R>(reader: &mut R) -> Result<u64, Self::Error>
    where
        R: Read,
    {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf).map_err(SerError::from)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Convenience: writes a LE `u32`.
    fn write_u32_le<W>(writer: &mut W, number: u32) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        Ok(writer.write(&number.to_le_bytes()).map_err(SerError::from)?)
    }

    /// Convenience: writes a LE `u64`.
    fn write_u64_le<W>(writer: &mut W, number: u64) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        Ok(writer.write(&number.to_le_bytes()).map_err(SerError::from)?)
    }

    /// Reads a VarInt-prefixed vector of `I`. `strict` controls whether the length VarInt must
    /// be minimally encoded.
    fn read_prefix_vec<R, I>(reader: &mut R, strict: bool) -> Result<Vec<I>, Self::Error>
    where
        R: Read,
        I: ByteFormat<Error = Self::Error>,
    {
        let (count, _) = read_compact_int(reader, strict).map_err(Self::Error::from)?;
        let mut out = Vec::with_capacity(count as usize);
        for _ in 0..count {
            out.push(I::read_from(reader)?);
        }
        Ok(out)
    }

    /// Writes a VarInt-prefixed vector of `I`.
    fn write_prefix_vec<W, I>(writer: &mut W, items: &[I]) -> Result<usize, Self::Error>
    where
        W: Write,
        I: ByteFormat<Error = Self::Error>,
    {
        let mut written =
            write_compact_int(writer, items.len() as u64).map_err(Self::Error::from)?;
        for item in items.iter() {
            written += item.write_to(writer)?;
        }
        Ok(written)
    }

    /// Decodes a hex string and deserializes an instance of `Self` from it.
    fn deserialize_hex(s: &str) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let v: Vec<u8> = hex::decode(s).map_err(SerError::from)?;
        let mut cursor = Cursor::new(v);
        Self::read_from(&mut cursor)
    }

    /// Serializes `self` to a vector and hex-encodes it.
    fn serialize_hex(&self) -> Result<String, Self::Error> {
        let mut v: Vec<u8> = vec![];
        self.write_to(&mut v)?;
        Ok(hex::encode(v))
    }
}

impl ByteFormat for u8 {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
        Self: Sized,
    {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        Ok(writer.write(&[*self])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_varints_minimally() {
        let cases: [(u64, usize); 6] = [
            (0, 1),
            (0xfc, 1),
            (0xfd, 3),
            (0xffff, 3),
            (0x1_0000, 5),
            (0xffff_ffff_ffff_ffff, 9),
        ];
        for (value, width) in cases.iter().copied() {
            let mut buf = vec![];
            write_compact_int(&mut buf, value).unwrap();
            assert_eq!(buf.len(), width);
            let (decoded, consumed) = read_compact_int(&mut buf.as_slice(), true).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, width);
        }
    }

    #[test]
    fn it_rejects_non_minimal_varints_when_strict() {
        // 0xfd prefix declaring value 0, which fits in 1 byte.
        let buf = [0xfdu8, 0x00, 0x00];
        assert!(matches!(
            read_compact_int(&mut buf.as_ref(), true),
            Err(SerError::NonCompactVarInt)
        ));
        let (value, consumed) = read_compact_int(&mut buf.as_ref(), false).unwrap();
        assert_eq!(value, 0);
        assert_eq!(consumed, 3);
    }

    #[test]
    fn it_fails_on_truncated_varints() {
        let buf = [0xfeu8, 0x00, 0x00];
        assert!(matches!(
            read_compact_int(&mut buf.as_ref(), false),
            Err(SerError::MalformedVarInt)
        ));
    }
}
