//! Macros shared across network-family implementations.

#[macro_export]
/// Implements `serde::Serialize`/`serde::Deserialize` for a `ByteFormat` type by passing through
/// its hex encoding.
macro_rules! impl_hex_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let s = $crate::ser::ByteFormat::serialize_hex(self)
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&s)
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: &str = serde::Deserialize::deserialize(deserializer)?;
                <$item as $crate::ser::ByteFormat>::deserialize_hex(s)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

#[macro_export]
/// Wraps a VarInt-prefixed vector of bytes in a named type and implements the common
/// "opaque blob" functionality (length, indexing, conversion, canonical encoding) needed by
/// script- and witness-item-shaped fields.
macro_rules! wrap_prefixed_byte_vector {
    (
        $(#[$outer:meta])*
        $wrapper_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Clone, Debug, Eq, PartialEq, Default, Hash, PartialOrd, Ord)]
        pub struct $wrapper_name(Vec<u8>);

        impl $crate::ser::ByteFormat for $wrapper_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                $crate::ser::prefix_byte_len(self.0.len() as u64) as usize + self.0.len()
            }

            fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
            where
                R: std::io::Read,
            {
                let (len, _) = $crate::ser::read_compact_int(reader, false)?;
                let mut buf = vec![0u8; len as usize];
                std::io::Read::read_exact(reader, &mut buf)?;
                Ok(Self(buf))
            }

            fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
            where
                W: std::io::Write,
            {
                let mut written = $crate::ser::write_compact_int(writer, self.0.len() as u64)?;
                written += std::io::Write::write(writer, &self.0)?;
                Ok(written)
            }
        }

        $crate::impl_hex_serde!($wrapper_name);

        impl std::convert::AsRef<[u8]> for $wrapper_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl $wrapper_name {
            /// Wraps a byte vector without any length checks. Use a field-specific constructor
            /// on the surrounding record when an invariant must be enforced.
            pub fn new(v: Vec<u8>) -> Self {
                Self(v)
            }

            /// The empty instance.
            pub fn null() -> Self {
                Self(vec![])
            }

            /// Returns the wrapped bytes.
            pub fn items(&self) -> &[u8] {
                &self.0
            }

            /// The length of the wrapped byte vector (not counting the VarInt prefix).
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// True if the wrapped byte vector is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&[u8]> for $wrapper_name {
            fn from(v: &[u8]) -> Self {
                Self(v.to_vec())
            }
        }

        impl From<Vec<u8>> for $wrapper_name {
            fn from(v: Vec<u8>) -> Self {
                Self(v)
            }
        }
    };
}

#[macro_export]
/// Declares a named marked-digest newtype over the given base digest type (e.g. `Hash256Digest`
/// or `Blake256Digest`).
macro_rules! mark_32_byte_hash {
    (
        $(#[$outer:meta])*
        $hash_name:ident, $base_type:ty
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $hash_name(pub $base_type);

        impl $hash_name {
            /// Parses a big-endian ("display order") hex string into this digest type.
            pub fn from_be_hex(be: &str) -> $crate::ser::SerResult<Self> {
                use $crate::hashes::marked::MarkedDigest;
                Ok(<Self as $crate::ser::ByteFormat>::deserialize_hex(be)?.reversed())
            }

            /// Renders this digest as big-endian ("display order") hex.
            pub fn to_be_hex(&self) -> String {
                use $crate::hashes::marked::MarkedDigest;
                $crate::ser::ByteFormat::serialize_hex(&self.reversed())
                    .expect("writing to a Vec<u8> cannot fail")
            }
        }

        impl From<$base_type> for $hash_name {
            fn from(h: $base_type) -> Self {
                Self(h)
            }
        }

        impl From<$hash_name> for $base_type {
            fn from(h: $hash_name) -> Self {
                h.0
            }
        }

        impl $crate::ser::ByteFormat for $hash_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                32
            }

            fn read_from<R>(reader: &mut R) -> $crate::ser::SerResult<Self>
            where
                R: std::io::Read,
            {
                Ok(Self(<$base_type as $crate::ser::ByteFormat>::read_from(
                    reader,
                )?))
            }

            fn write_to<W>(&self, writer: &mut W) -> $crate::ser::SerResult<usize>
            where
                W: std::io::Write,
            {
                self.0.write_to(writer)
            }
        }

        impl $crate::hashes::marked::MarkedDigest for $hash_name {
            type Digest = $base_type;

            fn new(hash: $base_type) -> Self {
                Self(hash)
            }

            fn internal(&self) -> $base_type {
                self.0
            }

            fn bytes(&self) -> Vec<u8> {
                self.0.as_ref().to_vec()
            }
        }
    };
}
