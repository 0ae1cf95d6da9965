//! Registry status codes
//!
//! The registry answers every call with a signed 32-bit status. Zero is
//! success; anything else is an opaque failure which, by convention, packs a
//! four-character tag into the integer. Codes are only ever decoded for
//! display, never matched on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque 32-bit result code returned by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(i32);

impl StatusCode {
    pub const NO_ERROR: Self = Self(0);

    pub const NOT_RUNNING: Self = Self::from_four_cc(*b"stop");
    pub const UNKNOWN_PROPERTY: Self = Self::from_four_cc(*b"who?");
    pub const BAD_PROPERTY_SIZE: Self = Self::from_four_cc(*b"!siz");
    pub const BAD_OBJECT: Self = Self::from_four_cc(*b"!obj");
    pub const BAD_DEVICE: Self = Self::from_four_cc(*b"!dev");
    pub const UNSUPPORTED_OPERATION: Self = Self::from_four_cc(*b"unop");

    #[inline]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Pack a four-character tag into a status code, first byte most significant
    #[inline]
    pub const fn from_four_cc(tag: [u8; 4]) -> Self {
        Self(i32::from_be_bytes(tag))
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Turn a status into a `Result`, keeping the failing code as the error
    #[inline]
    pub fn into_result(self) -> Result<(), StatusCode> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Decode the code into its four display characters
    #[inline]
    pub fn decode(self) -> FourCc {
        FourCc::from_status(self)
    }
}

impl From<i32> for StatusCode {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.decode(), self.0)
    }
}

/// Four display bytes of a status code followed by a terminator
///
/// The bytes are the big-endian layout of the code, so `0x77686f3f` decodes
/// to `who?` regardless of host byte order. Nothing guarantees the bytes are
/// printable; this is a debugging aid, not a validated decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc([u8; 5]);

impl FourCc {
    pub fn from_status(code: StatusCode) -> Self {
        let [a, b, c, d] = (code.raw() as u32).to_be_bytes();
        Self([a, b, c, d, 0])
    }

    /// The four tag bytes without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..4]
    }

    /// The tag bytes including the trailing NUL
    pub fn as_bytes_with_nul(&self) -> &[u8; 5] {
        &self.0
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}
