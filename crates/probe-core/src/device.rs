use std::fmt;

use serde::{Deserialize, Serialize};

use crate::property::AudioObjectId;
use crate::status::StatusCode;

/// Bytes reserved for a device name, terminator included
pub const NAME_CAPACITY: usize = 128;

/// Registry-assigned identifier, valid for a single enumeration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u32);

impl DeviceId {
    pub const fn object(self) -> AudioObjectId {
        AudioObjectId(self.0)
    }
}

impl From<DeviceId> for AudioObjectId {
    fn from(id: DeviceId) -> Self {
        id.object()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw icon reference as handed out by the registry
///
/// This is a platform object handle. It is kept opaque and only shown as a
/// hex value; turning it into a path is not attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(Vec<u8>);

impl IconRef {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<empty>");
        }
        if let Ok(handle) = <[u8; 8]>::try_from(self.0.as_slice()) {
            return write!(f, "0x{:016x}", u64::from_ne_bytes(handle));
        }
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Icon column of a record: the reference, or the code of the failed lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconField {
    Reference(IconRef),
    Unavailable(StatusCode),
}

impl fmt::Display for IconField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(icon) => fmt::Display::fmt(icon, f),
            Self::Unavailable(status) => fmt::Display::fmt(&status.decode(), f),
        }
    }
}

/// Everything reported for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub name: String,
    pub icon: IconField,
}

/// Fixed-capacity scratch space for a device name
///
/// Zeroed before every load, so a short name never carries the tail of the
/// previous device's name.
pub struct NameBuffer {
    bytes: [u8; NAME_CAPACITY],
}

impl Default for NameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl NameBuffer {
    pub fn new() -> Self {
        Self {
            bytes: [0; NAME_CAPACITY],
        }
    }

    /// Reset the buffer, copy in as much of `bytes` as fits, and decode it
    ///
    /// Longer values are cut so the text plus a terminator fits the buffer.
    pub fn load(&mut self, bytes: &[u8]) -> String {
        self.bytes.fill(0);
        let len = bytes.len().min(NAME_CAPACITY - 1);
        self.bytes[..len].copy_from_slice(&bytes[..len]);
        c_string_text(&self.bytes[..len])
    }
}

/// Text up to the first NUL, capped so a terminator always fits
fn c_string_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(bytes.len())
        .min(NAME_CAPACITY - 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
