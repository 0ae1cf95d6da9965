//! Registry for hosts without CoreAudio
//!
//! There is no property registry to talk to, so every query fails with the
//! unsupported-operation code and the probe reports `Error unop`.

use devprobe_core::{AudioObjectId, PropertyAddress, Registry, StatusCode};

pub struct UnsupportedRegistry {
    // Private field to prevent external construction
    _private: (),
}

impl Default for UnsupportedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnsupportedRegistry {
    pub fn new() -> Self {
        tracing::debug!("No audio property registry on this platform");
        Self { _private: () }
    }
}

impl Registry for UnsupportedRegistry {
    fn property_data_size(
        &self,
        _object: AudioObjectId,
        _address: &PropertyAddress,
        _qualifier: &[u8],
    ) -> Result<u32, StatusCode> {
        Err(StatusCode::UNSUPPORTED_OPERATION)
    }

    fn property_data(
        &self,
        _object: AudioObjectId,
        _address: &PropertyAddress,
        _qualifier: &[u8],
        _buffer: &mut [u8],
    ) -> Result<u32, StatusCode> {
        Err(StatusCode::UNSUPPORTED_OPERATION)
    }
}
