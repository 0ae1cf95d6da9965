use crate::property::{AudioObjectId, PropertyAddress};
use crate::status::StatusCode;

/// A property-based hardware registry
///
/// Implemented by the platform backends and by the simulated registry.
/// Calls block until the registry answers; there is no timeout.
pub trait Registry {
    /// Number of bytes needed to hold the property at `address` on `object`
    fn property_data_size(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
    ) -> Result<u32, StatusCode>;

    /// Fill `buffer` with the property's value and return the bytes written
    ///
    /// `buffer.len()` is the in/out size of the underlying call. On failure
    /// the buffer contents are undefined.
    fn property_data(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
        buffer: &mut [u8],
    ) -> Result<u32, StatusCode>;
}

impl<R: Registry + ?Sized> Registry for &R {
    fn property_data_size(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
    ) -> Result<u32, StatusCode> {
        (**self).property_data_size(object, address, qualifier)
    }

    fn property_data(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
        buffer: &mut [u8],
    ) -> Result<u32, StatusCode> {
        (**self).property_data(object, address, qualifier, buffer)
    }
}

impl<R: Registry + ?Sized> Registry for Box<R> {
    fn property_data_size(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
    ) -> Result<u32, StatusCode> {
        (**self).property_data_size(object, address, qualifier)
    }

    fn property_data(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
        buffer: &mut [u8],
    ) -> Result<u32, StatusCode> {
        (**self).property_data(object, address, qualifier, buffer)
    }
}
