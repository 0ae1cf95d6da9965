//! Two-phase property query
//!
//! The registry never says how large a value is while returning it. A query
//! first asks for the byte size, then hands the registry a buffer of exactly
//! that size to fill. Both phases run inside one call here so the ordering
//! cannot be skipped, and the size is never carried over to another property.

use crate::error::QueryError;
use crate::property::{AudioObjectId, PropertyAddress};
use crate::status::StatusCode;
use crate::traits::Registry;

/// Result of a completed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyData {
    size: u32,
    payload: Vec<u8>,
}

impl PropertyData {
    /// Size reported by the size phase
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Bytes the registry actually wrote
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// One property on one object, ready to be queried
pub struct PropertyQuery<'r, R: ?Sized> {
    registry: &'r R,
    object: AudioObjectId,
    address: PropertyAddress,
}

impl<'r, R: Registry + ?Sized> PropertyQuery<'r, R> {
    pub fn new(registry: &'r R, object: AudioObjectId, address: PropertyAddress) -> Self {
        Self {
            registry,
            object,
            address,
        }
    }

    pub fn address(&self) -> PropertyAddress {
        self.address
    }

    /// Size phase on its own
    pub fn size(&self) -> Result<u32, QueryError> {
        let size = self
            .registry
            .property_data_size(self.object, &self.address, &[])
            .map_err(|status| QueryError::Size {
                address: self.address,
                status,
            })?;

        tracing::debug!(object = %self.object, address = %self.address, size, "Property size");
        Ok(size)
    }

    /// Run both phases into a freshly allocated buffer
    ///
    /// A zero size skips the fetch phase and yields an empty payload.
    pub fn fetch(&self) -> Result<PropertyData, QueryError> {
        let size = self.size()?;
        if size == 0 {
            return Ok(PropertyData {
                size,
                payload: Vec::new(),
            });
        }

        let mut payload = vec![0u8; size as usize];
        let written = self.fill(&mut payload)?;
        payload.truncate(written);

        Ok(PropertyData { size, payload })
    }

    /// Run both phases into a caller-owned buffer
    ///
    /// Fails with [`QueryError::Capacity`] without touching the registry
    /// when the reported size does not fit. Returns the written prefix.
    pub fn fetch_into<'b>(&self, buffer: &'b mut [u8]) -> Result<&'b [u8], QueryError> {
        let size = self.size()?;
        let required = size as usize;
        if required == 0 {
            return Ok(&buffer[..0]);
        }
        if required > buffer.len() {
            return Err(QueryError::Capacity {
                address: self.address,
                required: size,
                capacity: buffer.len(),
            });
        }

        let written = self.fill(&mut buffer[..required])?;
        Ok(&buffer[..written])
    }

    /// Fetch a property made of consecutive native-endian `u32` values
    ///
    /// Trailing bytes that do not form a whole value are ignored.
    pub fn fetch_u32s(&self) -> Result<Vec<u32>, QueryError> {
        let data = self.fetch()?;
        Ok(data
            .payload()
            .chunks_exact(std::mem::size_of::<u32>())
            .map(|chunk| {
                let mut word = [0u8; 4];
                word.copy_from_slice(chunk);
                u32::from_ne_bytes(word)
            })
            .collect())
    }

    /// Fetch phase
    fn fill(&self, dest: &mut [u8]) -> Result<usize, QueryError> {
        let written = self
            .registry
            .property_data(self.object, &self.address, &[], dest)
            .map_err(|status| QueryError::Fetch {
                address: self.address,
                status,
            })? as usize;

        if written > dest.len() {
            return Err(QueryError::Fetch {
                address: self.address,
                status: StatusCode::BAD_PROPERTY_SIZE,
            });
        }

        tracing::debug!(object = %self.object, address = %self.address, written, "Property fetched");
        Ok(written)
    }
}
