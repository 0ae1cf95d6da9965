//! In-memory registry
//!
//! Answers queries from a table of property values and injected failures,
//! and records every call so tests can check the order and buffer sizes the
//! query protocol used. Can be built programmatically or from a
//! [`RegistrySnapshot`].

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, NAME_CAPACITY};
use crate::property::{
    AudioObjectId, PropertyAddress, DEVICES_ADDRESS, DEVICE_NAME_ADDRESS, ICON_ADDRESS,
};
use crate::status::StatusCode;
use crate::traits::Registry;

/// Size reported for an injected icon fetch failure
const ICON_HANDLE_SIZE: u32 = std::mem::size_of::<u64>() as u32;

#[derive(Debug, Clone)]
enum Entry {
    Value(Vec<u8>),
    SizeFails(StatusCode),
    FetchFails { size: u32, status: StatusCode },
}

/// One call made against a [`MemoryRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryCall {
    Size {
        object: AudioObjectId,
        address: PropertyAddress,
    },
    Fetch {
        object: AudioObjectId,
        address: PropertyAddress,
        capacity: usize,
    },
}

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    properties: HashMap<(AudioObjectId, PropertyAddress), Entry>,
    calls: RefCell<Vec<RegistryCall>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(
        mut self,
        object: AudioObjectId,
        address: PropertyAddress,
        value: Vec<u8>,
    ) -> Self {
        self.properties.insert((object, address), Entry::Value(value));
        self
    }

    pub fn with_size_failure(
        mut self,
        object: AudioObjectId,
        address: PropertyAddress,
        status: StatusCode,
    ) -> Self {
        self.properties
            .insert((object, address), Entry::SizeFails(status));
        self
    }

    /// Report `size` from the size phase, then fail the fetch with `status`
    pub fn with_fetch_failure(
        mut self,
        object: AudioObjectId,
        address: PropertyAddress,
        size: u32,
        status: StatusCode,
    ) -> Self {
        self.properties
            .insert((object, address), Entry::FetchFails { size, status });
        self
    }

    /// Publish `ids` as the system object's device list, in this order
    pub fn with_devices(self, ids: &[u32]) -> Self {
        let bytes = ids.iter().flat_map(|id| id.to_ne_bytes()).collect();
        self.with_property(AudioObjectId::SYSTEM, DEVICES_ADDRESS, bytes)
    }

    /// Name stored as a NUL-terminated C string
    pub fn with_device_name(self, id: DeviceId, name: &str) -> Self {
        let mut bytes = name.as_bytes().to_vec();
        bytes.push(0);
        self.with_property(id.object(), DEVICE_NAME_ADDRESS, bytes)
    }

    pub fn with_icon(self, id: DeviceId, handle: u64) -> Self {
        self.with_property(id.object(), ICON_ADDRESS, handle.to_ne_bytes().to_vec())
    }

    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Self {
        let mut registry = match snapshot.list_error {
            Some(status) => {
                Self::new().with_size_failure(AudioObjectId::SYSTEM, DEVICES_ADDRESS, status)
            }
            None => {
                let ids: Vec<u32> = snapshot.devices.iter().map(|d| d.id.0).collect();
                Self::new().with_devices(&ids)
            }
        };

        for device in &snapshot.devices {
            let object = device.id.object();

            registry = match (&device.name, device.name_error) {
                (_, Some(status)) => registry.with_fetch_failure(
                    object,
                    DEVICE_NAME_ADDRESS,
                    NAME_CAPACITY as u32,
                    status,
                ),
                (Some(name), None) => registry.with_device_name(device.id, name),
                (None, None) => registry,
            };

            registry = match (device.icon, device.icon_error) {
                (_, Some(status)) => {
                    registry.with_fetch_failure(object, ICON_ADDRESS, ICON_HANDLE_SIZE, status)
                }
                (Some(handle), None) => registry.with_icon(device.id, handle),
                (None, None) => registry,
            };
        }

        registry
    }

    /// Calls made so far, oldest first
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.borrow().clone()
    }

    fn entry(&self, object: AudioObjectId, address: &PropertyAddress) -> Option<&Entry> {
        self.properties.get(&(object, *address))
    }
}

impl Registry for MemoryRegistry {
    fn property_data_size(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        _qualifier: &[u8],
    ) -> Result<u32, StatusCode> {
        self.calls.borrow_mut().push(RegistryCall::Size {
            object,
            address: *address,
        });

        match self.entry(object, address) {
            Some(Entry::Value(value)) => Ok(value.len() as u32),
            Some(Entry::SizeFails(status)) => Err(*status),
            Some(Entry::FetchFails { size, .. }) => Ok(*size),
            None => Err(StatusCode::UNKNOWN_PROPERTY),
        }
    }

    fn property_data(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        _qualifier: &[u8],
        buffer: &mut [u8],
    ) -> Result<u32, StatusCode> {
        self.calls.borrow_mut().push(RegistryCall::Fetch {
            object,
            address: *address,
            capacity: buffer.len(),
        });

        match self.entry(object, address) {
            Some(Entry::Value(value)) => {
                if buffer.len() < value.len() {
                    return Err(StatusCode::BAD_PROPERTY_SIZE);
                }
                buffer[..value.len()].copy_from_slice(value);
                Ok(value.len() as u32)
            }
            Some(Entry::SizeFails(status)) | Some(Entry::FetchFails { status, .. }) => {
                Err(*status)
            }
            None => Err(StatusCode::UNKNOWN_PROPERTY),
        }
    }
}

/// Serializable description of a registry's contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Fails the device list's size phase with this code
    #[serde(default)]
    pub list_error: Option<StatusCode>,
    #[serde(default)]
    pub devices: Vec<DeviceSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub id: DeviceId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_error: Option<StatusCode>,
    #[serde(default)]
    pub icon: Option<u64>,
    #[serde(default)]
    pub icon_error: Option<StatusCode>,
}
