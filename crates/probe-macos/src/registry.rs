use std::cell::RefCell;
use std::ffi::c_void;
use std::mem;
use std::ptr;

use core_foundation_sys::base::{CFRelease, CFTypeRef};
use coreaudio_sys::{
    AudioObjectGetPropertyData, AudioObjectGetPropertyDataSize, AudioObjectPropertyAddress,
};
use devprobe_core::{AudioObjectId, PropertyAddress, Registry, Selector, StatusCode};

/// The host's CoreAudio hardware registry
///
/// Properties that hand back a retained CoreFoundation object (the device
/// icon URL) are kept here and released when the registry is dropped. The
/// handles are never dereferenced.
#[derive(Default)]
pub struct CoreAudioRegistry {
    retained: RefCell<Vec<CFTypeRef>>,
}

impl CoreAudioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn retain_handle(&self, address: &PropertyAddress, bytes: &[u8]) {
        if address.selector != Selector::ICON {
            return;
        }
        let Ok(raw) = <[u8; mem::size_of::<usize>()]>::try_from(bytes) else {
            return;
        };
        let handle = usize::from_ne_bytes(raw) as CFTypeRef;
        if !handle.is_null() {
            self.retained.borrow_mut().push(handle);
        }
    }
}

fn raw_address(address: &PropertyAddress) -> AudioObjectPropertyAddress {
    AudioObjectPropertyAddress {
        mSelector: address.selector.0,
        mScope: address.scope.0,
        mElement: address.element.0,
    }
}

fn qualifier_parts(qualifier: &[u8]) -> (u32, *const c_void) {
    if qualifier.is_empty() {
        (0, ptr::null())
    } else {
        (qualifier.len() as u32, qualifier.as_ptr().cast())
    }
}

impl Registry for CoreAudioRegistry {
    fn property_data_size(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
    ) -> Result<u32, StatusCode> {
        let property = raw_address(address);
        let (qualifier_size, qualifier_data) = qualifier_parts(qualifier);
        let mut size: u32 = 0;

        let status = unsafe {
            AudioObjectGetPropertyDataSize(object.0, &property, qualifier_size, qualifier_data, &mut size)
        };
        StatusCode::new(status).into_result()?;

        Ok(size)
    }

    fn property_data(
        &self,
        object: AudioObjectId,
        address: &PropertyAddress,
        qualifier: &[u8],
        buffer: &mut [u8],
    ) -> Result<u32, StatusCode> {
        let property = raw_address(address);
        let (qualifier_size, qualifier_data) = qualifier_parts(qualifier);
        let mut size = u32::try_from(buffer.len()).map_err(|_| StatusCode::BAD_PROPERTY_SIZE)?;

        let status = unsafe {
            AudioObjectGetPropertyData(
                object.0,
                &property,
                qualifier_size,
                qualifier_data,
                &mut size,
                buffer.as_mut_ptr().cast(),
            )
        };
        StatusCode::new(status).into_result()?;

        let written = (size as usize).min(buffer.len());
        self.retain_handle(address, &buffer[..written]);
        Ok(size)
    }
}

impl Drop for CoreAudioRegistry {
    fn drop(&mut self) {
        let retained = mem::take(self.retained.get_mut());
        tracing::debug!(count = retained.len(), "Releasing registry handles");
        for handle in retained {
            unsafe { CFRelease(handle) };
        }
    }
}
