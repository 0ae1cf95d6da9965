use crate::device::DeviceId;
use crate::error::QueryError;
use crate::property::{AudioObjectId, DEVICES_ADDRESS};
use crate::query::PropertyQuery;
use crate::traits::Registry;

/// Reads the registry-wide device list from the system object
pub struct DeviceEnumerator<'r, R: ?Sized> {
    registry: &'r R,
}

impl<'r, R: Registry + ?Sized> DeviceEnumerator<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self { registry }
    }

    /// List device ids in the order the registry reports them
    ///
    /// The count is the reported byte size divided by the width of an id.
    /// No retry on failure.
    pub fn list_devices(&self) -> Result<Vec<DeviceId>, QueryError> {
        let ids = PropertyQuery::new(self.registry, AudioObjectId::SYSTEM, DEVICES_ADDRESS)
            .fetch_u32s()?
            .into_iter()
            .map(DeviceId)
            .collect::<Vec<_>>();

        tracing::debug!(count = ids.len(), "Enumerated devices");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::MemoryRegistry;
    use crate::status::StatusCode;

    #[test]
    fn test_empty_registry_lists_no_devices() {
        let registry = MemoryRegistry::new().with_devices(&[]);
        let devices = DeviceEnumerator::new(&registry).list_devices().unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn test_devices_keep_registry_order() {
        let registry = MemoryRegistry::new().with_devices(&[73, 12, 55, 12_000]);
        let devices = DeviceEnumerator::new(&registry).list_devices().unwrap();
        assert_eq!(
            devices,
            vec![DeviceId(73), DeviceId(12), DeviceId(55), DeviceId(12_000)]
        );
    }

    #[test]
    fn test_size_failure_is_returned() {
        let registry = MemoryRegistry::new().with_size_failure(
            AudioObjectId::SYSTEM,
            DEVICES_ADDRESS,
            StatusCode::NOT_RUNNING,
        );
        let err = DeviceEnumerator::new(&registry).list_devices().unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_RUNNING);
    }

    #[test]
    fn test_fetch_failure_is_returned() {
        let registry = MemoryRegistry::new().with_fetch_failure(
            AudioObjectId::SYSTEM,
            DEVICES_ADDRESS,
            8,
            StatusCode::BAD_OBJECT,
        );
        let err = DeviceEnumerator::new(&registry).list_devices().unwrap_err();
        assert!(matches!(err, QueryError::Fetch { .. }));
        assert_eq!(err.status().decode().to_string(), "!obj");
    }
}
