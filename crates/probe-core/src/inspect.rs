use crate::device::{DeviceId, DeviceRecord, IconField, IconRef, NameBuffer};
use crate::error::QueryError;
use crate::property::{DEVICE_NAME_ADDRESS, ICON_ADDRESS};
use crate::query::PropertyQuery;
use crate::traits::Registry;

/// Builds a [`DeviceRecord`] for one device at a time
///
/// Holds the name scratch buffer across devices; it is reset before every
/// lookup.
pub struct DeviceInspector<'r, R: ?Sized> {
    registry: &'r R,
    name: NameBuffer,
}

impl<'r, R: Registry + ?Sized> DeviceInspector<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            name: NameBuffer::new(),
        }
    }

    /// Look up the name and icon reference of `id`
    ///
    /// A failed name lookup fails the whole inspection, so no partial record
    /// exists. Names longer than the name buffer are cut to fit. A failed
    /// icon lookup is recorded in the icon field instead.
    pub fn inspect(&mut self, id: DeviceId) -> Result<DeviceRecord, QueryError> {
        let name = PropertyQuery::new(self.registry, id.object(), DEVICE_NAME_ADDRESS).fetch()?;
        let name = self.name.load(name.payload());

        let icon = match PropertyQuery::new(self.registry, id.object(), ICON_ADDRESS).fetch() {
            Ok(data) => IconField::Reference(IconRef::from_bytes(data.into_payload())),
            Err(err) => {
                tracing::debug!(device = %id, error = %err, "Icon lookup failed");
                IconField::Unavailable(err.status())
            }
        };

        Ok(DeviceRecord { id, name, icon })
    }
}
