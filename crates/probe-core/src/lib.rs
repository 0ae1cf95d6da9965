mod device;
mod enumerate;
mod error;
mod inspect;
mod pipeline;
mod property;
mod query;
mod report;
pub mod simulated;
mod status;
mod traits;

pub use device::{DeviceId, DeviceRecord, IconField, IconRef, NameBuffer, NAME_CAPACITY};
pub use enumerate::DeviceEnumerator;
pub use error::QueryError;
pub use inspect::DeviceInspector;
pub use pipeline::{probe, ProbeSummary};
pub use property::{
    AudioObjectId, Element, PropertyAddress, Scope, Selector, DEVICES_ADDRESS,
    DEVICE_NAME_ADDRESS, ICON_ADDRESS,
};
pub use query::{PropertyData, PropertyQuery};
pub use report::Reporter;
pub use status::{FourCc, StatusCode};
pub use traits::Registry;
