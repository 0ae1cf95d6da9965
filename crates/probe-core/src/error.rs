use thiserror::Error;

use crate::property::PropertyAddress;
use crate::status::StatusCode;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("Could not determine size of {address}: {status}")]
    Size {
        address: PropertyAddress,
        status: StatusCode,
    },

    #[error("Could not fetch {address}: {status}")]
    Fetch {
        address: PropertyAddress,
        status: StatusCode,
    },

    #[error("{address} needs {required} bytes but the buffer holds {capacity}")]
    Capacity {
        address: PropertyAddress,
        required: u32,
        capacity: usize,
    },
}

impl QueryError {
    /// The opaque registry status this failure is reported as
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Size { status, .. } | Self::Fetch { status, .. } => *status,
            Self::Capacity { .. } => StatusCode::BAD_PROPERTY_SIZE,
        }
    }

    pub fn address(&self) -> PropertyAddress {
        match self {
            Self::Size { address, .. }
            | Self::Fetch { address, .. }
            | Self::Capacity { address, .. } => *address,
        }
    }
}
