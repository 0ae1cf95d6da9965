//! Property addressing
//!
//! Every value in the registry lives on an object and is named by a
//! (selector, scope, element) triple. Selectors and scopes are four-character
//! codes packed big-endian into a `u32`.

use std::fmt;

use serde::{Deserialize, Serialize};

const fn four_cc(tag: [u8; 4]) -> u32 {
    u32::from_be_bytes(tag)
}

/// An object in the registry: the system object or one of its devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioObjectId(pub u32);

impl AudioObjectId {
    /// The root object holding registry-wide properties such as the device list
    pub const SYSTEM: Self = Self(1);
}

impl fmt::Display for AudioObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which property is being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(pub u32);

impl Selector {
    /// Device list on the system object
    pub const DEVICES: Self = Self(four_cc(*b"dev#"));
    /// Device name as a NUL-terminated C string
    pub const DEVICE_NAME: Self = Self(four_cc(*b"name"));
    /// Icon reference, a platform object handle
    pub const ICON: Self = Self(four_cc(*b"icon"));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(pub u32);

impl Scope {
    pub const GLOBAL: Self = Self(four_cc(*b"glob"));
    pub const INPUT: Self = Self(four_cc(*b"inpt"));
    pub const OUTPUT: Self = Self(four_cc(*b"outp"));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element(pub u32);

impl Element {
    /// The whole object, no per-channel split
    pub const MAIN: Self = Self(0);
}

/// Identifies exactly one queryable value on one object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyAddress {
    pub selector: Selector,
    pub scope: Scope,
    pub element: Element,
}

impl PropertyAddress {
    pub const fn new(selector: Selector, scope: Scope, element: Element) -> Self {
        Self {
            selector,
            scope,
            element,
        }
    }

    /// Address `selector` in the global scope on the main element
    pub const fn global(selector: Selector) -> Self {
        Self::new(selector, Scope::GLOBAL, Element::MAIN)
    }
}

impl fmt::Display for PropertyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = |v: u32| String::from_utf8_lossy(&v.to_be_bytes()).into_owned();
        write!(
            f,
            "{}/{}/{}",
            tag(self.selector.0),
            tag(self.scope.0),
            self.element.0
        )
    }
}

pub const DEVICES_ADDRESS: PropertyAddress = PropertyAddress::global(Selector::DEVICES);
pub const DEVICE_NAME_ADDRESS: PropertyAddress = PropertyAddress::global(Selector::DEVICE_NAME);
pub const ICON_ADDRESS: PropertyAddress = PropertyAddress::global(Selector::ICON);
