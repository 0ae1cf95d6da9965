//! CoreAudio-backed registry
//!
//! Only built on macOS. Other hosts get an empty crate.

#[cfg(target_os = "macos")]
mod registry;

#[cfg(target_os = "macos")]
pub use registry::CoreAudioRegistry;
