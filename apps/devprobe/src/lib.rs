//! devprobe
//!
//! Lists the audio devices known to the host registry, one record per
//! device: id, name and icon reference.
//!
//! # Platform Support
//!
//! - **macOS**: CoreAudio hardware registry
//! - **Other platforms**: no registry; the probe prints `Error unop`

use std::io::{self, Write};

use anyhow::Context;

use devprobe_core::{probe, Registry};

#[cfg(target_os = "macos")]
use devprobe_macos::CoreAudioRegistry as PlatformRegistry;

#[cfg(not(target_os = "macos"))]
use devprobe_generic::UnsupportedRegistry as PlatformRegistry;

/// Application entry point
///
/// Logs go to stderr so stdout carries only the report.
pub fn run() -> anyhow::Result<()> {
    init_logging();

    let registry = PlatformRegistry::new();
    let stdout = io::stdout().lock();
    report(&registry, stdout)
}

/// Probe `registry` and write the report to `out`
pub fn report<R, W>(registry: &R, out: W) -> anyhow::Result<()>
where
    R: Registry + ?Sized,
    W: Write,
{
    let mut out = io::BufWriter::new(out);
    let summary = probe(registry, &mut out).context("failed to write device report")?;
    out.flush().context("failed to flush device report")?;

    if let Some(err) = summary.enumeration_error {
        tracing::debug!(error = %err, "Device list unavailable");
    }
    Ok(())
}

fn init_logging() {
    // Enhanced logging for debug builds
    #[cfg(debug_assertions)]
    {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .init();
        tracing::debug!("Debug logging enabled");
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(tracing::Level::INFO)
            .compact()
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devprobe_core::simulated::MemoryRegistry;
    use devprobe_core::{DeviceId, StatusCode, ICON_ADDRESS};

    #[test]
    fn test_report_writes_every_inspected_device() {
        let registry = MemoryRegistry::new()
            .with_devices(&[10, 20])
            .with_device_name(DeviceId(10), "Speakers")
            .with_icon(DeviceId(10), 0x2a)
            .with_device_name(DeviceId(20), "Mic")
            .with_size_failure(DeviceId(20).object(), ICON_ADDRESS, StatusCode::new(0x2121_2121));

        let mut out = Vec::new();
        report(&registry, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Device [10]:");
        assert_eq!(lines[1], "  name: Speakers, ");
        assert_eq!(lines[2], "  device_uid: 0x000000000000002a");
        assert_eq!(lines[3], "Device [20]:");
        assert_eq!(lines[4], "  name: Mic, ");
        assert_eq!(lines[5], "  device_uid: !!!!");
    }

    #[test]
    fn test_platform_registry_runs_to_completion() {
        let registry = PlatformRegistry::new();
        let mut out = Vec::new();
        report(&registry, &mut out).unwrap();

        #[cfg(not(target_os = "macos"))]
        assert_eq!(String::from_utf8(out).unwrap(), "Error unop\n");
    }
}
