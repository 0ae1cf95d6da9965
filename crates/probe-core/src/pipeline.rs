//! Enumerate, inspect and report, in one straight pass
//!
//! No step loops back or retries. Devices are handled strictly one after the
//! other.

use std::io::{self, Write};

use crate::enumerate::DeviceEnumerator;
use crate::error::QueryError;
use crate::inspect::DeviceInspector;
use crate::report::Reporter;
use crate::traits::Registry;

/// What a probe run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub listed: usize,
    pub reported: usize,
    pub skipped: usize,
    /// Set when the device list itself could not be read
    pub enumeration_error: Option<QueryError>,
}

/// Run the whole probe against `registry`, writing the report to `out`
///
/// Only write failures are returned as errors. Registry failures end up in
/// the report and the summary.
pub fn probe<R, W>(registry: &R, out: W) -> io::Result<ProbeSummary>
where
    R: Registry + ?Sized,
    W: Write,
{
    let mut reporter = Reporter::new(out);
    let mut summary = ProbeSummary::default();

    let devices = match DeviceEnumerator::new(registry).list_devices() {
        Ok(devices) => devices,
        Err(err) => {
            let status = err.status();
            tracing::warn!(raw = status.raw(), code = %status.decode(), "Device enumeration failed");
            reporter.report_error(status)?;
            summary.enumeration_error = Some(err);
            return Ok(summary);
        }
    };
    summary.listed = devices.len();

    let mut inspector = DeviceInspector::new(registry);
    for id in devices {
        match inspector.inspect(id) {
            Ok(record) => {
                reporter.report(&record)?;
                summary.reported += 1;
            }
            Err(err) => {
                let status = err.status();
                tracing::warn!(
                    device = %id,
                    raw = status.raw(),
                    code = %status.decode(),
                    "Skipping device, name lookup failed"
                );
                summary.skipped += 1;
            }
        }
    }

    tracing::info!(
        listed = summary.listed,
        reported = summary.reported,
        skipped = summary.skipped,
        "Probe finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceId;
    use crate::simulated::{MemoryRegistry, RegistrySnapshot};
    use crate::status::StatusCode;

    fn run(registry: &MemoryRegistry) -> (String, ProbeSummary) {
        let mut out = Vec::new();
        let summary = probe(registry, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_speakers_and_mic() {
        let registry = MemoryRegistry::new()
            .with_devices(&[10, 20])
            .with_device_name(DeviceId(10), "Speakers")
            .with_icon(DeviceId(10), 0x0000_6000_0123_4560)
            .with_device_name(DeviceId(20), "Mic")
            .with_fetch_failure(
                DeviceId(20).object(),
                crate::property::ICON_ADDRESS,
                8,
                StatusCode::new(0x2121_2121),
            );

        let (out, summary) = run(&registry);
        assert_eq!(
            out,
            "Device [10]:\n  name: Speakers, \n  device_uid: 0x0000600001234560\n\
             Device [20]:\n  name: Mic, \n  device_uid: !!!!\n"
        );
        assert_eq!(summary.listed, 2);
        assert_eq!(summary.reported, 2);
    }

    #[test]
    fn test_zero_devices_completes() {
        let registry = MemoryRegistry::new().with_devices(&[]);
        let (out, summary) = run(&registry);

        assert!(out.is_empty());
        assert_eq!(summary, ProbeSummary::default());
    }

    #[test]
    fn test_enumeration_failure_prints_decoded_code() {
        let snapshot: RegistrySnapshot =
            serde_json::from_str(r#"{ "list_error": 1937010544 }"#).unwrap();
        let registry = MemoryRegistry::from_snapshot(&snapshot);
        let (out, summary) = run(&registry);

        assert_eq!(out, "Error stop\n");
        assert_eq!(
            summary.enumeration_error.map(|err| err.status()),
            Some(StatusCode::NOT_RUNNING)
        );
        assert_eq!(summary.listed, 0);
    }

    #[test]
    fn test_device_with_long_name_is_still_reported() {
        let long = "n".repeat(140);
        let registry = MemoryRegistry::new()
            .with_devices(&[1, 2])
            .with_device_name(DeviceId(1), &long)
            .with_icon(DeviceId(1), 1)
            .with_device_name(DeviceId(2), "Mic")
            .with_icon(DeviceId(2), 2);
        let (out, summary) = run(&registry);

        let expected = format!("Device [1]:\n  name: {}, \n", "n".repeat(127));
        assert!(out.starts_with(&expected));
        assert!(out.contains("Device [2]:\n  name: Mic, "));
        assert_eq!(summary.reported, 2);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_device_with_failed_name_is_left_out() {
        let snapshot: RegistrySnapshot = serde_json::from_str(
            r#"{
                "devices": [
                    { "id": 1, "name": "Built-in Output", "icon": 1 },
                    { "id": 2, "name_error": 560227702, "icon": 2 },
                    { "id": 3, "name": "USB Audio", "icon": 3 }
                ]
            }"#,
        )
        .unwrap();
        let registry = MemoryRegistry::from_snapshot(&snapshot);
        let (out, summary) = run(&registry);

        assert!(out.contains("Device [1]:"));
        assert!(!out.contains("Device [2]"));
        assert!(out.contains("Device [3]:\n  name: USB Audio, "));
        assert_eq!(out.lines().count(), 6);
        assert_eq!(summary.listed, 3);
        assert_eq!(summary.reported, 2);
        assert_eq!(summary.skipped, 1);
    }
}
