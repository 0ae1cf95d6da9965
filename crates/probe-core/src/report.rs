use std::io::{self, Write};

use crate::device::{DeviceRecord, IconField};
use crate::status::StatusCode;

/// Line-oriented device report
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn report(&mut self, record: &DeviceRecord) -> io::Result<()> {
        write!(
            self.out,
            "Device [{}]:\n  name: {}, \n  device_uid: ",
            record.id, record.name
        )?;
        match &record.icon {
            // Tag bytes go out unchanged, printable or not
            IconField::Unavailable(status) => self.out.write_all(status.decode().as_bytes())?,
            icon => write!(self.out, "{}", icon)?,
        }
        self.out.write_all(b"\n")
    }

    /// Report a failure that ended the run before any device was listed
    pub fn report_error(&mut self, status: StatusCode) -> io::Result<()> {
        self.out.write_all(b"Error ")?;
        self.out.write_all(status.decode().as_bytes())?;
        self.out.write_all(b"\n")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceId, IconRef};

    #[test]
    fn test_record_format() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .report(&DeviceRecord {
                id: DeviceId(20),
                name: "Mic".to_string(),
                icon: IconField::Unavailable(StatusCode::new(0x2121_2121)),
            })
            .unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(out, "Device [20]:\n  name: Mic, \n  device_uid: !!!!\n");
    }

    #[test]
    fn test_error_format() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.report_error(StatusCode::UNKNOWN_PROPERTY).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(out, "Error who?\n");
    }

    #[test]
    fn test_reference_icon_format() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .report(&DeviceRecord {
                id: DeviceId(10),
                name: "Speakers".to_string(),
                icon: IconField::Reference(IconRef::from_bytes(0x10u64.to_ne_bytes().to_vec())),
            })
            .unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(out, "Device [10]:\n  name: Speakers, \n  device_uid: 0x0000000000000010\n");
    }

    #[test]
    fn test_non_utf8_codes_are_written_raw() {
        let code = StatusCode::new(0xff21_8021_u32 as i32);

        let mut reporter = Reporter::new(Vec::new());
        reporter.report_error(code).unwrap();
        assert_eq!(reporter.into_inner(), b"Error \xff!\x80!\n");

        let mut reporter = Reporter::new(Vec::new());
        reporter
            .report(&DeviceRecord {
                id: DeviceId(3),
                name: "Line In".to_string(),
                icon: IconField::Unavailable(code),
            })
            .unwrap();
        let out = reporter.into_inner();
        assert!(out.ends_with(b"device_uid: \xff!\x80!\n"));
    }
}
