//! Frames read from text, one hex encoded frame per line.
//!
//! Bytes may be separated by spaces or colons, everything after a `#` is a
//! comment. Blank lines are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{anyhow, Result};

use gswdump_api as api;
use api::packet::Packet;

#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// captured bytes
    pub raw: Vec<u8>,
    /// wire length
    pub len: u32,
}

impl Packet for Frame {
    fn raw(&self) -> &[u8] {
        self.raw.as_slice()
    }

    fn caplen(&self) -> u32 {
        self.raw.len() as u32
    }

    fn len(&self) -> u32 {
        self.len
    }
}

/// Open the frame file, "-" reads from stdin
pub fn open(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|e| anyhow!("Failed to open {}: {}", path, e))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Decode one line into a frame cut at `snaplen` bytes, `None` for lines without data
pub fn parse_line(line: &str, snaplen: u32) -> Result<Option<Frame>> {
    let data = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let digits: String = data
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    if digits.is_empty() {
        return Ok(None);
    }

    let mut raw = hex::decode(&digits)?;
    let len = raw.len() as u32;
    raw.truncate(snaplen as usize);
    Ok(Some(Frame { raw, len }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_hex() {
        let frame = parse_line("0180c200000e cc040d5cf000 88c3", 65535)
            .unwrap()
            .unwrap();
        assert_eq!(frame.len, 14);
        assert_eq!(frame.caplen(), 14);
        assert_eq!(&frame.raw()[12..], &[0x88, 0xc3]);
    }

    #[test]
    fn colons_and_comments() {
        let frame = parse_line("01:80:c2 # destination only", 65535)
            .unwrap()
            .unwrap();
        assert_eq!(frame.raw, vec![0x01, 0x80, 0xc2]);
    }

    #[test]
    fn blank_and_comment_lines() {
        assert!(parse_line("", 65535).unwrap().is_none());
        assert!(parse_line("   # nothing here", 65535).unwrap().is_none());
    }

    #[test]
    fn snaplen_truncates_capture_only() {
        let frame = parse_line("00112233445566778899", 4).unwrap().unwrap();
        assert_eq!(frame.len, 10);
        assert_eq!(frame.caplen(), 4);
    }

    #[test]
    fn bad_hex() {
        assert!(parse_line("0g", 65535).is_err());
        assert!(parse_line("abc", 65535).is_err());
    }
}
