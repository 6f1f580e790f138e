//! Line-by-line transcript decoding
//!
//! Transcripts are JSONL files written by Claude Code. Every line is decoded
//! on its own, and a line that cannot be decoded is skipped without
//! affecting its neighbours. Lines that are not valid UTF-8 are decoded
//! lossily so that a stray byte in message text does not hide the usage
//! record on the same line.

use cstatus_core::types::TranscriptEntry;
use std::io::{self, BufRead};
use tracing::trace;

/// Counters describing one pass over a transcript
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read, including skipped ones
    pub lines: usize,
    /// Empty or whitespace-only lines
    pub blank: usize,
    /// Lines that failed to decode as a transcript entry
    pub malformed: usize,
}

/// Why a line produced no entry
#[derive(Debug)]
enum SkipReason {
    Blank,
    NotAnObject,
    Json(serde_json::Error),
}

/// Iterator over the decodable entries of a transcript
///
/// Iteration stops at end of input or at the first read error. The error is
/// kept and can be taken with [`EntryReader::take_error`] once iteration
/// ends.
///
/// # Examples
/// ```
/// use cstatus_transcript::reader::EntryReader;
/// use std::io::Cursor;
///
/// let data = "{\"timestamp\":\"2025-08-01T10:00:00Z\"}\nnot json\n\n";
/// let mut reader = EntryReader::new(Cursor::new(data));
/// assert_eq!(reader.by_ref().count(), 1);
/// assert_eq!(reader.stats().malformed, 1);
/// assert_eq!(reader.stats().blank, 1);
/// ```
pub struct EntryReader<R> {
    reader: R,
    buf: Vec<u8>,
    stats: ScanStats,
    error: Option<io::Error>,
}

impl<R: BufRead> EntryReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            stats: ScanStats::default(),
            error: None,
        }
    }

    /// Counters for the lines consumed so far
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// The read error that ended iteration, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for EntryReader<R> {
    type Item = TranscriptEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
            self.stats.lines += 1;

            match decode_line(&self.buf) {
                Ok(entry) => return Some(entry),
                Err(SkipReason::Blank) => self.stats.blank += 1,
                Err(SkipReason::NotAnObject) => {
                    self.stats.malformed += 1;
                    trace!("Skipping line {}: not a JSON object", self.stats.lines);
                }
                Err(SkipReason::Json(e)) => {
                    self.stats.malformed += 1;
                    trace!("Skipping line {}: {}", self.stats.lines, e);
                }
            }
        }
    }
}

fn decode_line(raw: &[u8]) -> Result<TranscriptEntry, SkipReason> {
    let text = String::from_utf8_lossy(raw);
    let line = text.trim();
    if line.is_empty() {
        return Err(SkipReason::Blank);
    }
    // serde accepts a JSON array for a struct; transcripts only hold objects
    if !line.starts_with('{') {
        return Err(SkipReason::NotAnObject);
    }
    serde_json::from_str(line).map_err(SkipReason::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn collect(data: &[u8]) -> (Vec<TranscriptEntry>, ScanStats) {
        let mut reader = EntryReader::new(Cursor::new(data.to_vec()));
        let entries: Vec<_> = reader.by_ref().collect();
        assert!(reader.take_error().is_none());
        (entries, reader.stats())
    }

    #[test]
    fn test_skips_blank_and_malformed_lines() {
        let data = b"\n   \n{\"timestamp\":\"2025-08-01T10:00:00Z\"}\n{broken\nplain text\n{}\n";
        let (entries, stats) = collect(data);

        assert_eq!(entries.len(), 2);
        assert_eq!(stats.lines, 6);
        assert_eq!(stats.blank, 2);
        assert_eq!(stats.malformed, 2);
    }

    #[test]
    fn test_last_line_without_newline() {
        let (entries, stats) = collect(b"{}\n{\"isSidechain\":true}");
        assert_eq!(entries.len(), 2);
        assert!(!entries[1].is_main_chain());
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (entries, _) = collect(b"{\"isSidechain\":true}\r\n{}\r\n");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_arrays_and_scalars_rejected() {
        let (entries, stats) = collect(b"[\"2025-08-01T10:00:00Z\"]\n42\n\"text\"\nnull\ntrue\n");
        assert!(entries.is_empty());
        assert_eq!(stats.malformed, 5);
    }

    #[test]
    fn test_skip_reasons() {
        assert!(matches!(decode_line(b"  \r\n"), Err(SkipReason::Blank)));
        assert!(matches!(decode_line(b"[{}]"), Err(SkipReason::NotAnObject)));

        match decode_line(b"{\"timestamp\":42}") {
            Err(SkipReason::Json(e)) => assert!(e.to_string().contains("invalid type")),
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_decoded_lossily() {
        let mut data = br#"{"message":{"content":"bad "#.to_vec();
        data.push(0xff);
        data.extend_from_slice(br#"","usage":{"input_tokens":9}}}"#);
        data.push(b'\n');

        let (entries, stats) = collect(&data);
        assert_eq!(stats.malformed, 0);
        assert_eq!(entries[0].usage().map(|u| u.input_tokens), Some(9));
    }

    #[test]
    fn test_empty_input() {
        let (entries, stats) = collect(b"");
        assert!(entries.is_empty());
        assert_eq!(stats, ScanStats::default());
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("disk on fire"));
            }
            self.served = true;
            let line = b"{}\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_read_error_stops_iteration() {
        let mut reader = EntryReader::new(BufReader::new(FailingReader { served: false }));

        assert!(reader.next().is_some());
        assert!(reader.next().is_none());
        let error = reader.take_error().unwrap();
        assert_eq!(error.to_string(), "disk on fire");
        // Fused after an error
        assert!(reader.next().is_none());
    }
}
