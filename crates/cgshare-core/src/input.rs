//! Line-at-a-time input reading shared by both pipeline stages.
//!
//! Lines are read as raw bytes so a single non-UTF-8 line becomes a
//! per-line parse error instead of ending the stream.

use std::io::BufRead;

use cgshare_common::constants::COMMENT_PREFIX;
use cgshare_common::error::{CgshareError, Result};

/// One raw input line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based position in the stream.
    pub number: usize,
    raw: Vec<u8>,
}

impl InputLine {
    /// Returns the line as text without its terminator.
    ///
    /// # Errors
    ///
    /// Returns [`CgshareError::Parse`] if the line is not valid UTF-8.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.raw)
            .map(|s| s.trim_end_matches(['\n', '\r']))
            .map_err(|e| CgshareError::parse(&String::from_utf8_lossy(&self.raw), e.to_string()))
    }

    /// Returns `true` for empty, whitespace-only, and `#` comment lines.
    pub fn is_ignorable(&self) -> bool {
        self.text().is_ok_and(|text| {
            let text = text.trim_start();
            text.is_empty() || text.starts_with(COMMENT_PREFIX)
        })
    }
}

/// Iterator over the lines of a buffered reader.
///
/// Yields `Err` only when the stream itself fails.
#[derive(Debug)]
pub struct InputLines<R> {
    reader: R,
    number: usize,
}

impl<R: BufRead> InputLines<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self { reader, number: 0 }
    }
}

impl<R: BufRead> Iterator for InputLines<R> {
    type Item = Result<InputLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = Vec::new();
        match self.reader.read_until(b'\n', &mut raw) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                Some(Ok(InputLine {
                    number: self.number,
                    raw,
                }))
            }
            Err(source) => Some(Err(CgshareError::Stream { source })),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn yields_numbered_lines_without_terminators() {
        let lines: Vec<_> = InputLines::new(Cursor::new("a:b\r\nc:d\nlast"))
            .collect::<Result<_>>()
            .expect("should read");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].text().expect("utf-8"), "a:b");
        assert_eq!(lines[1].text().expect("utf-8"), "c:d");
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].text().expect("utf-8"), "last");
    }

    #[test]
    fn invalid_utf8_is_a_line_error() {
        let mut lines = InputLines::new(Cursor::new(b"\xff\xfe\nok\n".to_vec()));
        let first = lines.next().expect("line").expect("stream ok");
        assert!(first.text().unwrap_err().is_parse());
        let second = lines.next().expect("line").expect("stream ok");
        assert_eq!(second.text().expect("utf-8"), "ok");
        assert!(lines.next().is_none());
    }

    #[test]
    fn blank_and_comment_lines_are_ignorable() {
        let lines: Vec<_> = InputLines::new(Cursor::new("\n   \n# note\ncreate:cpu:_:g\n"))
            .collect::<Result<_>>()
            .expect("should read");
        let ignorable: Vec<bool> = lines.iter().map(InputLine::is_ignorable).collect();
        assert_eq!(ignorable, vec![true, true, true, false]);
    }
}
