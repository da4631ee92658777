//! Lazy line classification for coordinate files.
//!
//! [`Reader`] walks a file one line at a time and tags each line as a
//! comment, the header, or a data entry. It never materializes the
//! matrix, so arbitrarily large files read in constant memory.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{Entry, Header, Record, COMMENT_MARKER, FIELD_SEPARATOR};
use crate::errors::{Error, Result};

/// Streaming reader yielding one classified [`Record`] per input line.
///
/// The first non-comment line is taken as the header; every non-comment
/// line after it is a data line. Comments pass through wherever they
/// appear, before or after the header.
pub struct Reader<R: BufRead> {
    lines: Lines<R>,
    path: Option<PathBuf>,
    line_number: usize,
    header_seen: bool,
}

impl Reader<BufReader<File>> {
    /// Open a coordinate file. Parse errors from this reader carry the
    /// path and the 1-based line number.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::from_io_error(e, path))?;
        let mut reader = Self::new(BufReader::new(file));
        reader.path = Some(path.to_path_buf());
        Ok(reader)
    }
}

impl<R: BufRead> Reader<R> {
    /// Wrap an already buffered source, for example an in-memory slice.
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
            path: None,
            line_number: 0,
            header_seen: false,
        }
    }

    fn classify(&mut self, line: String) -> Result<Record> {
        if line.starts_with(COMMENT_MARKER) {
            return Ok(Record::Comment(line));
        }
        if !self.header_seen {
            self.header_seen = true;
            return self.parse_header(&line).map(Record::Header);
        }
        self.parse_entry(line).map(Record::Entry)
    }

    fn parse_header(&self, line: &str) -> Result<Header> {
        let (rows, cols, nonzeros) = self.split_fields(line)?;
        let header = Header {
            rows: self.parse_field(rows, "row count")?,
            cols: self.parse_field(cols, "column count")?,
            nonzeros: self.parse_field(nonzeros, "nonzero count")?,
        };
        // The rewritten header declares double the count; a count that
        // cannot be doubled in u64 is out of range for this format.
        if header.doubled_nonzeros().is_none() {
            return Err(self.parse_error(format!(
                "nonzero count {} too large to double",
                header.nonzeros
            )));
        }
        Ok(header)
    }

    fn parse_entry(&self, line: String) -> Result<Entry> {
        let (row, col, value) = {
            let (row, col, value) = self.split_fields(&line)?;
            (
                self.parse_field(row, "row index")?,
                self.parse_field(col, "column index")?,
                self.parse_field(value, "value")?,
            )
        };
        Ok(Entry {
            row,
            col,
            value,
            line,
        })
    }

    fn split_fields<'a>(&self, line: &'a str) -> Result<(&'a str, &'a str, &'a str)> {
        let mut fields = line.split(FIELD_SEPARATOR);
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(a), Some(b), Some(c), None) => Ok((a, b, c)),
            _ => Err(self.parse_error(format!(
                "expected 3 space-separated fields, got '{line}'"
            ))),
        }
    }

    fn parse_field<T: FromStr>(&self, field: &str, name: &str) -> Result<T> {
        field
            .parse()
            .map_err(|_| self.parse_error(format!("invalid {name} '{field}'")))
    }

    fn parse_error(&self, message: String) -> Error {
        Error::parse_at(message, self.path.as_deref(), self.line_number)
    }

    fn read_error(&self, err: std::io::Error) -> Error {
        match &self.path {
            Some(path) => Error::from_io_error(err, path),
            None => Error::from(err),
        }
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(self.read_error(e))),
        };
        self.line_number += 1;
        Some(self.classify(line))
    }
}
