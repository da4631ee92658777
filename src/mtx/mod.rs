//! Matrix Market coordinate format support.
//!
//! A coordinate file is line oriented: comment lines start with `%`, the
//! first non-comment line is a header declaring `rows cols nonzeros`, and
//! every later non-comment line is one stored entry `row col value`.
//! Symmetric files store only one triangle of the matrix; [`desymmetrize`]
//! rewrites such a file with the opposite triangle made explicit.

pub mod desym;
pub mod reader;

pub use desym::{desym_output_path, desymmetrize, desymmetrize_file, DesymStats, DesymSummary};
pub use reader::Reader;

/// Character that marks a comment line in coordinate files.
pub const COMMENT_MARKER: char = '%';

/// Separator between the fields of header and data lines.
pub const FIELD_SEPARATOR: char = ' ';

/// The dimension line of a coordinate file: matrix shape plus the number
/// of stored entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub rows: u64,
    pub cols: u64,
    pub nonzeros: u64,
}

impl Header {
    /// Nonzero count a desymmetrized rewrite declares. `None` when
    /// doubling would exceed the u64 range.
    pub fn doubled_nonzeros(&self) -> Option<u64> {
        self.nonzeros.checked_mul(2)
    }
}

/// One stored entry of the matrix, with 1-based indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub row: u64,
    pub col: u64,
    pub value: f64,
    /// The data line exactly as read. Echoing this instead of
    /// reformatting `value` keeps the original number notation
    /// (`3.0` stays `3.0`, `1e-3` stays `1e-3`).
    pub line: String,
}

impl Entry {
    /// True for entries on the main diagonal, which have no mirror image.
    pub fn is_diagonal(&self) -> bool {
        self.row == self.col
    }

    /// The textual value field, reused verbatim when writing the
    /// mirrored entry.
    pub fn value_text(&self) -> &str {
        self.line.rsplit(FIELD_SEPARATOR).next().unwrap_or("")
    }
}

/// Classification of one input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// A comment line, kept verbatim including the marker.
    Comment(String),
    /// The first non-comment line of the file.
    Header(Header),
    /// Any non-comment line after the header.
    Entry(Entry),
}
