//! Streaming desymmetrization of coordinate files.
//!
//! The transform is a single pass: comments are copied through, the
//! header is rewritten with a doubled nonzero count, every data line is
//! echoed, and each off-diagonal entry is immediately followed by its
//! mirror image. No line is held beyond the current one.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::reader::Reader;
use super::Record;
use crate::errors::{Error, Result, ResultExt};

/// Marker inserted between the file stem and the extension of derived
/// output paths.
const OUTPUT_MARKER: &str = "_desym";

/// Line counters accumulated over one streaming pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DesymStats {
    /// Nonzero count declared by the input header, if one was seen.
    pub declared_nonzeros: Option<u64>,
    /// Data lines read from the input.
    pub entries_read: u64,
    /// Entries on the main diagonal. These are written once, unmirrored.
    pub diagonal_entries: u64,
    /// Mirror lines added for off-diagonal entries.
    pub mirrored_entries: u64,
    /// Comment lines copied through.
    pub comment_lines: u64,
}

impl DesymStats {
    /// Data lines present in the output: every input entry plus one
    /// mirror per off-diagonal entry.
    pub fn data_lines_written(&self) -> u64 {
        self.entries_read + self.mirrored_entries
    }

    /// Nonzero count the output header declares, which is always double
    /// the input's. `None` with no header or a count too large to double.
    pub fn declared_output_nonzeros(&self) -> Option<u64> {
        self.declared_nonzeros.and_then(|n| n.checked_mul(2))
    }

    /// True when the output header declares more entries than were
    /// written. Happens whenever the input stores diagonal entries,
    /// since those have no mirror image.
    pub fn header_overcounts(&self) -> bool {
        self.diagonal_entries > 0
    }
}

/// A completed file transform: where the output went and what was
/// counted along the way.
#[derive(Clone, Debug)]
pub struct DesymSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub stats: DesymStats,
}

/// Stream `reader` through the desymmetrizing rewrite into `out`.
///
/// The input is consumed lazily, so peak memory stays flat regardless of
/// matrix size. On a parse error the output is left at whatever point
/// the pass had reached.
pub fn desymmetrize<R: BufRead, W: Write>(reader: Reader<R>, out: &mut W) -> Result<DesymStats> {
    let mut stats = DesymStats::default();

    for record in reader {
        match record? {
            Record::Comment(line) => {
                stats.comment_lines += 1;
                writeln!(out, "{line}")?;
            }
            Record::Header(header) => {
                log::debug!(
                    "header: {} x {} matrix, {} stored entries",
                    header.rows,
                    header.cols,
                    header.nonzeros
                );
                stats.declared_nonzeros = Some(header.nonzeros);
                let doubled = header.doubled_nonzeros().ok_or_else(|| {
                    Error::parse(format!(
                        "nonzero count {} too large to double",
                        header.nonzeros
                    ))
                })?;
                writeln!(out, "{} {} {}", header.rows, header.cols, doubled)?;
            }
            Record::Entry(entry) => {
                stats.entries_read += 1;
                writeln!(out, "{}", entry.line)?;
                if entry.is_diagonal() {
                    stats.diagonal_entries += 1;
                } else {
                    stats.mirrored_entries += 1;
                    writeln!(out, "{} {} {}", entry.col, entry.row, entry.value_text())?;
                }
            }
        }
    }

    if stats.declared_nonzeros.is_none() {
        log::warn!("input has no header line, output is an empty copy");
    }
    if stats.header_overcounts() {
        log::warn!(
            "{} diagonal entries have no mirror: output header declares {} entries but {} data lines were written",
            stats.diagonal_entries,
            stats.declared_output_nonzeros().unwrap_or(0),
            stats.data_lines_written()
        );
    }

    Ok(stats)
}

/// Desymmetrize the file at `input`, writing the result next to it with
/// the `_desym` marker in the name. An existing file at the output path
/// is overwritten.
pub fn desymmetrize_file(input: &Path) -> Result<DesymSummary> {
    let reader = Reader::open(input)?;
    let output = desym_output_path(input);
    log::info!("desymmetrizing {} -> {}", input.display(), output.display());

    let file = File::create(&output).map_err(|e| Error::from_io_error(e, &output))?;
    let mut writer = BufWriter::new(file);
    // Reader errors already carry the input path, so the only unlabeled
    // failures left are writes to the output file.
    let stats = desymmetrize(reader, &mut writer).with_path(&output)?;
    writer
        .flush()
        .map_err(|e| Error::from_io_error(e, &output))?;

    Ok(DesymSummary {
        input_path: input.to_path_buf(),
        output_path: output,
        stats,
    })
}

/// Derive the output path for an input file: `foo/bar.mtx` becomes
/// `foo/bar_desym.mtx`, keeping whatever extension the input had.
pub fn desym_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(OUTPUT_MARKER);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (String, DesymStats) {
        let mut out = Vec::new();
        let stats = desymmetrize(Reader::new(input.as_bytes()), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_mirrors_off_diagonal_and_doubles_header() {
        let input = "\
%%MatrixMarket matrix coordinate real symmetric
% 3x3 with one diagonal entry
3 3 2
1 1 1.5
3 1 2.0
";
        let expected = "\
%%MatrixMarket matrix coordinate real symmetric
% 3x3 with one diagonal entry
3 3 4
1 1 1.5
3 1 2.0
1 3 2.0
";
        let (output, stats) = run(input);
        assert_eq!(output, expected);
        assert_eq!(stats.declared_nonzeros, Some(2));
        assert_eq!(stats.declared_output_nonzeros(), Some(4));
        assert_eq!(stats.entries_read, 2);
        assert_eq!(stats.diagonal_entries, 1);
        assert_eq!(stats.mirrored_entries, 1);
        assert_eq!(stats.data_lines_written(), 3);
        assert!(stats.header_overcounts());
    }

    #[test]
    fn test_mirror_reuses_the_original_value_text() {
        // Reformatting through f64 would turn 3.0 into 3; the mirror
        // must carry the value exactly as written.
        let (output, _) = run("4 4 2\n1 2 3.0\n4 2 1e-3\n");
        assert_eq!(output, "4 4 4\n1 2 3.0\n2 1 3.0\n4 2 1e-3\n2 4 1e-3\n");
    }

    #[test]
    fn test_diagonal_only_input_adds_no_lines() {
        let (output, stats) = run("2 2 2\n1 1 5.0\n2 2 6.0\n");
        assert_eq!(output, "2 2 4\n1 1 5.0\n2 2 6.0\n");
        assert_eq!(stats.mirrored_entries, 0);
        assert_eq!(stats.diagonal_entries, 2);
        assert!(stats.header_overcounts());
    }

    #[test]
    fn test_off_diagonal_only_header_matches_lines() {
        let (output, stats) = run("3 3 2\n2 1 1.0\n3 2 4.5\n");
        assert_eq!(output, "3 3 4\n2 1 1.0\n1 2 1.0\n3 2 4.5\n2 3 4.5\n");
        assert!(!stats.header_overcounts());
        assert_eq!(stats.data_lines_written(), 4);
    }

    #[test]
    fn test_empty_input_produces_empty_output() {
        let (output, stats) = run("");
        assert_eq!(output, "");
        assert_eq!(stats, DesymStats::default());
    }

    #[test]
    fn test_comment_only_input_copies_comments() {
        let (output, stats) = run("% a\n% b\n");
        assert_eq!(output, "% a\n% b\n");
        assert_eq!(stats.comment_lines, 2);
        assert_eq!(stats.declared_nonzeros, None);
    }

    #[test]
    fn test_comments_between_data_lines_stay_in_place() {
        let (output, _) = run("2 2 1\n% note\n2 1 7.0\n");
        assert_eq!(output, "2 2 2\n% note\n2 1 7.0\n1 2 7.0\n");
    }

    #[test]
    fn test_parse_error_stops_the_pass() {
        let mut out = Vec::new();
        let err = desymmetrize(Reader::new("2 2 1\nbad line here extra\n".as_bytes()), &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: Some(2), .. }));
        // Everything before the bad line was already written.
        assert_eq!(String::from_utf8(out).unwrap(), "2 2 2\n");
    }

    #[test]
    fn test_header_count_too_large_to_double_is_rejected() {
        let input = format!("1 1 {}\n", u64::MAX);
        let mut out = Vec::new();
        let err = desymmetrize(Reader::new(input.as_bytes()), &mut out).unwrap_err();
        assert!(matches!(err, Error::Parse { line: Some(1), .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_largest_doubleable_count_is_written_exactly() {
        let input = format!("1 1 {}\n", u64::MAX / 2);
        let (output, stats) = run(&input);
        assert_eq!(output, format!("1 1 {}\n", u64::MAX - 1));
        assert_eq!(stats.declared_output_nonzeros(), Some(u64::MAX - 1));
    }

    #[test]
    fn test_declared_output_nonzeros_checks_the_doubling() {
        let stats = DesymStats {
            declared_nonzeros: Some(u64::MAX),
            ..DesymStats::default()
        };
        assert_eq!(stats.declared_output_nonzeros(), None);
    }

    #[test]
    fn test_output_path_keeps_extension() {
        assert_eq!(
            desym_output_path(Path::new("data/matrix.mtx")),
            PathBuf::from("data/matrix_desym.mtx")
        );
        assert_eq!(
            desym_output_path(Path::new("graph.dat")),
            PathBuf::from("graph_desym.dat")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(desym_output_path(Path::new("matrix")), PathBuf::from("matrix_desym"));
    }

    #[test]
    fn test_output_path_with_dotted_stem() {
        assert_eq!(
            desym_output_path(Path::new("runs/bcsstk01.v2.mtx")),
            PathBuf::from("runs/bcsstk01.v2_desym.mtx")
        );
    }
}
