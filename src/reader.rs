//! Streaming readers for multi-record enzyme files.
//!
//! A flat file holds zero or more records, each terminated by a line that
//! is exactly `///`. [`RecordSplitter`] yields each record's raw text;
//! [`EnzymeReader`] additionally parses each one into a [`Record`]. Both
//! are lazy, forward-only iterators that borrow the reader for their
//! lifetime and never close it.

use crate::error::{KeggError, Result};
use crate::parser::Parser;
use crate::record::Record;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line that terminates a record
const TERMINATOR: &str = "///";

/// Splits a stream into raw record texts without parsing them.
///
/// Each item is one record's text up to and including its `///` line.
/// Useful for post-processing pipelines that want the raw blocks.
///
/// # Example
///
/// ```
/// use kegg_enzyme::RecordSplitter;
///
/// let data = "ENTRY       EC 1.1.1.1\n///\nENTRY       EC 1.1.1.2\n///\n";
/// let texts: Vec<String> = RecordSplitter::new(data.as_bytes())
///     .collect::<kegg_enzyme::Result<_>>()?;
/// assert_eq!(texts.len(), 2);
/// assert!(texts[0].ends_with("///\n"));
/// # Ok::<(), kegg_enzyme::KeggError>(())
/// ```
pub struct RecordSplitter<R: BufRead> {
    reader: R,
    line_buf: String,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> RecordSplitter<R> {
    /// Create a splitter over any buffered reader
    pub fn new(reader: R) -> Self {
        RecordSplitter {
            reader,
            line_buf: String::with_capacity(128),
            line_number: 0,
            finished: false,
        }
    }

    /// Current line number in the underlying stream (1-based)
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for RecordSplitter<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut record = String::new();
        loop {
            self.line_buf.clear();
            match self.reader.read_line(&mut self.line_buf) {
                Ok(0) => {
                    self.finished = true;
                    // Trailing whitespace after the last record is fine;
                    // anything else was a record that never terminated.
                    if record.trim().is_empty() {
                        return None;
                    }
                    return Some(Err(KeggError::MalformedRecord {
                        line: self.line_number,
                        msg: "record not terminated by ///".to_string(),
                    }));
                }
                Ok(_) => {
                    self.line_number += 1;
                    record.push_str(&self.line_buf);
                    let line = self.line_buf.strip_suffix('\n').unwrap_or(&self.line_buf);
                    let line = line.strip_suffix('\r').unwrap_or(line);
                    if line == TERMINATOR {
                        return Some(Ok(record));
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

/// Streaming reader that parses each record as it is split off.
///
/// # Example
///
/// ```no_run
/// use kegg_enzyme::EnzymeReader;
///
/// let reader = EnzymeReader::from_gzip_path("enzyme.gz")?;
/// for record in reader {
///     let record = record?;
///     println!("EC {}", record.entry);
/// }
/// # Ok::<(), kegg_enzyme::KeggError>(())
/// ```
pub struct EnzymeReader<R: BufRead> {
    splitter: RecordSplitter<R>,
    parser: Parser,
}

impl EnzymeReader<BufReader<File>> {
    /// Open an uncompressed enzyme flat file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl EnzymeReader<BufReader<MultiGzDecoder<File>>> {
    /// Open a gzip-compressed enzyme flat file, as distributed by KEGG
    pub fn from_gzip_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(MultiGzDecoder::new(file))))
    }
}

impl<R: BufRead> EnzymeReader<R> {
    /// Create a reader over any buffered source
    pub fn new(reader: R) -> Self {
        EnzymeReader {
            splitter: RecordSplitter::new(reader),
            parser: Parser::new(),
        }
    }
}

impl<R: BufRead> Iterator for EnzymeReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.splitter.next()? {
            Ok(text) => Some(self.parser.parse(&text)),
            Err(e) => Some(Err(e)),
        }
    }
}
