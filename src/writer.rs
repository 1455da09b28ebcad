//! Serialization of [`Record`] values back to the flat-file layout.
//!
//! [`Record::to_kegg`] renders the canonical text for one record;
//! [`EnzymeWriter`] streams any number of records into an output sink with
//! the validation the text layout cannot express on its own.

use crate::error::{KeggError, Result};
use crate::record::Record;
use crate::wrap::{id_wrap, motif_wrap, struct_wrap, wrap_kegg, NAME_WRAP, RXN_WRAP, TAG_WIDTH, WrapRule};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append one tagged block: the tag fills the item field on the first
/// line only, continuation lines leave it blank. Empty fields emit nothing.
fn write_block(out: &mut String, tag: &str, values: &[String]) {
    let mut head = tag;
    for value in values {
        for line in value.split('\n') {
            out.push_str(&format!("{:<width$}{}\n", head, line, width = TAG_WIDTH));
            head = "";
        }
    }
}

fn wrap_all(values: &[String], rule: &WrapRule) -> Vec<String> {
    values.iter().map(|v| wrap_kegg(v, rule)).collect()
}

impl Record {
    /// Render this record as canonical KEGG flat-file text, terminated by
    /// a `///` line.
    ///
    /// Re-parsing the output reproduces the record's field values, except
    /// that only the first identifier of each dblink is written.
    ///
    /// # Example
    ///
    /// ```
    /// use kegg_enzyme::{Parser, Record};
    ///
    /// let mut record = Record::new();
    /// record.entry = "1.1.1.1".to_string();
    /// record.name = vec!["Alcohol dehydrogenase".to_string()];
    ///
    /// let text = record.to_kegg();
    /// assert!(text.starts_with("ENTRY       EC 1.1.1.1\n"));
    /// assert_eq!(Parser::new().parse(&text)?, record);
    /// # Ok::<(), kegg_enzyme::KeggError>(())
    /// ```
    pub fn to_kegg(&self) -> String {
        let mut out = String::new();
        if !self.entry.is_empty() {
            write_block(&mut out, "ENTRY", &[format!("EC {}", self.entry)]);
        }
        write_block(&mut out, "NAME", &wrap_all(&self.name, &NAME_WRAP));
        write_block(&mut out, "CLASS", &self.classname);
        write_block(&mut out, "SYSNAME", &wrap_all(&self.sysname, &NAME_WRAP));
        write_block(&mut out, "REACTION", &wrap_all(&self.reaction, &RXN_WRAP));
        write_block(&mut out, "SUBSTRATE", &wrap_all(&self.substrate, &NAME_WRAP));
        write_block(&mut out, "PRODUCT", &wrap_all(&self.product, &NAME_WRAP));
        write_block(&mut out, "INHIBITOR", &wrap_all(&self.inhibitor, &NAME_WRAP));
        write_block(&mut out, "COFACTOR", &wrap_all(&self.cofactor, &NAME_WRAP));
        write_block(&mut out, "EFFECTOR", &wrap_all(&self.effector, &NAME_WRAP));
        write_block(&mut out, "COMMENT", &wrap_all(&self.comment, &id_wrap(0)));

        let pathway: Vec<String> = self
            .pathway
            .iter()
            .map(|p| wrap_kegg(&format!("{}: {}  {}", p.db, p.id, p.description), &id_wrap(16)))
            .collect();
        write_block(&mut out, "PATHWAY", &pathway);

        let genes: Vec<String> = self
            .genes
            .iter()
            .map(|g| wrap_kegg(&format!("{}: {}", g.organism, g.genes.join(" ")), &id_wrap(5)))
            .collect();
        write_block(&mut out, "GENES", &genes);

        let disease: Vec<String> = self
            .disease
            .iter()
            .map(|d| wrap_kegg(&format!("{}: {}  {}", d.db, d.id, d.description), &id_wrap(13)))
            .collect();
        write_block(&mut out, "DISEASE", &disease);

        let motif: Vec<String> = self
            .motif
            .iter()
            .map(|m| wrap_kegg(&format!("{}: {}  {}", m.db, m.id, m.motif), &motif_wrap(13)))
            .collect();
        write_block(&mut out, "MOTIF", &motif);

        let structures: Vec<String> = self
            .structures
            .iter()
            .map(|s| wrap_kegg(&format!("{}: {}  ", s.db, s.ids.join("  ")), &struct_wrap(5)))
            .collect();
        write_block(&mut out, "STRUCTURES", &structures);

        // Enzyme dblinks carry one id per database; only the first is
        // serialized (see the DbLink field docs).
        let dblinks: Vec<String> = self
            .dblinks
            .iter()
            .map(|l| format!("{}: {}", l.db, l.ids.first().map(String::as_str).unwrap_or("")))
            .collect();
        write_block(&mut out, "DBLINKS", &dblinks);

        out.push_str("///\n");
        out
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_kegg())
    }
}

/// Streaming writer for enzyme flat files.
///
/// # Example
///
/// ```no_run
/// use kegg_enzyme::{EnzymeWriter, Record};
///
/// let mut record = Record::new();
/// record.entry = "1.1.1.1".to_string();
///
/// let mut writer = EnzymeWriter::create("enzyme.out")?;
/// writer.write_record(&record)?;
/// writer.finish()?;
/// # Ok::<(), kegg_enzyme::KeggError>(())
/// ```
pub struct EnzymeWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl EnzymeWriter<BufWriter<File>> {
    /// Create a writer to a new file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EnzymeWriter<W> {
    /// Create a writer over any output sink
    pub fn new(writer: W) -> Self {
        EnzymeWriter { writer, records_written: 0 }
    }

    /// Write a single record.
    ///
    /// # Errors
    ///
    /// Returns [`KeggError::InvalidRecord`] if the record has an empty
    /// entry, or a grouped entry with an empty database/organism name or
    /// an empty identifier list; [`KeggError::Io`] on write failure.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        validate(record)?;
        self.writer.write_all(record.to_kegg().as_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    /// Write every record from an iterator
    pub fn write_all<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        for record in records {
            self.write_record(&record?)?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and consume the writer
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn validate(record: &Record) -> Result<()> {
    fn invalid(msg: String) -> KeggError {
        KeggError::InvalidRecord { msg }
    }

    if record.entry.is_empty() {
        return Err(invalid("entry cannot be empty".to_string()));
    }
    for p in &record.pathway {
        if p.db.is_empty() || p.id.is_empty() {
            return Err(invalid(format!("pathway entry missing db or id: {p:?}")));
        }
    }
    for d in &record.disease {
        if d.db.is_empty() || d.id.is_empty() {
            return Err(invalid(format!("disease entry missing db or id: {d:?}")));
        }
    }
    for m in &record.motif {
        if m.db.is_empty() || m.id.is_empty() {
            return Err(invalid(format!("motif entry missing db or id: {m:?}")));
        }
    }
    for g in &record.genes {
        if g.organism.is_empty() || g.genes.is_empty() {
            return Err(invalid(format!("gene entry missing organism or ids: {g:?}")));
        }
    }
    for s in &record.structures {
        if s.db.is_empty() || s.ids.is_empty() {
            return Err(invalid(format!("structure entry missing db or ids: {s:?}")));
        }
    }
    for l in &record.dblinks {
        if l.db.is_empty() || l.ids.is_empty() {
            return Err(invalid(format!("dblink entry missing db or ids: {l:?}")));
        }
    }
    Ok(())
}
