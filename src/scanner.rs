//! Grammar scanner: turns one record's raw text into tagged events.
//!
//! # Design
//!
//! The flat-file grammar is small enough to drive with a hand-written line
//! matcher. [`LineGrammar`] walks the tagged field blocks of a record (the
//! tag sits in the first 12 columns, continuation lines leave it blank) and
//! emits `(tag, values)` events into a [`TagSink`]. Grouped fields such as
//! PATHWAY are decomposed into their sub-events (`PathwayDb`, `PathwayId`,
//! `PathwayDesc`), in source order, so the sink can assemble tuples without
//! ever seeing the raw line layout.
//!
//! Consecutive occurrences of the same tag coalesce into a single event
//! carrying all values; a tag change flushes. The matcher is built once and
//! is reusable across records.
//!
//! [`EnzymeMatcher`] is the seam between the scanner and the grammar
//! technology: anything that can produce the event stream for a record text
//! can stand in for [`LineGrammar`].

use crate::error::{KeggError, Result};
use crate::wrap::TAG_WIDTH;

/// Event tags recognized in an enzyme record.
///
/// This is the closed set of tags of interest: everything else in the
/// grammar is structure the scanner discards silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `ENTRY` value, e.g. `EC 1.1.1.1`
    Entry,
    /// One or more enzyme names
    Name,
    /// Classification terms
    ClassName,
    /// Systematic name
    SysName,
    /// Reaction descriptions
    Reaction,
    /// Substrates
    Substrate,
    /// Products
    Product,
    /// Inhibitors
    Inhibitor,
    /// Cofactors
    Cofactor,
    /// Effectors
    Effector,
    /// Comment lines
    Comment,
    /// Pathway database name
    PathwayDb,
    /// Pathway identifier
    PathwayId,
    /// Pathway description parts
    PathwayDesc,
    /// Organism code of a GENES line
    Organism,
    /// Gene identifiers for the current organism
    GeneId,
    /// Disease database name
    DiseaseDb,
    /// Disease identifier
    DiseaseId,
    /// Disease description parts
    DiseaseDesc,
    /// Motif database name
    MotifDb,
    /// Motif identifier
    MotifId,
    /// Motif description text
    Motif,
    /// Structure database name
    StructureDb,
    /// Structure identifiers for the current database
    StructureId,
    /// Link target database name
    DbLinksDb,
    /// Link identifiers for the current database
    DbLinksId,
    /// Record terminator (`///`)
    RecordEnd,
}

/// Sink for tagged events, one callback per tag occurrence group.
///
/// Values arrive in source order with surrounding whitespace stripped.
pub trait TagSink {
    /// Receive one event: a tag and its ordered values.
    fn tag(&mut self, tag: Tag, values: Vec<String>) -> Result<()>;
}

/// The compiled-grammar capability the scanner drives.
///
/// Implementations feed the full event stream of one record into `sink`,
/// or fail with [`KeggError::MalformedRecord`] when the text does not
/// conform to the record grammar.
pub trait EnzymeMatcher {
    /// Scan one record's raw text, emitting events into `sink`.
    fn scan(&self, text: &str, sink: &mut dyn TagSink) -> Result<()>;
}

/// Field blocks of the flat file, keyed by the word in the tag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Entry,
    Name,
    Class,
    SysName,
    Reaction,
    Substrate,
    Product,
    Inhibitor,
    Cofactor,
    Effector,
    Comment,
    Pathway,
    Genes,
    Disease,
    Motif,
    Structures,
    DbLinks,
}

impl Field {
    fn from_word(word: &str) -> Option<Field> {
        Some(match word {
            "ENTRY" => Field::Entry,
            "NAME" => Field::Name,
            "CLASS" => Field::Class,
            "SYSNAME" => Field::SysName,
            "REACTION" => Field::Reaction,
            "SUBSTRATE" => Field::Substrate,
            "PRODUCT" => Field::Product,
            "INHIBITOR" => Field::Inhibitor,
            "COFACTOR" => Field::Cofactor,
            "EFFECTOR" => Field::Effector,
            "COMMENT" => Field::Comment,
            "PATHWAY" => Field::Pathway,
            "GENES" => Field::Genes,
            "DISEASE" => Field::Disease,
            "MOTIF" => Field::Motif,
            "STRUCTURES" => Field::Structures,
            "DBLINKS" => Field::DbLinks,
            _ => return None,
        })
    }

    /// Event tag for the plain value-list fields.
    fn value_tag(self) -> Option<Tag> {
        Some(match self {
            Field::Entry => Tag::Entry,
            Field::Name => Tag::Name,
            Field::Class => Tag::ClassName,
            Field::SysName => Tag::SysName,
            Field::Reaction => Tag::Reaction,
            Field::Substrate => Tag::Substrate,
            Field::Product => Tag::Product,
            Field::Inhibitor => Tag::Inhibitor,
            Field::Cofactor => Tag::Cofactor,
            Field::Effector => Tag::Effector,
            Field::Comment => Tag::Comment,
            _ => return None,
        })
    }
}

fn malformed(line: usize, msg: impl Into<String>) -> KeggError {
    KeggError::MalformedRecord { line, msg: msg.into() }
}

/// Coalesces consecutive same-tag values into single events.
struct Batcher<'a> {
    sink: &'a mut dyn TagSink,
    pending: Option<(Tag, Vec<String>)>,
}

impl<'a> Batcher<'a> {
    fn new(sink: &'a mut dyn TagSink) -> Self {
        Batcher { sink, pending: None }
    }

    fn push(&mut self, tag: Tag, value: String) -> Result<()> {
        if let Some((pending, values)) = &mut self.pending {
            if *pending == tag {
                values.push(value);
                return Ok(());
            }
        }
        self.flush()?;
        self.pending = Some((tag, vec![value]));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.pending.take() {
            Some((tag, values)) => self.sink.tag(tag, values),
            None => Ok(()),
        }
    }
}

/// Hand-written matcher for the enzyme record grammar.
///
/// Stateless once compiled; one instance parses any number of records.
///
/// # Example
///
/// ```
/// use kegg_enzyme::{EnzymeMatcher, LineGrammar, Result, Tag, TagSink};
///
/// struct Collect(Vec<(Tag, Vec<String>)>);
/// impl TagSink for Collect {
///     fn tag(&mut self, tag: Tag, values: Vec<String>) -> Result<()> {
///         self.0.push((tag, values));
///         Ok(())
///     }
/// }
///
/// let grammar = LineGrammar::compile();
/// let mut events = Collect(Vec::new());
/// grammar.scan("ENTRY       EC 1.1.1.1\n///\n", &mut events)?;
/// assert_eq!(events.0[0], (Tag::Entry, vec!["EC 1.1.1.1".to_string()]));
/// # Ok::<(), kegg_enzyme::KeggError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LineGrammar;

impl LineGrammar {
    /// Build the matcher. Cheap, but callers should still reuse one
    /// instance across records, as with any compiled grammar.
    pub fn compile() -> Self {
        LineGrammar
    }
}

impl EnzymeMatcher for LineGrammar {
    fn scan(&self, text: &str, sink: &mut dyn TagSink) -> Result<()> {
        let blocks = collect_blocks(text)?;
        match blocks.first() {
            Some(block) if block.field == Field::Entry => {}
            Some(block) => {
                return Err(malformed(block.start, "record does not start with ENTRY"));
            }
            None => return Err(malformed(0, "record has no fields")),
        }

        let mut batch = Batcher::new(sink);
        for block in &blocks {
            emit_block(block, &mut batch)?;
        }
        batch.flush()?;
        sink.tag(Tag::RecordEnd, vec!["///".to_string()])
    }
}

/// One tagged field block: the tag line plus its continuation lines.
struct Block<'t> {
    field: Field,
    /// Line number of the tag line
    start: usize,
    /// Data column content of each line, with line numbers
    lines: Vec<(usize, &'t str)>,
}

fn collect_blocks(text: &str) -> Result<Vec<Block<'_>>> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut terminated = false;
    for (i, line) in text.lines().enumerate() {
        let n = i + 1;
        if terminated {
            if !line.trim().is_empty() {
                return Err(malformed(n, "content after record terminator"));
            }
            continue;
        }
        if line == "///" {
            terminated = true;
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let data = line.get(TAG_WIDTH..).unwrap_or("");
        if line.starts_with(|c: char| c.is_whitespace()) {
            let block = blocks
                .last_mut()
                .ok_or_else(|| malformed(n, "continuation line before any field"))?;
            block.lines.push((n, data));
        } else {
            let word = line.split_whitespace().next().unwrap_or("");
            let field = Field::from_word(word)
                .ok_or_else(|| malformed(n, format!("unknown field tag {word:?}")))?;
            let pad = &line[word.len()..TAG_WIDTH.min(line.len())];
            if !pad.trim().is_empty() {
                return Err(malformed(n, "field data starts before the data column"));
            }
            blocks.push(Block { field, start: n, lines: vec![(n, data)] });
        }
    }
    if !terminated {
        return Err(malformed(
            text.lines().count(),
            "record not terminated by ///",
        ));
    }
    Ok(blocks)
}

fn emit_block(block: &Block, batch: &mut Batcher) -> Result<()> {
    match block.field {
        Field::Pathway => emit_triples(block, batch, Tag::PathwayDb, Tag::PathwayId, Tag::PathwayDesc),
        Field::Disease => emit_triples(block, batch, Tag::DiseaseDb, Tag::DiseaseId, Tag::DiseaseDesc),
        Field::Motif => emit_motifs(block, batch),
        Field::Genes => emit_id_lists(block, batch, Tag::Organism, Tag::GeneId),
        Field::Structures => emit_id_lists(block, batch, Tag::StructureDb, Tag::StructureId),
        Field::DbLinks => emit_dblinks(block, batch),
        _ => {
            // Plain value-list field: a `$`-marked line continues the
            // previous value, anything else starts a new one.
            let tag = block.field.value_tag().expect("grouped fields handled above");
            let mut values: Vec<String> = Vec::new();
            for &(_, data) in &block.lines {
                let trimmed = data.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match values.last_mut() {
                    Some(value) if trimmed.starts_with('$') => {
                        value.push('\n');
                        value.push_str(data);
                    }
                    _ => values.push(data.to_string()),
                }
            }
            for value in values {
                batch.push(tag, value.trim().to_string())?;
            }
            Ok(())
        }
    }
}

/// Split `db: rest` at the first colon.
fn split_db(data: &str, n: usize) -> Result<(&str, &str)> {
    let (db, rest) = data
        .split_once(':')
        .ok_or_else(|| malformed(n, "expected `db: value` layout"))?;
    Ok((db.trim(), rest.trim_start()))
}

/// Split `id  description` at the first space. The canonical separator is
/// a double space, but identifiers never contain spaces, so the first one
/// always ends the id; trimming absorbs the rest of the separator.
fn split_id(rest: &str) -> (&str, &str) {
    match rest.find(' ') {
        Some(idx) => (rest[..idx].trim_end(), rest[idx..].trim()),
        None => (rest.trim(), ""),
    }
}

/// PATHWAY and DISEASE blocks: `db: id  description` per entry, with the
/// description possibly continued on indented lines.
fn emit_triples(block: &Block, batch: &mut Batcher, db: Tag, id: Tag, desc: Tag) -> Result<()> {
    for &(n, data) in &block.lines {
        if data.trim().is_empty() {
            continue;
        }
        if data.starts_with(|c: char| c.is_whitespace()) {
            batch.push(desc, data.trim().to_string())?;
        } else {
            let (db_name, rest) = split_db(data, n)?;
            let (id_value, desc_value) = split_id(rest);
            batch.push(db, db_name.to_string())?;
            batch.push(id, id_value.to_string())?;
            if !desc_value.is_empty() {
                batch.push(desc, desc_value.to_string())?;
            }
        }
    }
    Ok(())
}

/// MOTIF blocks: like PATHWAY, but continuation lines extend the motif
/// text of the current entry rather than forming separate description
/// parts, so the consumer can unwrap it as one value.
fn emit_motifs(block: &Block, batch: &mut Batcher) -> Result<()> {
    let mut current: Option<(String, String, String)> = None;
    for &(n, data) in &block.lines {
        if data.trim().is_empty() {
            continue;
        }
        if data.starts_with(|c: char| c.is_whitespace()) {
            let (_, _, motif) = current
                .as_mut()
                .ok_or_else(|| malformed(n, "motif continuation before any motif"))?;
            motif.push('\n');
            motif.push_str(data.trim());
        } else {
            if let Some(entry) = current.take() {
                push_motif(batch, entry)?;
            }
            let (db_name, rest) = split_db(data, n)?;
            let (id_value, motif_value) = split_id(rest);
            current = Some((db_name.to_string(), id_value.to_string(), motif_value.to_string()));
        }
    }
    if let Some(entry) = current.take() {
        push_motif(batch, entry)?;
    }
    Ok(())
}

fn push_motif(batch: &mut Batcher, (db, id, motif): (String, String, String)) -> Result<()> {
    batch.push(Tag::MotifDb, db)?;
    batch.push(Tag::MotifId, id)?;
    batch.push(Tag::Motif, motif.trim().to_string())
}

/// GENES and STRUCTURES blocks: `name: id id id` per entry, identifiers
/// continuing on indented lines.
fn emit_id_lists(block: &Block, batch: &mut Batcher, head: Tag, id: Tag) -> Result<()> {
    for &(n, data) in &block.lines {
        if data.trim().is_empty() {
            continue;
        }
        let ids = if data.starts_with(|c: char| c.is_whitespace()) {
            data
        } else {
            let (name, rest) = split_db(data, n)?;
            batch.push(head, name.to_string())?;
            rest
        };
        for token in ids.split_whitespace() {
            batch.push(id, token.to_string())?;
        }
    }
    Ok(())
}

/// DBLINKS blocks: `db: id` per line; the database name may itself contain
/// spaces and hyphens, so the split is at the last colon.
fn emit_dblinks(block: &Block, batch: &mut Batcher) -> Result<()> {
    for &(n, data) in &block.lines {
        if data.trim().is_empty() {
            continue;
        }
        if data.starts_with(|c: char| c.is_whitespace()) {
            for token in data.split_whitespace() {
                batch.push(Tag::DbLinksId, token.to_string())?;
            }
            continue;
        }
        let idx = data
            .rfind(':')
            .ok_or_else(|| malformed(n, "expected `db: id` layout"))?;
        batch.push(Tag::DbLinksDb, data[..idx].trim().to_string())?;
        for token in data[idx + 1..].split_whitespace() {
            batch.push(Tag::DbLinksId, token.to_string())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collect(Vec<(Tag, Vec<String>)>);

    impl TagSink for Collect {
        fn tag(&mut self, tag: Tag, values: Vec<String>) -> Result<()> {
            self.0.push((tag, values));
            Ok(())
        }
    }

    fn scan(text: &str) -> Result<Vec<(Tag, Vec<String>)>> {
        let mut events = Collect(Vec::new());
        LineGrammar::compile().scan(text, &mut events)?;
        Ok(events.0)
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_entry_and_names() {
        let text = concat!(
            "ENTRY       EC 1.1.1.1\n",
            "NAME        Alcohol dehydrogenase\n",
            "            Aldehyde reductase\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(events[0], (Tag::Entry, owned(&["EC 1.1.1.1"])));
        assert_eq!(
            events[1],
            (Tag::Name, owned(&["Alcohol dehydrogenase", "Aldehyde reductase"]))
        );
        assert_eq!(events[2], (Tag::RecordEnd, owned(&["///"])));
    }

    #[test]
    fn test_wrapped_name_is_one_value() {
        let text = concat!(
            "ENTRY       EC 1.1.1.100\n",
            "NAME        3-oxoacyl-[acyl-\n",
            "            $carrier-protein] reductase\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(
            events[1],
            (Tag::Name, owned(&["3-oxoacyl-[acyl-\n$carrier-protein] reductase"]))
        );
    }

    #[test]
    fn test_pathway_sub_events_in_order() {
        let text = concat!(
            "ENTRY       EC 1.1.1.1\n",
            "PATHWAY     PATH: MAP00010  Glycolysis / Gluconeogenesis\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(events[1], (Tag::PathwayDb, owned(&["PATH"])));
        assert_eq!(events[2], (Tag::PathwayId, owned(&["MAP00010"])));
        assert_eq!(events[3], (Tag::PathwayDesc, owned(&["Glycolysis / Gluconeogenesis"])));
    }

    #[test]
    fn test_pathway_description_continuation_batches() {
        let text = concat!(
            "ENTRY       EC 1.1.1.1\n",
            "PATHWAY     PATH: MAP00010  Glycolysis /\n",
            "                            Gluconeogenesis\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(events[3], (Tag::PathwayDesc, owned(&["Glycolysis /", "Gluconeogenesis"])));
    }

    #[test]
    fn test_genes_group_per_organism() {
        let text = concat!(
            "ENTRY       EC 1.1.1.1\n",
            "GENES       HSA: 124(ADH1A) 125(ADH1B)\n",
            "                 126(ADH1C)\n",
            "            MMU: 11522(Adh1)\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(events[1], (Tag::Organism, owned(&["HSA"])));
        assert_eq!(
            events[2],
            (Tag::GeneId, owned(&["124(ADH1A)", "125(ADH1B)", "126(ADH1C)"]))
        );
        assert_eq!(events[3], (Tag::Organism, owned(&["MMU"])));
        assert_eq!(events[4], (Tag::GeneId, owned(&["11522(Adh1)"])));
    }

    #[test]
    fn test_structures_batch_ids_across_lines() {
        let text = concat!(
            "ENTRY       EC 1.1.1.1\n",
            "STRUCTURES  PDB: 1A4U  1A71  1A72\n",
            "                 1ADB  1ADC\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(events[1], (Tag::StructureDb, owned(&["PDB"])));
        assert_eq!(
            events[2],
            (Tag::StructureId, owned(&["1A4U", "1A71", "1A72", "1ADB", "1ADC"]))
        );
    }

    #[test]
    fn test_dblinks_split_at_last_colon() {
        let text = concat!(
            "ENTRY       EC 1.1.1.1\n",
            "DBLINKS     ExPASy - ENZYME nomenclature database: 1.1.1.1\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(events[1], (Tag::DbLinksDb, owned(&["ExPASy - ENZYME nomenclature database"])));
        assert_eq!(events[2], (Tag::DbLinksId, owned(&["1.1.1.1"])));
    }

    #[test]
    fn test_motif_continuation_extends_text() {
        let text = concat!(
            "ENTRY       EC 1.1.1.1\n",
            "MOTIF       PS: PS00059  Zinc-containing alcohol-\n",
            "                 dehydrogenases\n",
            "///\n",
        );
        let events = scan(text).unwrap();
        assert_eq!(events[1], (Tag::MotifDb, owned(&["PS"])));
        assert_eq!(events[2], (Tag::MotifId, owned(&["PS00059"])));
        assert_eq!(
            events[3],
            (Tag::Motif, owned(&["Zinc-containing alcohol-\ndehydrogenases"]))
        );
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let err = scan("ENTRY       EC 1.1.1.1\nBOGUS       x\n///\n").unwrap_err();
        assert!(matches!(err, KeggError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_record_must_start_with_entry() {
        let err = scan("NAME        Alcohol dehydrogenase\n///\n").unwrap_err();
        assert!(matches!(err, KeggError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_missing_terminator_is_malformed() {
        let err = scan("ENTRY       EC 1.1.1.1\n").unwrap_err();
        assert!(matches!(err, KeggError::MalformedRecord { .. }));
    }

    #[test]
    fn test_continuation_before_field_is_malformed() {
        let err = scan("            stray\n///\n").unwrap_err();
        assert!(matches!(err, KeggError::MalformedRecord { line: 1, .. }));
    }
}
