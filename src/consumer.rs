//! Record consumer: assembles tagged events into a [`Record`].
//!
//! Scalar tags assign straight into the record; grouped tags (pathway,
//! disease, motif, genes, structures, dblinks) buffer their sub-events in a
//! small per-group state machine and flush one complete tuple on the final
//! sub-event. A partial group never reaches the record: whatever is still
//! buffered when `RecordEnd` fires surfaces as
//! [`KeggError::IncompleteGroup`].

use crate::error::{KeggError, Result};
use crate::record::{DbLink, DiseaseRef, GeneLink, MotifRef, PathwayRef, Record, StructureRef};
use crate::scanner::{Tag, TagSink};
use crate::wrap::unwrap;

/// Buffer for a three-part group: db, then id, then the closing text.
#[derive(Debug, Default)]
enum TripleBuf {
    #[default]
    Empty,
    Db(String),
    DbId(String, String),
}

impl TripleBuf {
    fn db(&mut self, field: &'static str, value: String) -> Result<()> {
        match std::mem::take(self) {
            TripleBuf::Empty => {
                *self = TripleBuf::Db(value);
                Ok(())
            }
            _ => Err(incomplete(field, "db event while a group was still open")),
        }
    }

    fn id(&mut self, field: &'static str, value: String) -> Result<()> {
        match std::mem::take(self) {
            TripleBuf::Db(db) => {
                *self = TripleBuf::DbId(db, value);
                Ok(())
            }
            _ => Err(incomplete(field, "id event without a preceding db")),
        }
    }

    fn close(&mut self, field: &'static str, value: String) -> Result<(String, String, String)> {
        match std::mem::take(self) {
            TripleBuf::DbId(db, id) => Ok((db, id, value)),
            _ => Err(incomplete(field, "closing event without db and id")),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, TripleBuf::Empty)
    }
}

/// Buffer for a two-part group: a name, then its identifier list.
#[derive(Debug, Default)]
enum PairBuf {
    #[default]
    Empty,
    Head(String),
}

impl PairBuf {
    fn head(&mut self, field: &'static str, value: String) -> Result<()> {
        match std::mem::take(self) {
            PairBuf::Empty => {
                *self = PairBuf::Head(value);
                Ok(())
            }
            PairBuf::Head(_) => Err(incomplete(field, "name event while a group was still open")),
        }
    }

    fn close(&mut self, field: &'static str, ids: Vec<String>) -> Result<(String, Vec<String>)> {
        match std::mem::take(self) {
            PairBuf::Head(head) => Ok((head, ids)),
            PairBuf::Empty => Err(incomplete(field, "id list without a preceding name")),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, PairBuf::Empty)
    }
}

fn incomplete(field: &'static str, msg: &str) -> KeggError {
    KeggError::IncompleteGroup { field, msg: msg.to_string() }
}

/// Stateful sink that builds one [`Record`] from scanner events.
///
/// Create a fresh consumer per record, feed it through a matcher, then call
/// [`RecordConsumer::finish`].
#[derive(Debug, Default)]
pub struct RecordConsumer {
    record: Record,
    pathway: TripleBuf,
    disease: TripleBuf,
    motif: TripleBuf,
    genes: PairBuf,
    structures: PairBuf,
    dblinks: PairBuf,
    saw_entry: bool,
    saw_end: bool,
}

impl RecordConsumer {
    /// Create a consumer with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish the record, verifying that parsing actually completed.
    pub fn finish(self) -> Result<Record> {
        if !self.saw_entry {
            return Err(KeggError::MalformedRecord {
                line: 0,
                msg: "record has no ENTRY field".to_string(),
            });
        }
        if !self.saw_end {
            return Err(KeggError::MalformedRecord {
                line: 0,
                msg: "record not terminated by ///".to_string(),
            });
        }
        Ok(self.record)
    }

    fn check_groups_closed(&self) -> Result<()> {
        let open = [
            ("pathway", self.pathway.is_empty()),
            ("disease", self.disease.is_empty()),
            ("motif", self.motif.is_empty()),
            ("genes", self.genes.is_empty()),
            ("structures", self.structures.is_empty()),
            ("dblinks", self.dblinks.is_empty()),
        ];
        for (field, empty) in open {
            if !empty {
                return Err(incomplete(field, "group still open at record end"));
            }
        }
        Ok(())
    }
}

fn single(tag: Tag, mut values: Vec<String>) -> Result<String> {
    if values.len() != 1 {
        return Err(KeggError::MalformedRecord {
            line: 0,
            msg: format!("{tag:?} event carries {} values, expected 1", values.len()),
        });
    }
    Ok(values.remove(0))
}

fn unwrap_each(values: Vec<String>) -> Vec<String> {
    values.iter().map(|v| unwrap(v, false)).collect()
}

impl TagSink for RecordConsumer {
    fn tag(&mut self, tag: Tag, values: Vec<String>) -> Result<()> {
        match tag {
            Tag::Entry => {
                let value = single(tag, values)?;
                let entry = value.strip_prefix("EC ").ok_or_else(|| {
                    KeggError::MalformedRecord {
                        line: 0,
                        msg: format!("ENTRY value {value:?} lacks the EC prefix"),
                    }
                })?;
                self.record.entry = entry.to_string();
                self.saw_entry = true;
            }
            Tag::Name => self.record.name = unwrap_each(values),
            Tag::ClassName => self.record.classname = values,
            Tag::SysName => self.record.sysname = unwrap_each(values),
            Tag::Reaction => self.record.reaction = values,
            Tag::Substrate => self.record.substrate = unwrap_each(values),
            Tag::Product => self.record.product = unwrap_each(values),
            Tag::Inhibitor => self.record.inhibitor = unwrap_each(values),
            Tag::Cofactor => self.record.cofactor = unwrap_each(values),
            Tag::Effector => self.record.effector = unwrap_each(values),
            Tag::Comment => self.record.comment = values,

            Tag::PathwayDb => self.pathway.db("pathway", single(tag, values)?)?,
            Tag::PathwayId => self.pathway.id("pathway", single(tag, values)?)?,
            Tag::PathwayDesc => {
                let (db, id, description) = self.pathway.close("pathway", values.join(" "))?;
                self.record.pathway.push(PathwayRef { db, id, description });
            }

            Tag::Organism => self.genes.head("genes", single(tag, values)?)?,
            Tag::GeneId => {
                let (organism, genes) = self.genes.close("genes", values)?;
                self.record.genes.push(GeneLink { organism, genes });
            }

            Tag::DiseaseDb => self.disease.db("disease", single(tag, values)?)?,
            Tag::DiseaseId => self.disease.id("disease", single(tag, values)?)?,
            Tag::DiseaseDesc => {
                let (db, id, description) = self.disease.close("disease", values.join(" "))?;
                self.record.disease.push(DiseaseRef { db, id, description });
            }

            Tag::MotifDb => self.motif.db("motif", single(tag, values)?)?,
            Tag::MotifId => self.motif.id("motif", single(tag, values)?)?,
            Tag::Motif => {
                let text = unwrap(&single(tag, values)?, false);
                let (db, id, motif) = self.motif.close("motif", text)?;
                self.record.motif.push(MotifRef { db, id, motif });
            }

            Tag::StructureDb => self.structures.head("structures", single(tag, values)?)?,
            Tag::StructureId => {
                let (db, ids) = self.structures.close("structures", values)?;
                self.record.structures.push(StructureRef { db, ids });
            }

            Tag::DbLinksDb => self.dblinks.head("dblinks", single(tag, values)?)?,
            Tag::DbLinksId => {
                let (db, ids) = self.dblinks.close("dblinks", values)?;
                self.record.dblinks.push(DbLink { db, ids });
            }

            Tag::RecordEnd => {
                self.check_groups_closed()?;
                self.saw_end = true;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(consumer: &mut RecordConsumer, tag: Tag, values: &[&str]) -> Result<()> {
        consumer.tag(tag, values.iter().map(|v| v.to_string()).collect())
    }

    fn entry(consumer: &mut RecordConsumer) {
        feed(consumer, Tag::Entry, &["EC 1.1.1.1"]).unwrap();
    }

    #[test]
    fn test_entry_strips_prefix() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        feed(&mut consumer, Tag::RecordEnd, &["///"]).unwrap();
        let record = consumer.finish().unwrap();
        assert_eq!(record.entry, "1.1.1.1");
    }

    #[test]
    fn test_entry_without_prefix_is_malformed() {
        let mut consumer = RecordConsumer::new();
        let err = feed(&mut consumer, Tag::Entry, &["1.1.1.1"]).unwrap_err();
        assert!(matches!(err, KeggError::MalformedRecord { .. }));
    }

    #[test]
    fn test_pathway_group_is_atomic() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        feed(&mut consumer, Tag::PathwayDb, &["map00010"]).unwrap();
        assert!(consumer.record.pathway.is_empty());
        feed(&mut consumer, Tag::PathwayId, &["Glycolysis"]).unwrap();
        assert!(consumer.record.pathway.is_empty());
        feed(&mut consumer, Tag::PathwayDesc, &["Glycolysis / Gluconeogenesis"]).unwrap();
        assert_eq!(
            consumer.record.pathway,
            vec![PathwayRef {
                db: "map00010".to_string(),
                id: "Glycolysis".to_string(),
                description: "Glycolysis / Gluconeogenesis".to_string(),
            }]
        );
    }

    #[test]
    fn test_pathway_desc_parts_join_with_space() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        feed(&mut consumer, Tag::PathwayDb, &["PATH"]).unwrap();
        feed(&mut consumer, Tag::PathwayId, &["MAP00071"]).unwrap();
        feed(&mut consumer, Tag::PathwayDesc, &["Fatty acid", "metabolism"]).unwrap();
        assert_eq!(consumer.record.pathway[0].description, "Fatty acid metabolism");
    }

    #[test]
    fn test_gene_group_flushes_on_id_list() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        feed(&mut consumer, Tag::Organism, &["HSA"]).unwrap();
        assert!(consumer.record.genes.is_empty());
        feed(&mut consumer, Tag::GeneId, &["124(ADH1A)", "125(ADH1B)"]).unwrap();
        assert_eq!(
            consumer.record.genes,
            vec![GeneLink {
                organism: "HSA".to_string(),
                genes: vec!["124(ADH1A)".to_string(), "125(ADH1B)".to_string()],
            }]
        );
    }

    #[test]
    fn test_open_group_at_record_end_is_incomplete() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        feed(&mut consumer, Tag::DiseaseDb, &["MIM"]).unwrap();
        feed(&mut consumer, Tag::DiseaseId, &["103700"]).unwrap();
        let err = feed(&mut consumer, Tag::RecordEnd, &["///"]).unwrap_err();
        assert!(matches!(err, KeggError::IncompleteGroup { field: "disease", .. }));
    }

    #[test]
    fn test_out_of_order_sub_event_is_incomplete() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        let err = feed(&mut consumer, Tag::PathwayId, &["MAP00010"]).unwrap_err();
        assert!(matches!(err, KeggError::IncompleteGroup { field: "pathway", .. }));
    }

    #[test]
    fn test_names_are_unwrapped() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        feed(
            &mut consumer,
            Tag::Name,
            &["3-oxoacyl-[acyl-\n$carrier-protein] reductase", "Short name"],
        )
        .unwrap();
        assert_eq!(
            consumer.record.name,
            vec!["3-oxoacyl-[acyl-carrier-protein] reductase", "Short name"]
        );
    }

    #[test]
    fn test_reaction_kept_verbatim() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        feed(&mut consumer, Tag::Reaction, &["Alcohol + NAD+ = Aldehyde + NADH"]).unwrap();
        assert_eq!(consumer.record.reaction, vec!["Alcohol + NAD+ = Aldehyde + NADH"]);
    }

    #[test]
    fn test_finish_requires_entry() {
        let mut consumer = RecordConsumer::new();
        feed(&mut consumer, Tag::RecordEnd, &["///"]).unwrap();
        let err = consumer.finish().unwrap_err();
        assert!(matches!(err, KeggError::MalformedRecord { .. }));
    }

    #[test]
    fn test_finish_requires_terminator() {
        let mut consumer = RecordConsumer::new();
        entry(&mut consumer);
        let err = consumer.finish().unwrap_err();
        assert!(matches!(err, KeggError::MalformedRecord { .. }));
    }
}
