//! In-memory representation of a KEGG Enzyme entry.

/// A pathway cross-reference, e.g. `PATH: MAP00010  Glycolysis`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathwayRef {
    /// Pathway database name (e.g. `PATH`)
    pub db: String,
    /// Pathway identifier (e.g. `MAP00010`)
    pub id: String,
    /// Pathway description
    pub description: String,
}

/// A disease cross-reference, e.g. `MIM: 103700  Alcohol intolerance`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiseaseRef {
    /// Disease database name (e.g. `MIM`)
    pub db: String,
    /// Disease identifier
    pub id: String,
    /// Disease description
    pub description: String,
}

/// A sequence motif cross-reference, e.g. `PS: PS00059  Zinc-containing...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotifRef {
    /// Motif database name (e.g. `PS`)
    pub db: String,
    /// Motif identifier
    pub id: String,
    /// Motif description, unwrapped to a single logical line
    pub motif: String,
}

/// Gene identifiers for one organism, e.g. `HSA: 124(ADH1) 125(ADH2)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneLink {
    /// Organism code (e.g. `HSA`)
    pub organism: String,
    /// Gene identifiers for that organism
    pub genes: Vec<String>,
}

/// Structure identifiers in one database, e.g. `PDB: 1A4U  1ADB`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureRef {
    /// Structure database name (e.g. `PDB`)
    pub db: String,
    /// Structure identifiers
    pub ids: Vec<String>,
}

/// A link into another database, e.g. `IUBMB Enzyme Nomenclature: 1.1.1.1`.
///
/// The identifier list mirrors the flat-file data model, but enzyme entries
/// carry a single identifier per database and the writer serializes only the
/// first one. Extra identifiers survive parsing and comparison, not writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbLink {
    /// Target database name
    pub db: String,
    /// Identifiers in the target database; only `ids[0]` is written back
    pub ids: Vec<String>,
}

/// One parsed KEGG Enzyme entry.
///
/// A `Record` is a plain value: the parser fills it in, the writer reads it
/// back out, and nothing in this crate mutates it after parsing completes.
/// Field order below is the canonical block order of the flat file.
///
/// # Example
///
/// ```
/// use kegg_enzyme::{Parser, Record};
///
/// let text = "\
/// ENTRY       EC 1.1.1.1
/// NAME        Alcohol dehydrogenase
/// ///
/// ";
/// let record: Record = Parser::new().parse(text)?;
/// assert_eq!(record.entry, "1.1.1.1");
/// assert_eq!(record.name, vec!["Alcohol dehydrogenase"]);
/// # Ok::<(), kegg_enzyme::KeggError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// EC number, without the `EC ` prefix
    pub entry: String,
    /// Enzyme names
    pub name: Vec<String>,
    /// Classification terms
    pub classname: Vec<String>,
    /// Systematic name
    pub sysname: Vec<String>,
    /// Reaction descriptions, kept verbatim including wrap markers
    pub reaction: Vec<String>,
    /// Substrates
    pub substrate: Vec<String>,
    /// Products
    pub product: Vec<String>,
    /// Inhibitors
    pub inhibitor: Vec<String>,
    /// Cofactors
    pub cofactor: Vec<String>,
    /// Effectors
    pub effector: Vec<String>,
    /// Comment lines
    pub comment: Vec<String>,
    /// Pathway cross-references
    pub pathway: Vec<PathwayRef>,
    /// Gene identifiers grouped by organism
    pub genes: Vec<GeneLink>,
    /// Disease cross-references
    pub disease: Vec<DiseaseRef>,
    /// Motif cross-references
    pub motif: Vec<MotifRef>,
    /// Structure identifiers grouped by database
    pub structures: Vec<StructureRef>,
    /// Links into other databases
    pub dblinks: Vec<DbLink>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }
}
