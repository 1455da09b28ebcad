//! kegg-enzyme: parser and writer for the KEGG Enzyme flat-file format
//!
//! # Overview
//!
//! The KEGG Enzyme database distributes enzyme annotations (EC numbers,
//! reactions, pathways, gene cross-references, disease and structure links)
//! as a tagged flat-file format. This crate parses those records into
//! structured [`Record`] values and serializes them back to the exact
//! canonical text layout, so downstream tooling never touches the text
//! grammar itself.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kegg_enzyme::EnzymeReader;
//!
//! # fn main() -> kegg_enzyme::Result<()> {
//! // Stream records from the gzipped flat file as distributed by KEGG
//! let reader = EnzymeReader::from_gzip_path("enzyme.gz")?;
//!
//! for record in reader {
//!     let record = record?;
//!     println!("EC {}: {}", record.entry, record.name.join(", "));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`record`]: the [`Record`] value type and its grouped-entry structs
//! - [`scanner`]: grammar-driven scanner emitting tagged events
//! - [`consumer`]: event sink assembling a [`Record`] per record
//! - [`parser`]: scanner + consumer pairing for single-record text
//! - [`reader`]: iteration over `///`-delimited multi-record streams
//! - [`writer`]: canonical text output, streaming or per record
//! - [`wrap`]: column-aware field wrapping shared by reader and writer

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod consumer;
pub mod error;
pub mod parser;
pub mod reader;
pub mod record;
pub mod scanner;
pub mod wrap;
pub mod writer;

// Re-export commonly used types
pub use consumer::RecordConsumer;
pub use error::{KeggError, Result};
pub use parser::Parser;
pub use reader::{EnzymeReader, RecordSplitter};
pub use record::{DbLink, DiseaseRef, GeneLink, MotifRef, PathwayRef, Record, StructureRef};
pub use scanner::{EnzymeMatcher, LineGrammar, Tag, TagSink};
pub use writer::EnzymeWriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
