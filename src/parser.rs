//! Parser: pairs a compiled grammar matcher with a record consumer.

use crate::consumer::RecordConsumer;
use crate::error::Result;
use crate::record::Record;
use crate::scanner::{EnzymeMatcher, LineGrammar};

/// Parses KEGG Enzyme record text into [`Record`] values.
///
/// The grammar matcher is built once at construction and reused across
/// `parse` calls; a fresh consumer is wired up per record.
///
/// # Example
///
/// ```
/// use kegg_enzyme::Parser;
///
/// let parser = Parser::new();
/// let record = parser.parse("ENTRY       EC 2.7.1.1\n///\n")?;
/// assert_eq!(record.entry, "2.7.1.1");
/// # Ok::<(), kegg_enzyme::KeggError>(())
/// ```
#[derive(Debug)]
pub struct Parser<M: EnzymeMatcher = LineGrammar> {
    matcher: M,
}

impl Parser<LineGrammar> {
    /// Create a parser backed by the built-in line grammar
    pub fn new() -> Self {
        Parser { matcher: LineGrammar::compile() }
    }
}

impl Default for Parser<LineGrammar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EnzymeMatcher> Parser<M> {
    /// Create a parser backed by a custom grammar matcher
    pub fn with_matcher(matcher: M) -> Self {
        Parser { matcher }
    }

    /// Parse one record's raw text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeggError::MalformedRecord`] when the text does not
    /// conform to the record grammar, or
    /// [`crate::KeggError::IncompleteGroup`] when a grouped field was left
    /// unfinished at the record terminator.
    pub fn parse(&self, text: &str) -> Result<Record> {
        let mut consumer = RecordConsumer::new();
        self.matcher.scan(text, &mut consumer)?;
        consumer.finish()
    }
}
