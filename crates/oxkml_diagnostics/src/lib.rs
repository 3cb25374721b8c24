//! Errors and warnings produced while reading KML documents.
//!
//! Each diagnostic carries the span of the offending input and a line/column [`Location`].
//! Use [`ParseError::into_report`] to render it with the source through `miette`.
use std::fmt::Display;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// A position in the source document
pub struct Location {
    /// The byte offset from the start of the document
    pub offset: usize,
    /// The 1-based line, or `0` when the source isn't known
    pub line: usize,
    /// The 1-based column, counted in characters
    pub column: usize,
}

impl Location {
    /// Creates a location for an offset without knowing the source it points into.
    pub fn from_offset(offset: usize) -> Self {
        Self {
            offset,
            line: 0,
            column: 0,
        }
    }

    /// Creates a location for an offset into the given source.
    pub fn new(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.as_bytes().get(..offset).unwrap_or_default();
        let line = bytecount::count(before, b'\n') + 1;
        let line_start = before
            .iter()
            .rposition(|byte| *byte == b'\n')
            .map_or(0, |newline| newline + 1);
        let column = source
            .get(line_start..offset)
            .map_or(offset - line_start, |text| text.chars().count())
            + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "byte {}", self.offset)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
/// An error that stops a document from being read.
///
/// No part of the document is available after one of these is returned.
pub enum ParseError {
    /// The input isn't well-formed XML, including unknown entity references
    #[error("malformed XML at {location}: {message}")]
    #[diagnostic(code(oxkml::malformed))]
    Malformed {
        /// A description from the tokenizer
        message: String,
        /// Where the problem was found
        location: Location,
        /// The span of the problem
        #[label("{message}")]
        span: SourceSpan,
    },
    /// The input ended before every element was closed
    #[error("document ended at {location} while `<{name}>` was still open")]
    #[diagnostic(code(oxkml::incomplete), help("the document may have been truncated"))]
    Incomplete {
        /// The innermost element left open
        name: String,
        /// Where the document ended
        location: Location,
        /// The start tag of the element left open
        #[label("opened here")]
        span: SourceSpan,
    },
    /// The input has no root element
    #[error("document has no root element")]
    #[diagnostic(code(oxkml::empty))]
    Empty,
    /// The root element isn't a recognised element
    #[error("`<{name}>` at {location} is not a recognised root element")]
    #[diagnostic(code(oxkml::unknown_root))]
    UnknownRoot {
        /// The name of the root element
        name: String,
        /// Where the root element starts
        location: Location,
        /// The span of the root element's start tag
        #[label("unknown element")]
        span: SourceSpan,
    },
    /// Two objects in the document share an identifier
    #[error("duplicate id \"{id}\" at {location}")]
    #[diagnostic(
        code(oxkml::duplicate_id),
        help("every `id` within a document must be unique")
    )]
    DuplicateId {
        /// The repeated identifier
        id: String,
        /// Where the second declaration is
        location: Location,
        /// The span of the second declaration
        #[label("declared again here")]
        span: SourceSpan,
        /// The span of the first declaration, when it's known
        #[label("first declared here")]
        first: Option<SourceSpan>,
    },
    /// Two objects in a tree built by hand share an identifier.
    ///
    /// The tree has no source, so there's no location to report.
    #[error("duplicate id \"{id}\" within the tree")]
    #[diagnostic(
        code(oxkml::duplicate_id),
        help("every `id` within a document must be unique")
    )]
    DuplicateIdInTree {
        /// The repeated identifier
        id: String,
    },
    /// A recognised element was found where its parent doesn't permit it
    #[error("`<{child}>` at {location} is not permitted within `<{parent}>`")]
    #[diagnostic(code(oxkml::schema_violation))]
    SchemaViolation {
        /// The name of the parent element
        parent: String,
        /// The name of the child element
        child: String,
        /// Where the child starts
        location: Location,
        /// The span of the child's start tag
        #[label("not permitted here")]
        span: SourceSpan,
    },
    /// Elements are nested deeper than permitted
    #[error("elements are nested deeper than {limit} at {location}")]
    #[diagnostic(code(oxkml::nesting_too_deep))]
    NestingTooDeep {
        /// The deepest nesting permitted
        limit: usize,
        /// Where the limit was exceeded
        location: Location,
        /// The span of the start tag exceeding the limit
        #[label("too deep")]
        span: SourceSpan,
    },
    /// An observer stopped the parse
    #[error("the parse was stopped at {location}")]
    #[diagnostic(code(oxkml::stopped))]
    Stopped {
        /// Where the parse was stopped
        location: Location,
        /// The span of the element being read when the parse was stopped
        #[label("stopped here")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Creates a malformed input error at the given offset
    pub fn malformed(message: impl Into<String>, offset: usize) -> Self {
        Self::Malformed {
            message: message.into(),
            location: Location::from_offset(offset),
            span: offset.into(),
        }
    }

    /// Returns the span of the offending input
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Self::Malformed { span, .. }
            | Self::Incomplete { span, .. }
            | Self::UnknownRoot { span, .. }
            | Self::DuplicateId { span, .. }
            | Self::SchemaViolation { span, .. }
            | Self::NestingTooDeep { span, .. }
            | Self::Stopped { span, .. } => Some(*span),
            Self::Empty | Self::DuplicateIdInTree { .. } => None,
        }
    }

    /// Returns the location of the offending input
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Malformed { location, .. }
            | Self::Incomplete { location, .. }
            | Self::UnknownRoot { location, .. }
            | Self::DuplicateId { location, .. }
            | Self::SchemaViolation { location, .. }
            | Self::NestingTooDeep { location, .. }
            | Self::Stopped { location, .. } => Some(*location),
            Self::Empty | Self::DuplicateIdInTree { .. } => None,
        }
    }

    /// Returns the error with its location resolved to a line and column of `source`
    #[must_use]
    pub fn located(mut self, source: &str) -> Self {
        match &mut self {
            Self::Malformed { location, .. }
            | Self::Incomplete { location, .. }
            | Self::UnknownRoot { location, .. }
            | Self::DuplicateId { location, .. }
            | Self::SchemaViolation { location, .. }
            | Self::NestingTooDeep { location, .. }
            | Self::Stopped { location, .. } => *location = Location::new(source, location.offset),
            Self::Empty | Self::DuplicateIdInTree { .. } => {}
        }
        self
    }

    /// Converts the error into a report that renders the offending source
    pub fn into_report(self, name: &str, source: &str) -> Report {
        Report::new(self).with_source_code(NamedSource::new(name, source.to_string()))
    }
}

impl From<(quick_xml::Error, usize)> for ParseError {
    /// Convert from a pair of quick-xml error and the position it occured
    fn from(value: (quick_xml::Error, usize)) -> Self {
        let (error, position) = value;
        match error {
            quick_xml::Error::InvalidAttr(error) => (error, position).into(),
            error => Self::malformed(error.to_string(), position),
        }
    }
}

impl From<(AttrError, usize)> for ParseError {
    /// Convert from a pair of quick-xml attribute error and the position of the element
    fn from(value: (AttrError, usize)) -> Self {
        let (error, position) = value;
        Self::malformed(format!("invalid attribute: {error}"), position)
    }
}

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
/// A problem found while reading a document that doesn't stop it from being read
pub enum Warning {
    /// A recognised element was found where its parent doesn't permit it, and was kept
    /// as unknown content of the parent
    #[error("`<{child}>` at {location} is not permitted within `<{parent}>` and was kept as unknown content")]
    #[diagnostic(code(oxkml::misplaced), severity(Warning))]
    Misplaced {
        /// The name of the parent element
        parent: String,
        /// The name of the child element
        child: String,
        /// Where the child starts
        location: Location,
        /// The span of the child's start tag
        #[label("not permitted here")]
        span: SourceSpan,
    },
    /// A simple field had attributes, which a field can't hold
    #[error("attributes of `<{field}>` at {location} were discarded")]
    #[diagnostic(code(oxkml::discarded_attributes), severity(Warning))]
    DiscardedAttributes {
        /// The name of the field
        field: String,
        /// Where the field starts
        location: Location,
        /// The span of the field's start tag
        #[label("attributes discarded")]
        span: SourceSpan,
    },
}

impl Warning {
    /// Returns the warning with its location resolved to a line and column of `source`
    #[must_use]
    pub fn located(mut self, source: &str) -> Self {
        match &mut self {
            Self::Misplaced { location, .. } | Self::DiscardedAttributes { location, .. } => {
                *location = Location::new(source, location.offset);
            }
        }
        self
    }
}

#[cfg(test)]
mod test {
    use super::{Location, ParseError};
    use pretty_assertions::assert_eq;

    #[test]
    fn location() {
        let source = "<kml>\n  <Placemark>\n    <né/>";
        let offset = source.find("<né").unwrap();
        assert_eq!(
            Location::new(source, offset),
            Location {
                offset,
                line: 3,
                column: 5
            }
        );
        assert_eq!(Location::new(source, 0).to_string(), "1:1");
        assert_eq!(Location::from_offset(12).to_string(), "byte 12");
        assert_eq!(Location::new(source, source.len() + 10).offset, source.len());
    }

    #[test]
    fn located_error() {
        let source = "<kml>\n<Folder id=\"a\"/>";
        let error = ParseError::malformed("oops", 6).located(source);
        assert_eq!(error.to_string(), "malformed XML at 2:1: oops");
        assert_eq!(error.location().map(|l| l.line), Some(2));
        assert_eq!(ParseError::Empty.location(), None);
    }

    #[test]
    fn tree_errors_have_no_location() {
        let error = ParseError::DuplicateIdInTree { id: "a".into() }.located("<kml/>");
        assert_eq!(error.location(), None);
        assert_eq!(error.span(), None);
        assert_eq!(error.to_string(), "duplicate id \"a\" within the tree");
    }
}
