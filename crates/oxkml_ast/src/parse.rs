//! Building a document from text.
//!
//! The [`Parser`] feeds events from [`reader`] into a [`Builder`], which validates each
//! element against the schema as it's closed and attaches it to its parent.
//!
//! ```
//! use oxkml_ast::parse::{ParseOptions, Parser};
//!
//! let document = Parser::new(ParseOptions::default())
//!     .parse(r#"<kml><Placemark id="home"><name>Home</name></Placemark></kml>"#)
//!     .unwrap();
//! assert_eq!(
//!     document.lookup_by_id("home").and_then(|p| p.field_text(oxkml_collections::element::ElementId::Name)),
//!     Some("Home"),
//! );
//! ```
use oxkml_diagnostics::ParseError;

use crate::{document::Document, element::Element, visitor::Flow};

pub use builder::Builder;

mod builder;
pub mod reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
/// Options for how a document is read
pub struct ParseOptions {
    /// Fail on a recognised element in a position its parent doesn't permit, instead of
    /// keeping it as unknown content with a warning
    pub strict: bool,
    /// The deepest nesting of elements permitted
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: 100,
        }
    }
}

impl ParseOptions {
    /// Sets whether misplaced elements fail the parse
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the deepest nesting of elements permitted
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Watches elements as they're read, and may drop them before they're kept.
///
/// Any [`Flow`] other than [`Flow::Descend`] from one observer takes effect without
/// consulting later observers.
#[allow(unused_variables)]
pub trait Observer {
    /// Called when an element's start tag is read, with its attributes.
    ///
    /// [`Flow::SkipChildren`] drops the element's children as they're read,
    /// [`Flow::Reject`] drops the element, and [`Flow::Stop`] fails the parse.
    fn new_element(&mut self, element: &Element) -> Flow {
        Flow::Descend
    }

    /// Called when an element is complete, before it's attached to its parent.
    ///
    /// [`Flow::Reject`] drops the element and releases any identifiers declared within it.
    /// [`Flow::Stop`] fails the parse. The root element is never passed here.
    fn end_element(&mut self, parent: &Element, child: &Element) -> Flow {
        Flow::Descend
    }
}

#[derive(Default)]
/// Reads documents with a set of options and observers
pub struct Parser<'o> {
    options: ParseOptions,
    observers: Vec<&'o mut dyn Observer>,
}

impl<'o> Parser<'o> {
    /// Creates a parser with the given options
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            observers: vec![],
        }
    }

    /// Adds an observer that's consulted for every element
    #[must_use]
    pub fn with_observer(mut self, observer: &'o mut dyn Observer) -> Self {
        self.observers.push(observer);
        self
    }

    /// Returns a builder for feeding events by hand
    pub fn builder(self) -> Builder<'o> {
        Builder::new(self.options, self.observers)
    }

    /// Reads a document from text.
    ///
    /// # Errors
    /// When the text isn't a well-formed document, with the location of the problem.
    /// No part of the document is returned.
    pub fn parse(self, source: &str) -> Result<Document, ParseError> {
        let mut builder = self.builder();
        let result = reader::read(source, &mut builder).and_then(|()| builder.finish());
        match result {
            Ok(mut document) => {
                document.locate_warnings(source);
                Ok(document)
            }
            Err(error) => Err(error.located(source)),
        }
    }
}
