use std::{collections::HashMap, fmt::Write, ops::Range};

use oxkml_collections::element::ElementId;
use oxkml_diagnostics::{Location, ParseError, Warning};
use smallvec::SmallVec;

use crate::{
    document::{Document, ObjectIndex},
    element::{Attached, Child, Element},
    visitor::Flow,
};

use super::{Observer, ParseOptions};

/// Storage indices from an element down to a descendant, innermost first
type Path = SmallVec<[usize; 4]>;

/// Identifiers declared within an element's subtree
type Declared = Vec<(Box<str>, Path)>;

/// Namespace prefixes declared on an element, and whether each is bound to KML
type Prefixes = SmallVec<[(Box<str>, bool); 1]>;

/// Namespaces whose prefixed names are read as if unprefixed
const KML_NAMESPACES: &[&str] = &[
    "http://www.opengis.net/kml/2.2",
    "http://earth.google.com/kml/2.2",
    "http://earth.google.com/kml/2.1",
    "http://earth.google.com/kml/2.0",
];

struct Frame {
    element: Element,
    span: Range<usize>,
    ids: Declared,
    skip_children: bool,
    prefixes: Prefixes,
    /// Tags open within a simple field, with the length of its text after each start tag
    markup: Vec<(Box<str>, usize)>,
}

/// Builds a document from a stream of tag and text events.
///
/// Elements are validated against the schema as they're closed. Identifiers are checked
/// for uniqueness as soon as they're read, and released again if the element declaring
/// them is dropped.
///
/// Tags within a simple field are written into the field's text as markup. Names with a
/// prefix bound to a KML namespace are read without their prefix.
pub struct Builder<'o> {
    options: ParseOptions,
    observers: Vec<&'o mut dyn Observer>,
    stack: Vec<Frame>,
    /// Each identifier in use, with the offset it was declared at
    ids: HashMap<Box<str>, usize>,
    /// The depth of the subtree currently being dropped, with its start tag
    discarding: Option<(usize, Box<str>, Range<usize>)>,
    root: Option<(Element, Declared)>,
    warnings: Vec<Warning>,
    offset: usize,
}

impl<'o> Builder<'o> {
    pub(crate) fn new(options: ParseOptions, observers: Vec<&'o mut dyn Observer>) -> Self {
        Self {
            options,
            observers,
            stack: vec![],
            ids: HashMap::new(),
            discarding: None,
            root: None,
            warnings: vec![],
            offset: 0,
        }
    }

    /// Returns the name without its prefix, if the prefix is bound to a KML namespace
    fn local_name<'n>(&self, name: &'n str, own: &Prefixes) -> &'n str {
        let Some((prefix, local)) = name.split_once(':') else {
            return name;
        };
        let is_kml = own
            .iter()
            .chain(self.stack.iter().rev().flat_map(|frame| frame.prefixes.iter()))
            .find(|(declared, _)| &**declared == prefix)
            .is_some_and(|(_, is_kml)| *is_kml);
        if is_kml {
            local
        } else {
            name
        }
    }

    fn discard(&mut self, name: &str, span: Range<usize>) {
        match &mut self.discarding {
            Some((depth, ..)) => *depth += 1,
            None => self.discarding = Some((1, name.into(), span)),
        }
    }

    /// Handles a start tag with its attributes.
    ///
    /// # Errors
    /// If the element can't be part of the document, or an observer stops the parse
    pub fn start_element<K, V>(
        &mut self,
        name: &str,
        attributes: &[(K, V)],
        span: Range<usize>,
    ) -> Result<(), ParseError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.offset = span.end;
        if self.discarding.is_some() || self.stack.last().is_some_and(|frame| frame.skip_children) {
            self.discard(name, span);
            return Ok(());
        }
        if let Some(frame) = self
            .stack
            .last_mut()
            .filter(|frame| frame.element.id().is_simple())
        {
            let mut tag = format!("<{name}");
            for (key, value) in attributes {
                let _ = write!(
                    tag,
                    r#" {}="{}""#,
                    key.as_ref(),
                    quick_xml::escape::escape(value.as_ref())
                );
            }
            tag.push('>');
            frame.element.push_char_data(&tag);
            frame
                .markup
                .push((name.into(), frame.element.char_data().len()));
            return Ok(());
        }
        if self.root.is_some() {
            return Err(ParseError::malformed("multiple root elements", span.start));
        }
        if self.stack.len() >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                location: Location::from_offset(span.start),
                span: span.into(),
            });
        }

        let prefixes: Prefixes = attributes
            .iter()
            .filter_map(|(key, value)| {
                let prefix = key.as_ref().strip_prefix("xmlns:")?;
                Some((prefix.into(), KML_NAMESPACES.contains(&value.as_ref())))
            })
            .collect();
        let local = self.local_name(name, &prefixes);
        let mut element = match self.stack.last() {
            Some(parent) if parent.element.id() == ElementId::Unknown => Element::unknown(name),
            Some(_) => Element::from_name(local),
            None => {
                let element = Element::from_name(local);
                if element.id() == ElementId::Unknown || element.id().is_simple() {
                    return Err(ParseError::UnknownRoot {
                        name: name.to_string(),
                        location: Location::from_offset(span.start),
                        span: span.into(),
                    });
                }
                element
            }
        };
        for (key, value) in attributes {
            element.set_attribute(key.as_ref(), value.as_ref());
        }

        let mut ids = Declared::new();
        if let Some(id) = element.object_id() {
            if let Some(first) = self.ids.get(id) {
                return Err(ParseError::DuplicateId {
                    id: id.to_string(),
                    location: Location::from_offset(span.start),
                    span: span.into(),
                    first: Some((*first).into()),
                });
            }
            self.ids.insert(id.into(), span.start);
            ids.push((id.into(), Path::new()));
        }

        let flow = self
            .observers
            .iter_mut()
            .map(|observer| observer.new_element(&element))
            .find(|flow| *flow != Flow::Descend)
            .unwrap_or_default();
        match flow {
            Flow::Stop => {
                return Err(ParseError::Stopped {
                    location: Location::from_offset(span.start),
                    span: span.into(),
                })
            }
            Flow::Reject => {
                log::debug!("dropped `<{name}>` at its start tag");
                release(&mut self.ids, &ids);
                self.discard(name, span);
                return Ok(());
            }
            Flow::SkipChildren | Flow::Descend => {}
        }

        self.stack.push(Frame {
            element,
            span,
            ids,
            skip_children: flow == Flow::SkipChildren,
            prefixes,
            markup: vec![],
        });
        Ok(())
    }

    /// Handles text content, starting at `offset`.
    ///
    /// # Errors
    /// If non-whitespace text is outside of the root element
    pub fn char_data(&mut self, text: &str, offset: usize) -> Result<(), ParseError> {
        self.offset = offset + text.len();
        if self.discarding.is_some() {
            return Ok(());
        }
        match self.stack.last_mut() {
            None if text.trim().is_empty() => Ok(()),
            None => Err(ParseError::malformed(
                "text outside of the root element",
                offset,
            )),
            Some(frame) => {
                let id = frame.element.id();
                if id == ElementId::Unknown || id.has_text() {
                    frame.element.push_char_data(text);
                }
                Ok(())
            }
        }
    }

    /// Handles an end tag, attaching the element to its parent.
    ///
    /// # Errors
    /// If the tag doesn't close the open element, the element isn't permitted in strict
    /// mode, or an observer stops the parse
    pub fn end_element(&mut self, name: &str, span: Range<usize>) -> Result<(), ParseError> {
        self.offset = span.end;
        if let Some((depth, ..)) = &mut self.discarding {
            *depth -= 1;
            if *depth == 0 {
                self.discarding = None;
            }
            return Ok(());
        }
        if let Some(frame) = self.stack.last_mut() {
            if let Some((open, length)) = frame.markup.pop() {
                if &*open != name {
                    return Err(ParseError::malformed(
                        format!("expected `</{open}>`, but found `</{name}>`"),
                        span.start,
                    ));
                }
                let text = frame.element.char_data_mut();
                if text.len() == length {
                    text.pop();
                    text.push_str("/>");
                } else {
                    let _ = write!(text, "</{name}>");
                }
                return Ok(());
            }
        }
        let Some(mut frame) = self.stack.pop() else {
            return Err(ParseError::malformed(
                format!("unexpected closing tag `</{name}>`"),
                span.start,
            ));
        };
        if frame.element.name() != name
            && frame.element.name() != self.local_name(name, &frame.prefixes)
        {
            return Err(ParseError::malformed(
                format!(
                    "expected `</{}>`, but found `</{name}>`",
                    frame.element.name()
                ),
                span.start,
            ));
        }
        if frame.element.children().next().is_some()
            || !frame.element.unknown_children().is_empty()
        {
            frame.element.trim_char_data();
        }

        let Some(parent) = self.stack.last_mut() else {
            log::debug!("completed root `<{name}>`");
            self.root = Some((frame.element, frame.ids));
            return Ok(());
        };

        let flow = self
            .observers
            .iter_mut()
            .map(|observer| observer.end_element(&parent.element, &frame.element))
            .find(|flow| *flow != Flow::Descend)
            .unwrap_or_default();
        match flow {
            Flow::Stop => {
                return Err(ParseError::Stopped {
                    location: Location::from_offset(frame.span.start),
                    span: frame.span.into(),
                })
            }
            Flow::Reject => {
                log::debug!("dropped `<{name}>` at its end tag");
                release(&mut self.ids, &frame.ids);
                return Ok(());
            }
            Flow::SkipChildren | Flow::Descend => {}
        }

        let attributes_discarded = frame.element.id().is_simple()
            && !(frame.element.attributes().is_empty()
                && frame.element.unknown_attributes().is_empty());
        match parent.element.attach(frame.element) {
            Ok(Attached {
                index: Some(index),
                replaced,
            }) => {
                if attributes_discarded {
                    log::warn!("`<{name}>` is a simple field, discarding its attributes");
                    self.warnings.push(Warning::DiscardedAttributes {
                        field: name.to_string(),
                        location: Location::from_offset(frame.span.start),
                        span: frame.span.clone().into(),
                    });
                }
                if let Some(Child::Element(_)) = replaced {
                    let ids = &mut self.ids;
                    parent.ids.retain(|(id, path)| {
                        let within_replaced = path.last() == Some(&index);
                        if within_replaced {
                            ids.remove(id);
                        }
                        !within_replaced
                    });
                }
                parent
                    .ids
                    .extend(frame.ids.into_iter().map(|(id, mut path)| {
                        path.push(index);
                        (id, path)
                    }));
            }
            Ok(Attached { index: None, .. }) => release(&mut self.ids, &frame.ids),
            Err(rejected) => {
                let location = Location::from_offset(frame.span.start);
                if self.options.strict {
                    return Err(ParseError::SchemaViolation {
                        parent: parent.element.name().to_string(),
                        child: name.to_string(),
                        location,
                        span: frame.span.into(),
                    });
                }
                log::warn!(
                    "`<{name}>` is not permitted within `<{}>`, keeping it as unknown content",
                    parent.element.name()
                );
                self.warnings.push(Warning::Misplaced {
                    parent: parent.element.name().to_string(),
                    child: name.to_string(),
                    location,
                    span: frame.span.into(),
                });
                release(&mut self.ids, &frame.ids);
                parent.element.add_unknown(rejected.into_child());
            }
        }
        Ok(())
    }

    /// Completes the document.
    ///
    /// # Errors
    /// If an element is still open, or there's no root element
    pub fn finish(self) -> Result<Document, ParseError> {
        if let Some(frame) = self.stack.last() {
            return Err(ParseError::Incomplete {
                name: frame.element.name().to_string(),
                location: Location::from_offset(self.offset),
                span: frame.span.clone().into(),
            });
        }
        if let Some((_, name, span)) = self.discarding {
            return Err(ParseError::Incomplete {
                name: name.to_string(),
                location: Location::from_offset(self.offset),
                span: span.into(),
            });
        }
        let Some((root, declared)) = self.root else {
            return Err(ParseError::Empty);
        };

        let mut index = ObjectIndex::default();
        for (id, path) in declared {
            index.insert(id, path.into_iter().rev().collect());
        }
        log::debug!("indexed {} objects", index.len());
        Ok(Document::from_parts(root, index, self.warnings))
    }
}

fn release(ids: &mut HashMap<Box<str>, usize>, declared: &Declared) {
    for (id, _) in declared {
        ids.remove(id);
    }
}
