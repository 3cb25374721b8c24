//! A parsed document and its object index.
use std::collections::{hash_map, HashMap};

use oxkml_diagnostics::{ParseError, Warning};

use crate::{
    element::Element,
    visitor::{Context, ContextFlags, Flow, Visitor},
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A lookup from identifier to the object declaring it.
///
/// Entries are paths of storage indices from the root, so the index never holds a
/// reference into the tree.
pub struct ObjectIndex {
    ids: HashMap<Box<str>, Box<[usize]>>,
}

impl ObjectIndex {
    /// Returns the path from the root to the object with the identifier
    pub fn get(&self, id: &str) -> Option<&[usize]> {
        self.ids.get(id).map(AsRef::as_ref)
    }

    /// Returns the number of indexed objects
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no objects are indexed
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the indexed identifiers
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(AsRef::as_ref)
    }

    /// Returns the object with the identifier within `root`
    pub fn resolve<'a>(&self, root: &'a Element, id: &str) -> Option<&'a Element> {
        self.get(id)?
            .iter()
            .try_fold(root, |element, index| element.child_at(*index)?.as_element())
    }

    pub(crate) fn insert(&mut self, id: Box<str>, path: Box<[usize]>) -> bool {
        match self.ids.entry(id) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(entry) => {
                entry.insert(path);
                true
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
/// A tree of elements with an index of the objects within it.
///
/// The tree can't be changed once indexed, so the index is always accurate. To change a
/// tree, take it with [`Document::into_root`] and index it again with
/// [`Document::from_root`].
pub struct Document {
    root: Option<Element>,
    index: ObjectIndex,
    warnings: Vec<Warning>,
}

impl Document {
    pub(crate) fn from_parts(root: Element, index: ObjectIndex, warnings: Vec<Warning>) -> Self {
        Self {
            root: Some(root),
            index,
            warnings,
        }
    }

    /// Parses a document with the default options
    ///
    /// # Errors
    /// If the text isn't a well-formed document. See [`ParseError`].
    #[cfg(feature = "parse")]
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        crate::parse::Parser::default().parse(source)
    }

    /// Replaces the contents of the document by parsing the text.
    ///
    /// The previous tree and index are dropped first, so the document is left empty when
    /// the text fails to parse.
    ///
    /// # Errors
    /// If the text isn't a well-formed document. See [`ParseError`].
    #[cfg(feature = "parse")]
    pub fn reload(&mut self, source: &str) -> Result<(), ParseError> {
        *self = Self::default();
        *self = Self::parse(source)?;
        Ok(())
    }

    /// Creates a document from a tree, indexing the objects within it.
    ///
    /// Objects within unknown content aren't indexed.
    ///
    /// # Errors
    /// If two objects share an identifier
    pub fn from_root(root: Element) -> Result<Self, ParseError> {
        let mut mapper = IdMapper::default();
        let _ = mapper.start(&root)?;
        log::debug!("indexed {} objects", mapper.index.len());
        Ok(Self::from_parts(root, mapper.index, vec![]))
    }

    /// Returns the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Takes the root element, dropping the index
    pub fn into_root(self) -> Option<Element> {
        self.root
    }

    /// Returns the object with the identifier
    pub fn lookup_by_id(&self, id: &str) -> Option<&Element> {
        self.index.resolve(self.root.as_ref()?, id)
    }

    /// Returns the object index
    pub fn index(&self) -> &ObjectIndex {
        &self.index
    }

    /// Returns the problems found while parsing that didn't stop the document being read
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[cfg(feature = "parse")]
    pub(crate) fn locate_warnings(&mut self, source: &str) {
        for warning in &mut self.warnings {
            *warning = warning.clone().located(source);
        }
    }

    /// Writes the document as text, starting with an XML declaration
    ///
    /// # Errors
    /// If the writer is used incorrectly
    #[cfg(feature = "serialize")]
    pub fn serialize(
        &self,
        options: &crate::serialize::SerializeOptions,
    ) -> Result<String, crate::error::SerializeError> {
        let Some(root) = &self.root else {
            return Ok(String::new());
        };
        crate::serialize::serialize(
            root,
            &crate::serialize::SerializeOptions {
                declaration: true,
                ..*options
            },
        )
    }
}

#[derive(Default)]
struct IdMapper {
    index: ObjectIndex,
}

impl<'a> Visitor<'a> for IdMapper {
    type Error = ParseError;

    fn element(&mut self, element: &'a Element, context: &Context) -> Result<Flow, Self::Error> {
        if context.flags.contains(ContextFlags::within_unknown) {
            return Ok(Flow::Reject);
        }
        if let Some(id) = element.object_id() {
            if !self.index.insert(id.into(), context.path.iter().copied().collect()) {
                return Err(ParseError::DuplicateIdInTree { id: id.to_string() });
            }
        }
        Ok(Flow::Descend)
    }
}

#[cfg(test)]
mod test {
    use oxkml_collections::element::ElementId;
    use oxkml_diagnostics::ParseError;
    use pretty_assertions::assert_eq;

    use super::Document;
    use crate::element::Element;

    fn object(id: ElementId, object_id: &str) -> Element {
        let mut element = Element::new(id);
        element.set_attribute("id", object_id);
        element
    }

    #[test]
    fn from_root() {
        let mut folder = object(ElementId::Folder, "f");
        let mut placemark = object(ElementId::Placemark, "p");
        placemark.add_child(object(ElementId::Point, "pt")).unwrap();
        folder.add_child(Element::new(ElementId::Placemark)).unwrap();
        folder.add_child(placemark).unwrap();
        let mut unknown = Element::unknown("gx:Tour");
        unknown.add_child(object(ElementId::Placemark, "hidden")).unwrap();
        folder.add_unknown(unknown);

        let document = Document::from_root(folder).unwrap();
        assert_eq!(document.index().len(), 3);
        assert_eq!(document.index().get("pt"), Some(&[1, 0][..]));
        assert_eq!(
            document.lookup_by_id("pt").map(Element::id),
            Some(ElementId::Point)
        );
        assert_eq!(
            document.lookup_by_id("f").map(Element::id),
            Some(ElementId::Folder)
        );
        assert!(document.lookup_by_id("hidden").is_none());
    }

    #[test]
    fn from_root_duplicate() {
        let mut folder = object(ElementId::Folder, "x");
        folder.add_child(object(ElementId::Placemark, "x")).unwrap();
        let error = Document::from_root(folder).unwrap_err();
        assert_eq!(error, ParseError::DuplicateIdInTree { id: "x".into() });
        assert_eq!(error.location(), None);
        assert_eq!(error.span(), None);
    }

    #[test]
    fn empty() {
        let document = Document::default();
        assert!(document.root().is_none());
        assert!(document.lookup_by_id("x").is_none());
        assert!(document.index().is_empty());
    }
}
