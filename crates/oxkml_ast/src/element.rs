//! The element node of a document tree.
use itertools::Itertools as _;
use oxkml_collections::{
    attribute::AttrId,
    element::{ElementCategory, ElementId},
    schema::{Schema, Slot},
    value::FieldValue,
};

use crate::{
    attribute::AttributeMap,
    error::{FieldError, Rejected},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A simple field held by its parent, such as `<name>` within a `<Placemark>`
pub struct Field {
    id: ElementId,
    value: String,
}

impl Field {
    /// Creates a field of the given kind holding the text as-is
    pub fn new(id: ElementId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    /// Returns the kind of the field
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the text of the field
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Reads the field's text as a typed value
    pub fn parse<T: FieldValue>(&self) -> Option<T> {
        T::parse_value(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A known child of an element
pub enum Child {
    /// A simple field whose text was folded into the parent
    Field(Field),
    /// A complex element
    Element(Box<Element>),
}

impl Child {
    /// Returns the kind of the child
    pub fn id(&self) -> ElementId {
        match self {
            Self::Field(field) => field.id,
            Self::Element(element) => element.id,
        }
    }

    /// Returns the child if it's an element
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Field(_) => None,
        }
    }

    /// Returns the child if it's a field
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            Self::Element(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    /// Position of the parent's slot holding the child
    slot: usize,
    child: Child,
}

/// The result of attaching a child with [`Element::attach`].
pub(crate) struct Attached {
    /// The storage index of the child, or `None` when it was kept as unknown content
    pub index: Option<usize>,
    /// The previous occupant of a single-child slot
    pub replaced: Option<Child>,
}

#[derive(Clone, Debug, PartialEq)]
/// A node of a document.
///
/// Children recognised by the parent's schema are stored as fields or elements, tagged with
/// the slot that accepted them. Anything else is kept as unknown content so that it
/// survives a round-trip.
pub struct Element {
    id: ElementId,
    name: Option<Box<str>>,
    attributes: AttributeMap<AttrId>,
    unknown_attributes: AttributeMap<Box<str>>,
    char_data: String,
    children: Vec<Entry>,
    unknown_children: Vec<Element>,
}

impl Element {
    /// Creates an empty element of the given kind
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            name: None,
            attributes: AttributeMap::default(),
            unknown_attributes: AttributeMap::default(),
            char_data: String::new(),
            children: Vec::new(),
            unknown_children: Vec::new(),
        }
    }

    /// Creates an element for the name, which is unknown if it isn't a recognised kind
    pub fn from_name(name: &str) -> Self {
        match ElementId::from_name(name) {
            ElementId::Unknown => Self::unknown(name),
            id => Self::new(id),
        }
    }

    /// Creates an unknown element that keeps the name it was written with
    pub fn unknown(name: &str) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(ElementId::Unknown)
        }
    }

    /// Returns the kind of the element
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the name of the element as written in a document
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.name())
    }

    /// Whether the element's kind is the given kind or inherits from it
    pub fn is_a(&self, group: ElementId) -> bool {
        self.id.is_a(group)
    }

    /// Returns the groups the element belongs to
    pub fn categories(&self) -> ElementCategory {
        self.id.categories()
    }

    /// Returns the value of a known attribute
    pub fn attribute(&self, attr: AttrId) -> Option<&str> {
        self.attributes.get(&attr)
    }

    /// Returns the value of an attribute by name, whether it's known or not
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        match Schema::get().parse_attr_id(self.id, name) {
            Some(attr) => self.attributes.get(&attr),
            None => self.unknown_attributes.get(name),
        }
    }

    /// Sets an attribute, which is kept as unknown if the kind doesn't declare it
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match Schema::get().parse_attr_id(self.id, name) {
            Some(attr) => self.attributes.insert(attr, value),
            None => self.unknown_attributes.insert(name.into(), value),
        };
    }

    /// Removes an attribute by name, returning its value
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        match Schema::get().parse_attr_id(self.id, name) {
            Some(attr) => self.attributes.remove(&attr),
            None => self.unknown_attributes.remove(name),
        }
    }

    /// Returns the attributes declared by the kind
    pub fn attributes(&self) -> &AttributeMap<AttrId> {
        &self.attributes
    }

    /// Returns attributes the kind doesn't declare, in the order they were set
    pub fn unknown_attributes(&self) -> &AttributeMap<Box<str>> {
        &self.unknown_attributes
    }

    /// Returns the identifier of an object
    pub fn object_id(&self) -> Option<&str> {
        if self.is_a(ElementId::Object) {
            self.attribute(AttrId::Id)
        } else {
            None
        }
    }

    /// Returns the text content of the element
    pub fn char_data(&self) -> &str {
        &self.char_data
    }

    /// Replaces the text content of the element
    pub fn set_char_data(&mut self, text: impl Into<String>) {
        self.char_data = text.into();
    }

    /// Appends to the text content of the element
    pub fn push_char_data(&mut self, text: &str) {
        self.char_data.push_str(text);
    }

    #[cfg(feature = "parse")]
    pub(crate) fn char_data_mut(&mut self) -> &mut String {
        &mut self.char_data
    }

    /// Removes leading and trailing whitespace from the text content
    pub(crate) fn trim_char_data(&mut self) {
        let trimmed = self.char_data.trim();
        if trimmed.len() != self.char_data.len() {
            self.char_data = trimmed.to_string();
        }
    }

    /// Adds a child to the element.
    ///
    /// Unknown children, and any child of an unknown element, are kept as unknown content.
    /// Simple fields are folded into the element as a [`Field`], which keeps only their text.
    /// A child in a slot that holds at most one child replaces the previous occupant.
    ///
    /// # Errors
    /// When the element's schema has no slot for a recognised child. The element is left
    /// unchanged and the child is returned.
    pub fn add_child(&mut self, child: Element) -> Result<(), Rejected> {
        self.attach(child).map(|_| ())
    }

    pub(crate) fn attach(&mut self, child: Element) -> Result<Attached, Rejected> {
        if self.id == ElementId::Unknown || child.id == ElementId::Unknown {
            self.unknown_children.push(child);
            return Ok(Attached {
                index: None,
                replaced: None,
            });
        }
        let Some((position, slot)) = Schema::get().slot_for(self.id, child.id) else {
            return Err(Rejected {
                parent: self.id,
                child: Box::new(child),
            });
        };
        let child = if child.id.is_simple() {
            Child::Field(Field {
                id: child.id,
                value: child.char_data,
            })
        } else {
            Child::Element(Box::new(child))
        };
        Ok(self.place(position, slot, child))
    }

    fn place(&mut self, position: usize, slot: Slot, child: Child) -> Attached {
        if !slot.many {
            if let Some(index) = self.children.iter().position(|e| e.slot == position) {
                let replaced = std::mem::replace(&mut self.children[index].child, child);
                return Attached {
                    index: Some(index),
                    replaced: Some(replaced),
                };
            }
        }
        self.children.push(Entry {
            slot: position,
            child,
        });
        Attached {
            index: Some(self.children.len() - 1),
            replaced: None,
        }
    }

    /// Adds a child to the unknown content of the element, regardless of the schema
    pub fn add_unknown(&mut self, child: Element) {
        self.unknown_children.push(child);
    }

    /// Returns the known children in the order they were added
    pub fn children(&self) -> impl Iterator<Item = &Child> {
        self.children.iter().map(|entry| &entry.child)
    }

    /// Returns the known children, with their storage index, in the order the schema
    /// declares them.
    ///
    /// Children sharing a slot keep the order they were added in.
    pub fn children_in_schema_order(&self) -> impl Iterator<Item = (usize, &Child)> {
        self.children
            .iter()
            .enumerate()
            .sorted_by_key(|(_, entry)| entry.slot)
            .map(|(index, entry)| (index, &entry.child))
    }

    /// Returns the known child at a storage index
    pub fn child_at(&self, index: usize) -> Option<&Child> {
        self.children.get(index).map(|entry| &entry.child)
    }

    /// Returns the known children that are elements, in the order they were added
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children().filter_map(Child::as_element)
    }

    /// Returns the first element child of the given kind or group
    pub fn find_child(&self, group: ElementId) -> Option<&Element> {
        self.element_children().find(|child| child.is_a(group))
    }

    /// Returns every element child of the given kind or group
    pub fn children_of(&self, group: ElementId) -> impl Iterator<Item = &Element> {
        self.element_children()
            .filter(move |child| child.is_a(group))
    }

    /// Returns the unknown content of the element
    pub fn unknown_children(&self) -> &[Element] {
        &self.unknown_children
    }

    fn field_slot(&self, id: ElementId) -> Result<(usize, Slot), FieldError> {
        if !id.is_simple() {
            return Err(FieldError::NotAField(id));
        }
        Schema::get()
            .slot_for(self.id, id)
            .ok_or(FieldError::NotPermitted {
                parent: self.id,
                field: id,
            })
    }

    /// Sets a simple field to a typed value
    ///
    /// # Errors
    /// If the kind isn't a field of the element, or it holds another type of value
    pub fn set_field<T: FieldValue>(&mut self, id: ElementId, value: &T) -> Result<(), FieldError> {
        let (position, slot) = self.field_slot(id)?;
        if let Some(expected) = id.value_type() {
            if !T::accepts(expected) {
                return Err(FieldError::TypeMismatch { field: id, expected });
            }
        }
        self.place(position, slot, Child::Field(Field::new(id, value.to_value())));
        Ok(())
    }

    /// Sets a simple field to the given text without checking its type
    ///
    /// # Errors
    /// If the kind isn't a field of the element
    pub fn set_field_text(
        &mut self,
        id: ElementId,
        text: impl Into<String>,
    ) -> Result<(), FieldError> {
        let (position, slot) = self.field_slot(id)?;
        self.place(position, slot, Child::Field(Field::new(id, text)));
        Ok(())
    }

    fn get_field(&self, id: ElementId) -> Option<&Field> {
        self.children()
            .filter_map(Child::as_field)
            .find(|field| field.id == id)
    }

    /// Returns the typed value of a field, if it's present and valid
    pub fn field<T: FieldValue>(&self, id: ElementId) -> Option<T> {
        self.get_field(id)?.parse()
    }

    /// Returns the text of a field, if it's present
    pub fn field_text(&self, id: ElementId) -> Option<&str> {
        self.get_field(id).map(Field::value)
    }

    /// Whether the field is present, regardless of its value
    pub fn has_field(&self, id: ElementId) -> bool {
        self.get_field(id).is_some()
    }

    /// Removes every occurrence of a field, returning whether one was present
    pub fn clear_field(&mut self, id: ElementId) -> bool {
        let len = self.children.len();
        self.children
            .retain(|entry| !matches!(&entry.child, Child::Field(field) if field.id == id));
        len != self.children.len()
    }
}

#[cfg(test)]
mod test {
    use oxkml_collections::{attribute::AttrId, element::ElementId, value::Color};
    use pretty_assertions::assert_eq;

    use super::{Child, Element};
    use crate::error::FieldError;

    fn field(id: ElementId, text: &str) -> Element {
        let mut element = Element::new(id);
        element.set_char_data(text);
        element
    }

    #[test]
    fn refuses_illegal_children() {
        let mut point = Element::new(ElementId::Point);
        point.set_attribute("id", "p");
        let before = point.clone();

        let rejected = point
            .add_child(Element::new(ElementId::Style))
            .unwrap_err();
        assert_eq!(rejected.parent, ElementId::Point);
        assert_eq!(rejected.into_child().id(), ElementId::Style);
        assert_eq!(point, before);
    }

    #[test]
    fn keeps_unknown_children() {
        let mut placemark = Element::new(ElementId::Placemark);
        placemark.add_child(Element::from_name("gx:Track")).unwrap();
        assert_eq!(placemark.children().count(), 0);
        assert_eq!(placemark.unknown_children()[0].name(), "gx:Track");

        let mut unknown = Element::unknown("atom:author");
        unknown.add_child(Element::new(ElementId::Name)).unwrap();
        assert_eq!(unknown.unknown_children()[0].id(), ElementId::Name);
    }

    #[test]
    fn promotes_simple_fields() {
        let mut placemark = Element::new(ElementId::Placemark);
        placemark.add_child(field(ElementId::Name, "Home")).unwrap();
        placemark
            .add_child(field(ElementId::Visibility, "0"))
            .unwrap();
        assert_eq!(placemark.field_text(ElementId::Name), Some("Home"));
        assert_eq!(placemark.field::<bool>(ElementId::Visibility), Some(false));
        assert!(matches!(placemark.children().next(), Some(Child::Field(_))));
    }

    #[test]
    fn single_slots_are_replaced() {
        let mut placemark = Element::new(ElementId::Placemark);
        placemark.add_child(Element::new(ElementId::Point)).unwrap();
        placemark
            .add_child(Element::new(ElementId::Polygon))
            .unwrap();
        let geometries: Vec<_> = placemark.children_of(ElementId::Geometry).collect();
        assert_eq!(geometries.len(), 1);
        assert_eq!(geometries[0].id(), ElementId::Polygon);

        let mut folder = Element::new(ElementId::Folder);
        folder.add_child(Element::new(ElementId::Placemark)).unwrap();
        folder.add_child(Element::new(ElementId::Placemark)).unwrap();
        assert_eq!(folder.children_of(ElementId::Feature).count(), 2);
    }

    #[test]
    fn has_and_clear() {
        let mut placemark = Element::new(ElementId::Placemark);
        assert!(!placemark.has_field(ElementId::Open));
        placemark.set_field(ElementId::Open, &false).unwrap();
        assert!(placemark.has_field(ElementId::Open));
        assert_eq!(placemark.field::<bool>(ElementId::Open), Some(false));

        assert!(placemark.clear_field(ElementId::Open));
        assert!(!placemark.has_field(ElementId::Open));
        assert_eq!(placemark.field::<bool>(ElementId::Open), None);
        assert!(!placemark.clear_field(ElementId::Open));
    }

    #[test]
    fn field_errors() {
        let mut placemark = Element::new(ElementId::Placemark);
        assert_eq!(
            placemark.set_field(ElementId::Visibility, &1.5),
            Err(FieldError::TypeMismatch {
                field: ElementId::Visibility,
                expected: oxkml_collections::value::ValueType::Bool,
            })
        );
        assert_eq!(
            placemark.set_field_text(ElementId::Point, "0"),
            Err(FieldError::NotAField(ElementId::Point))
        );
        let mut point = Element::new(ElementId::Point);
        assert_eq!(
            point.set_field(ElementId::Name, &String::from("a")),
            Err(FieldError::NotPermitted {
                parent: ElementId::Point,
                field: ElementId::Name,
            })
        );

        let mut line_style = Element::new(ElementId::LineStyle);
        let color = Color::from_abgr(0xff00_00ff);
        line_style.set_field(ElementId::Color, &color).unwrap();
        assert_eq!(line_style.field_text(ElementId::Color), Some("ff0000ff"));
        assert_eq!(line_style.field::<Color>(ElementId::Color), Some(color));
    }

    #[test]
    fn schema_order() {
        let mut placemark = Element::new(ElementId::Placemark);
        placemark.add_child(Element::new(ElementId::Point)).unwrap();
        placemark
            .add_child(field(ElementId::Visibility, "1"))
            .unwrap();
        placemark.add_child(field(ElementId::Name, "a")).unwrap();

        let order: Vec<_> = placemark
            .children_in_schema_order()
            .map(|(index, child)| (index, child.id()))
            .collect();
        assert_eq!(
            order,
            [
                (2, ElementId::Name),
                (1, ElementId::Visibility),
                (0, ElementId::Point)
            ]
        );
    }

    #[test]
    fn attributes() {
        let mut placemark = Element::new(ElementId::Placemark);
        placemark.set_attribute("id", "a");
        placemark.set_attribute("data-x", "1");
        assert_eq!(placemark.attribute(AttrId::Id), Some("a"));
        assert_eq!(placemark.object_id(), Some("a"));
        assert_eq!(placemark.get_attribute("data-x"), Some("1"));
        assert_eq!(placemark.unknown_attributes().len(), 1);
        assert_eq!(placemark.remove_attribute("id").as_deref(), Some("a"));
        assert_eq!(placemark.object_id(), None);

        let mut unknown = Element::unknown("foo");
        unknown.set_attribute("id", "b");
        assert_eq!(unknown.object_id(), None);
        assert_eq!(unknown.get_attribute("id"), Some("b"));
    }
}
