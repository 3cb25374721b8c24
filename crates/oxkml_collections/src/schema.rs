//! The registry of which children each element accepts.
//!
//! Slots are declared per kind in [`crate::element`]. The registry flattens them along each
//! kind's ancestry once per process, so lookups during parsing are slice scans over a
//! handful of entries.
use std::sync::LazyLock;

use itertools::Itertools as _;

use crate::{attribute::AttrId, element::ElementId, value::ValueType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What an element of a kind may contain
pub enum Content {
    /// The kind is a group that's never written in a document
    Abstract,
    /// The element contains other elements, and any text is ignored
    Complex,
    /// The element has attributes and text, but no children
    Text,
    /// The element is a field holding a value, stored as part of its parent
    Simple(ValueType),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A position in a parent where children of a kind are accepted
pub struct Slot {
    /// The kind, or group of kinds, accepted by the slot
    pub target: ElementId,
    /// Whether the slot holds a sequence, rather than at most one child
    pub many: bool,
}

impl Slot {
    /// Creates a slot holding at most one child
    pub const fn one(target: ElementId) -> Self {
        Self {
            target,
            many: false,
        }
    }

    /// Creates a slot holding a sequence of children
    pub const fn many(target: ElementId) -> Self {
        Self { target, many: true }
    }

    /// Whether a child of the kind fits in the slot
    pub fn accepts(&self, child: ElementId) -> bool {
        child != ElementId::Unknown && !child.is_abstract() && child.is_a(self.target)
    }
}

#[derive(Debug)]
struct Entry {
    slots: Box<[Slot]>,
    attributes: Box<[AttrId]>,
    allowed_children: Box<[ElementId]>,
}

#[derive(Debug)]
/// The flattened schema tables for every kind.
///
/// The registry is built once, on first use, and is read-only afterwards.
pub struct Schema {
    entries: Box<[Entry]>,
}

static SCHEMA: LazyLock<Schema> = LazyLock::new(Schema::build);

impl Schema {
    /// Returns the process-wide registry
    pub fn get() -> &'static Schema {
        &SCHEMA
    }

    fn build() -> Self {
        let entries: Box<[Entry]> = ElementId::ALL
            .iter()
            .map(|&id| {
                let ancestry = id.ancestry();
                let slots: Box<[Slot]> = ancestry
                    .iter()
                    .rev()
                    .flat_map(|kind| kind.definition().slots.iter().copied())
                    .collect();
                let attributes = ancestry
                    .iter()
                    .rev()
                    .flat_map(|kind| kind.definition().attributes.iter().copied())
                    .unique()
                    .collect();
                let allowed_children = ElementId::ALL
                    .iter()
                    .copied()
                    .filter(|child| slots.iter().any(|slot| slot.accepts(*child)))
                    .collect();
                Entry {
                    slots,
                    attributes,
                    allowed_children,
                }
            })
            .collect();
        log::debug!("built schema registry for {} kinds", entries.len());
        Self { entries }
    }

    fn entry(&self, id: ElementId) -> &Entry {
        &self.entries[id as usize]
    }

    /// Returns the slots of a kind, including inherited ones, in serialization order
    pub fn slots(&self, id: ElementId) -> &[Slot] {
        &self.entry(id).slots
    }

    /// Returns the position and definition of the first slot of `parent` accepting `child`
    pub fn slot_for(&self, parent: ElementId, child: ElementId) -> Option<(usize, Slot)> {
        self.slots(parent)
            .iter()
            .copied()
            .find_position(|slot| slot.accepts(child))
    }

    /// Returns every concrete kind that `parent` accepts as a child
    pub fn allowed_children(&self, parent: ElementId) -> &[ElementId] {
        &self.entry(parent).allowed_children
    }

    /// Whether `parent` accepts a child of kind `child`
    pub fn is_allowed(&self, parent: ElementId, child: ElementId) -> bool {
        self.slot_for(parent, child).is_some()
    }

    /// Returns the attributes of a kind, including inherited ones, in serialization order
    pub fn attributes(&self, id: ElementId) -> &[AttrId] {
        &self.entry(id).attributes
    }

    /// Returns the position of an attribute within the kind's declared attributes
    pub fn attribute_position(&self, id: ElementId, attr: AttrId) -> Option<usize> {
        self.attributes(id).iter().position(|a| *a == attr)
    }

    /// Returns the known attribute for the name, if the kind declares it
    pub fn parse_attr_id(&self, id: ElementId, name: &str) -> Option<AttrId> {
        let attr = AttrId::from_name(name)?;
        self.attribute_position(id, attr).map(|_| attr)
    }
}

#[cfg(test)]
mod test {
    use super::{Schema, Slot};
    use crate::{attribute::AttrId, element::ElementId};
    use pretty_assertions::assert_eq;

    #[test]
    fn inherited_slots_come_first() {
        let slots = Schema::get().slots(ElementId::Placemark);
        assert_eq!(slots.first(), Some(&Slot::one(ElementId::Name)));
        assert_eq!(slots.last(), Some(&Slot::one(ElementId::Geometry)));

        // 13 slots from `Feature`, then `Schema`, then `Feature`
        let (position, slot) = Schema::get()
            .slot_for(ElementId::Document, ElementId::Placemark)
            .unwrap();
        assert!(slot.many);
        assert_eq!(position, 14);
        assert_eq!(slots.len(), 14);
    }

    #[test]
    fn allowed_children() {
        let schema = Schema::get();
        let allowed = schema.allowed_children(ElementId::Folder);
        assert!(allowed.contains(&ElementId::Placemark));
        assert!(allowed.contains(&ElementId::Folder));
        assert!(allowed.contains(&ElementId::Style));
        assert!(allowed.contains(&ElementId::Name));
        assert!(!allowed.contains(&ElementId::Point));
        assert!(!allowed.contains(&ElementId::Feature));
        assert!(!allowed.contains(&ElementId::Unknown));

        assert!(schema.is_allowed(ElementId::Placemark, ElementId::Polygon));
        assert!(!schema.is_allowed(ElementId::Point, ElementId::Style));
        assert!(!schema.is_allowed(ElementId::Style, ElementId::Pair));
        assert!(!schema.is_allowed(ElementId::Name, ElementId::Name));
        assert!(schema.is_allowed(ElementId::IconStyle, ElementId::Icon));
        assert!(!schema.is_allowed(ElementId::NetworkLink, ElementId::Icon));
    }

    #[test]
    fn attributes() {
        let schema = Schema::get();
        assert_eq!(
            schema.attributes(ElementId::Data),
            &[AttrId::Id, AttrId::TargetId, AttrId::Name]
        );
        assert_eq!(
            schema.parse_attr_id(ElementId::Placemark, "id"),
            Some(AttrId::Id)
        );
        assert_eq!(schema.parse_attr_id(ElementId::Placemark, "name"), None);
        assert_eq!(schema.parse_attr_id(ElementId::Unknown, "id"), None);
        assert_eq!(
            schema.attributes(ElementId::HotSpot),
            &[AttrId::X, AttrId::Y, AttrId::Xunits, AttrId::Yunits]
        );
    }
}
