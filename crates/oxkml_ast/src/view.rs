//! Typed views of an element for each capability group.
//!
//! A view is a borrowed element whose kind is known to belong to a group, created with
//! [`Element::view`]. Checking the group is a walk of the kind's ancestry.
//!
//! ```
//! use oxkml_ast::{element::Element, view::Feature};
//! use oxkml_collections::element::ElementId;
//!
//! let mut placemark = Element::new(ElementId::Placemark);
//! placemark.set_field_text(ElementId::StyleUrl, "#shared").unwrap();
//!
//! let feature = placemark.view::<Feature>().unwrap();
//! assert_eq!(feature.style_url(), Some("#shared"));
//! assert!(Element::new(ElementId::Point).view::<Feature>().is_none());
//! ```
use oxkml_collections::{element::ElementId, value::StyleState};

use crate::element::Element;

/// A view of an element belonging to a capability group
pub trait Capability<'a>: Sized {
    /// The group an element must belong to
    const GROUP: ElementId;

    /// Creates the view without checking the element's group
    fn new_unchecked(element: &'a Element) -> Self;

    /// Returns the element being viewed
    fn element(&self) -> &'a Element;
}

impl Element {
    /// Returns a view of the element if it belongs to the view's group
    pub fn view<'a, C: Capability<'a>>(&'a self) -> Option<C> {
        self.is_a(C::GROUP).then(|| C::new_unchecked(self))
    }
}

macro_rules! define_views {
    ($($(#[$meta:meta])* $view:ident: $group:ident,)+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $view<'a>(&'a Element);

            impl<'a> Capability<'a> for $view<'a> {
                const GROUP: ElementId = ElementId::$group;

                fn new_unchecked(element: &'a Element) -> Self {
                    Self(element)
                }

                fn element(&self) -> &'a Element {
                    self.0
                }
            }
        )+
    };
}

define_views! {
    /// An element with an identifier
    Object: Object,
    /// A user-visible map entity
    Feature: Feature,
    /// A feature holding other features
    Container: Container,
    /// A point, line, polygon or other shape
    Geometry: Geometry,
    /// A bundle of sub-styles
    Style: Style,
    /// State-keyed alternative styles
    StyleMap: StyleMap,
    /// One state-keyed alternative of a style map
    Pair: Pair,
}

impl<'a> Object<'a> {
    /// Returns the identifier of the object
    pub fn id(&self) -> Option<&'a str> {
        self.0.object_id()
    }

    /// Returns the identifier of the object this one updates
    pub fn target_id(&self) -> Option<&'a str> {
        self.0
            .attribute(oxkml_collections::attribute::AttrId::TargetId)
    }
}

impl<'a> Feature<'a> {
    /// Returns the name of the feature
    pub fn name(&self) -> Option<&'a str> {
        self.0.field_text(ElementId::Name)
    }

    /// Returns whether the feature is drawn, if it's specified
    pub fn visibility(&self) -> Option<bool> {
        self.0.field(ElementId::Visibility)
    }

    /// Returns the reference to a shared style
    pub fn style_url(&self) -> Option<&'a str> {
        self.0.field_text(ElementId::StyleUrl)
    }

    /// Returns the style selectors written inline in the feature
    pub fn style_selectors(&self) -> impl Iterator<Item = StyleSelector<'a>> {
        self.0
            .children_of(ElementId::StyleSelector)
            .map(StyleSelector::new_unchecked)
    }
}

impl<'a> Container<'a> {
    /// Returns the features within the container
    pub fn features(&self) -> impl Iterator<Item = Feature<'a>> {
        self.0
            .children_of(ElementId::Feature)
            .map(Feature::new_unchecked)
    }
}

#[derive(Clone, Copy, Debug)]
/// Either a style or a style map
pub enum StyleSelector<'a> {
    /// A bundle of sub-styles
    Style(Style<'a>),
    /// State-keyed alternative styles
    StyleMap(StyleMap<'a>),
}

impl<'a> Capability<'a> for StyleSelector<'a> {
    const GROUP: ElementId = ElementId::StyleSelector;

    fn new_unchecked(element: &'a Element) -> Self {
        if element.id() == ElementId::StyleMap {
            Self::StyleMap(StyleMap(element))
        } else {
            Self::Style(Style(element))
        }
    }

    fn element(&self) -> &'a Element {
        match *self {
            Self::Style(Style(element)) | Self::StyleMap(StyleMap(element)) => element,
        }
    }
}

/// The kinds of sub-style a style bundles, in the order they're written.
pub const SUB_STYLES: [ElementId; 6] = [
    ElementId::IconStyle,
    ElementId::LabelStyle,
    ElementId::LineStyle,
    ElementId::PolyStyle,
    ElementId::BalloonStyle,
    ElementId::ListStyle,
];

impl<'a> Style<'a> {
    /// Returns the sub-style of the given kind
    pub fn sub_style(&self, id: ElementId) -> Option<&'a Element> {
        self.0.find_child(id)
    }

    /// Returns every sub-style present
    pub fn sub_styles(&self) -> impl Iterator<Item = &'a Element> {
        self.0.children_of(ElementId::SubStyle)
    }

    /// Returns the `<IconStyle>`
    pub fn icon_style(&self) -> Option<&'a Element> {
        self.sub_style(ElementId::IconStyle)
    }

    /// Returns the `<LabelStyle>`
    pub fn label_style(&self) -> Option<&'a Element> {
        self.sub_style(ElementId::LabelStyle)
    }

    /// Returns the `<LineStyle>`
    pub fn line_style(&self) -> Option<&'a Element> {
        self.sub_style(ElementId::LineStyle)
    }

    /// Returns the `<PolyStyle>`
    pub fn poly_style(&self) -> Option<&'a Element> {
        self.sub_style(ElementId::PolyStyle)
    }

    /// Returns the `<BalloonStyle>`
    pub fn balloon_style(&self) -> Option<&'a Element> {
        self.sub_style(ElementId::BalloonStyle)
    }

    /// Returns the `<ListStyle>`
    pub fn list_style(&self) -> Option<&'a Element> {
        self.sub_style(ElementId::ListStyle)
    }
}

impl<'a> StyleMap<'a> {
    /// Returns the pairs of the style map in order
    pub fn pairs(&self) -> impl Iterator<Item = Pair<'a>> {
        self.0
            .children_of(ElementId::Pair)
            .map(Pair::new_unchecked)
    }

    /// Returns the first pair keyed by the given state
    pub fn pair(&self, state: StyleState) -> Option<Pair<'a>> {
        self.pairs().find(|pair| pair.key() == Some(state))
    }
}

impl<'a> Pair<'a> {
    /// Returns the state the pair applies to
    pub fn key(&self) -> Option<StyleState> {
        self.0.field(ElementId::Key)
    }

    /// Returns the reference to a shared style
    pub fn style_url(&self) -> Option<&'a str> {
        self.0.field_text(ElementId::StyleUrl)
    }

    /// Returns the style selector written inline in the pair
    pub fn style_selector(&self) -> Option<StyleSelector<'a>> {
        self.0
            .find_child(ElementId::StyleSelector)
            .map(StyleSelector::new_unchecked)
    }
}

#[cfg(test)]
mod test {
    use oxkml_collections::{element::ElementId, value::StyleState};

    use super::{Capability as _, Container, Geometry, StyleMap, StyleSelector};
    use crate::element::Element;

    fn pair(key: &str, url: &str) -> Element {
        let mut pair = Element::new(ElementId::Pair);
        pair.set_field_text(ElementId::Key, key).unwrap();
        pair.set_field_text(ElementId::StyleUrl, url).unwrap();
        pair
    }

    #[test]
    fn style_map() {
        let mut style_map = Element::new(ElementId::StyleMap);
        style_map.add_child(pair("normal", "#a")).unwrap();
        style_map.add_child(pair("highlight", "#b")).unwrap();

        let view = style_map.view::<StyleMap>().unwrap();
        assert_eq!(view.pairs().count(), 2);
        assert_eq!(
            view.pair(StyleState::Highlight).and_then(|p| p.style_url()),
            Some("#b")
        );
        assert!(matches!(
            style_map.view::<StyleSelector>(),
            Some(StyleSelector::StyleMap(_))
        ));
        assert!(style_map.view::<Geometry>().is_none());
    }

    #[test]
    fn container() {
        let mut document = Element::new(ElementId::Document);
        document.add_child(Element::new(ElementId::Placemark)).unwrap();
        document.add_child(Element::new(ElementId::Style)).unwrap();
        document.add_child(Element::new(ElementId::Folder)).unwrap();

        let container = document.view::<Container>().unwrap();
        let features: Vec<_> = container
            .features()
            .map(|feature| feature.element().id())
            .collect();
        assert_eq!(features, [ElementId::Placemark, ElementId::Folder]);
    }
}
