use oxkml_ast::{
    element::Element,
    parse::{ParseOptions, Parser},
};
use oxkml_collections::{element::ElementId, schema::Schema};
use oxkml_diagnostics::{ParseError, Warning};
use pretty_assertions::assert_eq;

/// Pairs of a parent and a child it never permits
const MISPLACED: &[(ElementId, ElementId)] = &[
    (ElementId::Point, ElementId::Style),
    (ElementId::Style, ElementId::Pair),
    (ElementId::Style, ElementId::Placemark),
    (ElementId::Folder, ElementId::Point),
    (ElementId::Point, ElementId::Name),
    (ElementId::NetworkLink, ElementId::Icon),
    (ElementId::Kml, ElementId::Style),
    (ElementId::StyleMap, ElementId::Style),
    (ElementId::Placemark, ElementId::Folder),
    (ElementId::Polygon, ElementId::Point),
    (ElementId::IconStyle, ElementId::LineStyle),
    (ElementId::Document, ElementId::Pair),
];

fn source(parent: ElementId, child: ElementId) -> String {
    format!(
        "<{parent}>\n  <{child}/>\n</{parent}>",
        parent = parent.name(),
        child = child.name()
    )
}

#[test]
fn tree_refuses_misplaced_children() {
    for &(parent, child) in MISPLACED {
        assert!(!Schema::get().is_allowed(parent, child), "{parent:?} > {child:?}");

        let mut element = Element::new(parent);
        let rejected = element.add_child(Element::new(child)).unwrap_err();
        assert_eq!(rejected.parent, parent);
        assert_eq!(rejected.into_child().id(), child);
        assert_eq!(element.children().count(), 0, "{parent:?} > {child:?}");
        assert!(element.unknown_children().is_empty());
    }
}

#[test]
fn lenient_parse_keeps_misplaced_children() {
    for &(parent, child) in MISPLACED {
        let document = Parser::default().parse(&source(parent, child)).unwrap();
        let root = document.root().unwrap();
        assert_eq!(root.children().count(), 0, "{parent:?} > {child:?}");
        assert_eq!(root.unknown_children().len(), 1);
        assert_eq!(root.unknown_children()[0].id(), child);

        let [Warning::Misplaced {
            parent: warned_parent,
            child: warned_child,
            location,
            ..
        }] = document.warnings()
        else {
            panic!("expected one warning for {parent:?} > {child:?}");
        };
        assert_eq!(warned_parent, parent.name());
        assert_eq!(warned_child, child.name());
        assert_eq!((location.line, location.column), (2, 3));
    }
}

#[test]
fn strict_parse_fails_on_misplaced_children() {
    for &(parent, child) in MISPLACED {
        let error = Parser::new(ParseOptions::default().with_strict(true))
            .parse(&source(parent, child))
            .unwrap_err();
        let ParseError::SchemaViolation {
            parent: error_parent,
            child: error_child,
            location,
            ..
        } = error
        else {
            panic!("expected a schema violation for {parent:?} > {child:?}");
        };
        assert_eq!(error_parent, parent.name());
        assert_eq!(error_child, child.name());
        assert_eq!((location.line, location.column), (2, 3));
    }
}

#[test]
fn misplaced_ids_are_not_indexed() {
    let document = Parser::default()
        .parse(r#"<kml><Document><Point id="p"/><Placemark id="p"/></Document></kml>"#)
        .unwrap();
    assert_eq!(
        document.lookup_by_id("p").map(Element::id),
        Some(ElementId::Placemark)
    );
}

#[test]
fn permitted_children_are_accepted() {
    for (parent, child) in [
        (ElementId::Kml, ElementId::Document),
        (ElementId::Document, ElementId::Style),
        (ElementId::Folder, ElementId::NetworkLink),
        (ElementId::Placemark, ElementId::MultiGeometry),
        (ElementId::MultiGeometry, ElementId::Point),
        (ElementId::StyleMap, ElementId::Pair),
        (ElementId::Pair, ElementId::Style),
        (ElementId::Style, ElementId::BalloonStyle),
        (ElementId::IconStyle, ElementId::Icon),
        (ElementId::NetworkLink, ElementId::Link),
    ] {
        assert!(Schema::get().is_allowed(parent, child), "{parent:?} > {child:?}");
        let mut element = Element::new(parent);
        element.add_child(Element::new(child)).unwrap();
        assert_eq!(element.find_child(child).map(Element::id), Some(child));

        let document = Parser::new(ParseOptions::default().with_strict(true))
            .parse(&source(parent, child))
            .unwrap();
        assert!(document.warnings().is_empty());
    }
}
