//! A single traversal engine for reading a tree.
//!
//! Visitors choose the order children are walked in, and steer the walk per element with
//! a [`Flow`].
use std::ops::ControlFlow;

use itertools::Either;
use smallvec::SmallVec;

use crate::element::{Child, Element, Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// The order known children are walked in
pub enum Order {
    /// The order children were added in
    #[default]
    Document,
    /// The order the parent's schema declares its slots in
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// What to do after visiting a node
pub enum Flow {
    /// Continue into the node's children
    #[default]
    Descend,
    /// Keep the node, but don't visit its children
    SkipChildren,
    /// Drop the node and its children
    Reject,
    /// End the walk
    Stop,
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    /// Facts about the position of the node being visited
    pub struct ContextFlags: usize {
        /// Whether the node is part of an element's unknown content
        const within_unknown = 0b1;
    }
}

#[derive(Debug, Clone, Default)]
/// The position of the node being visited
pub struct Context {
    /// The number of ancestors of the node
    pub depth: usize,
    /// The storage index of the node and of each of its ancestors, starting from the root.
    ///
    /// Within unknown content, indices are positions in the parent's unknown children.
    pub path: SmallVec<[usize; 8]>,
    /// Facts about the node's position
    pub flags: ContextFlags,
}

/// A trait for visiting the nodes of a tree
#[allow(unused_variables)]
pub trait Visitor<'a> {
    /// The error produced by the visitor
    type Error;

    /// The order children will be visited in
    fn order(&self) -> Order {
        Order::Document
    }

    /// Visits an element
    ///
    /// # Errors
    /// Whether the visitor fails
    fn element(&mut self, element: &'a Element, context: &Context) -> Result<Flow, Self::Error> {
        Ok(Flow::Descend)
    }

    /// Exits an element, after its children were visited
    ///
    /// # Errors
    /// Whether the visitor fails
    fn exit_element(&mut self, element: &'a Element, context: &Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visits a simple field. Only [`Flow::Stop`] has any effect.
    ///
    /// # Errors
    /// Whether the visitor fails
    fn field(&mut self, field: &'a Field, context: &Context) -> Result<Flow, Self::Error> {
        Ok(Flow::Descend)
    }

    /// Visits the root and everything below it
    ///
    /// # Errors
    /// If any of the visitor's methods fail
    fn start(&mut self, root: &'a Element) -> Result<ControlFlow<()>, Self::Error> {
        self.visit(root, &mut Context::default())
    }

    /// Visits an element and it's children
    ///
    /// # Errors
    /// If any of the visitor's methods fail
    fn visit(
        &mut self,
        element: &'a Element,
        context: &mut Context,
    ) -> Result<ControlFlow<()>, Self::Error> {
        log::debug!("visiting {}", element.name());
        match self.element(element, context)? {
            Flow::Stop => return Ok(ControlFlow::Break(())),
            Flow::Reject => return Ok(ControlFlow::Continue(())),
            Flow::SkipChildren => {}
            Flow::Descend => {
                if self.visit_children(element, context)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        log::debug!("left the {}", element.name());
        self.exit_element(element, context)?;
        Ok(ControlFlow::Continue(()))
    }

    /// Visits the known children of an element in the visitor's order, followed by its
    /// unknown content
    ///
    /// # Errors
    /// If any of the visitor's methods fail
    fn visit_children(
        &mut self,
        parent: &'a Element,
        context: &mut Context,
    ) -> Result<ControlFlow<()>, Self::Error> {
        let children = match self.order() {
            Order::Document => Either::Left(parent.children().enumerate()),
            Order::Schema => Either::Right(parent.children_in_schema_order()),
        };

        context.depth += 1;
        for (index, child) in children {
            context.path.push(index);
            let flow = match child {
                Child::Field(field) => match self.field(field, context)? {
                    Flow::Stop => ControlFlow::Break(()),
                    _ => ControlFlow::Continue(()),
                },
                Child::Element(element) => self.visit(element, context)?,
            };
            context.path.pop();
            if flow.is_break() {
                return Ok(flow);
            }
        }

        let within_unknown = context.flags.contains(ContextFlags::within_unknown);
        context.flags.insert(ContextFlags::within_unknown);
        for (index, child) in parent.unknown_children().iter().enumerate() {
            context.path.push(index);
            let flow = self.visit(child, context)?;
            context.path.pop();
            if flow.is_break() {
                return Ok(flow);
            }
        }
        context
            .flags
            .set(ContextFlags::within_unknown, within_unknown);
        context.depth -= 1;
        Ok(ControlFlow::Continue(()))
    }
}

#[cfg(test)]
mod test {
    use std::convert::Infallible;

    use oxkml_collections::element::ElementId;
    use pretty_assertions::assert_eq;

    use super::{Context, ContextFlags, Flow, Order, Visitor};
    use crate::element::{Element, Field};

    #[derive(Default)]
    struct Recorder {
        order: Order,
        skip: Option<ElementId>,
        log: Vec<String>,
    }

    impl<'a> Visitor<'a> for Recorder {
        type Error = Infallible;

        fn order(&self) -> Order {
            self.order
        }

        fn element(&mut self, element: &'a Element, context: &Context) -> Result<Flow, Infallible> {
            let unknown = if context.flags.contains(ContextFlags::within_unknown) {
                "?"
            } else {
                ""
            };
            self.log
                .push(format!("{unknown}{}{:?}", element.name(), context.path.as_slice()));
            Ok(if Some(element.id()) == self.skip {
                Flow::SkipChildren
            } else {
                Flow::Descend
            })
        }

        fn field(&mut self, field: &'a Field, context: &Context) -> Result<Flow, Infallible> {
            self.log.push(format!("{}@{}", field.id(), context.depth));
            Ok(Flow::Descend)
        }
    }

    fn tree() -> Element {
        let mut placemark = Element::new(ElementId::Placemark);
        placemark.add_child(Element::new(ElementId::Point)).unwrap();
        placemark
            .set_field_text(ElementId::Name, "a")
            .unwrap();
        placemark.add_child(Element::unknown("gx:balloonVisibility")).unwrap();

        let mut folder = Element::new(ElementId::Folder);
        folder.add_child(placemark).unwrap();
        folder
    }

    #[test]
    fn orders() {
        let tree = tree();

        let mut recorder = Recorder::default();
        recorder.start(&tree).unwrap();
        assert_eq!(
            recorder.log,
            [
                "Folder[]",
                "Placemark[0]",
                "Point[0, 0]",
                "name@2",
                "?gx:balloonVisibility[0, 0]"
            ]
        );

        let mut recorder = Recorder {
            order: Order::Schema,
            ..Recorder::default()
        };
        recorder.start(&tree).unwrap();
        assert_eq!(recorder.log[2], "name@2");
        assert_eq!(recorder.log[3], "Point[0, 0]");
    }

    #[test]
    fn skip_children() {
        let tree = tree();
        let mut recorder = Recorder {
            skip: Some(ElementId::Placemark),
            ..Recorder::default()
        };
        recorder.start(&tree).unwrap();
        assert_eq!(recorder.log, ["Folder[]", "Placemark[0]"]);
    }
}
