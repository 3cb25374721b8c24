//! Searching a tree for elements of a kind.
use std::convert::Infallible;

use oxkml_collections::element::ElementId;

use crate::{
    element::Element,
    visitor::{Context, ContextFlags, Flow, Visitor},
};

struct Finder<'a> {
    kind: ElementId,
    limit: usize,
    found: Vec<&'a Element>,
}

impl<'a> Visitor<'a> for Finder<'a> {
    type Error = Infallible;

    fn element(&mut self, element: &'a Element, context: &Context) -> Result<Flow, Self::Error> {
        if context.flags.contains(ContextFlags::within_unknown) {
            return Ok(Flow::Reject);
        }
        if element.is_a(self.kind) {
            self.found.push(element);
            if self.found.len() >= self.limit {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Descend)
    }
}

/// Returns elements of the given kind or group in document order, stopping the search once
/// `limit` are found.
///
/// Unknown content isn't searched.
pub fn find_all(root: &Element, kind: ElementId, limit: Option<usize>) -> Vec<&Element> {
    let limit = limit.unwrap_or(usize::MAX);
    if limit == 0 {
        return vec![];
    }
    let mut finder = Finder {
        kind,
        limit,
        found: vec![],
    };
    let _ = finder.start(root);
    finder.found
}
