//! Error types.

use std::fmt::Display;

use oxkml_collections::{element::ElementId, value::ValueType};

use crate::element::Element;

/// A child refused by [`Element::add_child`], handed back to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// The kind of the parent that refused the child
    pub parent: ElementId,
    /// The refused child
    pub child: Box<Element>,
}

impl Rejected {
    /// Returns the refused child
    pub fn into_child(self) -> Element {
        *self.child
    }
}

impl Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`<{}>` is not permitted within `<{}>`",
            self.child.name(),
            self.parent
        )
    }
}
impl std::error::Error for Rejected {}

/// An error while setting the value of a simple field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The kind isn't a simple field
    NotAField(ElementId),
    /// The parent has no slot for the field
    NotPermitted {
        /// The kind of the parent
        parent: ElementId,
        /// The kind of the field
        field: ElementId,
    },
    /// The value's type doesn't match the field's declared type
    TypeMismatch {
        /// The kind of the field
        field: ElementId,
        /// The type declared for the field
        expected: ValueType,
    },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAField(id) => write!(f, "`<{id}>` is not a simple field"),
            Self::NotPermitted { parent, field } => {
                write!(f, "`<{field}>` is not a field of `<{parent}>`")
            }
            Self::TypeMismatch { field, expected } => {
                write!(f, "`<{field}>` holds a value of type {expected:?}")
            }
        }
    }
}
impl std::error::Error for FieldError {}

/// An error while serializing a document.
#[derive(Debug)]
pub enum SerializeError {
    /// An element was closed while none was open
    ClosedUnopenedElement,
    /// An attribute was written outside of a start tag
    AttributeWrittenBeforeElement,
    /// A declaration was written after other content
    DeclarationAlreadyWritten,
    /// Text was written outside of an element
    TextBeforeElement,
    /// CDATA content contained `]]>`
    BadCDATA,
}
impl Display for SerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClosedUnopenedElement => "closed an element while none was open".fmt(f),
            Self::AttributeWrittenBeforeElement => {
                "attempted to write an attribute outside of a start tag".fmt(f)
            }
            Self::TextBeforeElement => "attempted to write text outside of an element".fmt(f),
            Self::BadCDATA => "attempted to write CDATA containing `]]>`".fmt(f),
            Self::DeclarationAlreadyWritten => {
                "attempted to write a declaration after other content".fmt(f)
            }
        }
    }
}
impl std::error::Error for SerializeError {}
