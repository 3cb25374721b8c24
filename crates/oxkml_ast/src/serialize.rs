//! Writing a tree as canonical text.
//!
//! Known children are written in the order their parent's schema declares them, so the
//! output doesn't depend on the order a tree was built in.
use oxkml_collections::schema::Schema;

use crate::{
    element::{Element, Field},
    error::SerializeError,
    visitor::{Context, Flow, Order, Visitor},
    xmlwriter::{Indent, Options, XmlWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
/// Options for how a tree is written
pub struct SerializeOptions {
    /// Write each element on its own line, indented by its depth
    pub pretty: bool,
    /// The number of spaces per level of indentation when `pretty` is set
    pub indent: u8,
    /// Start with an XML declaration
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            declaration: false,
        }
    }
}

impl SerializeOptions {
    /// Options for indented output
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Sets the number of spaces per level of indentation
    #[must_use]
    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Sets whether to start with an XML declaration
    #[must_use]
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

struct Serializer<'a> {
    writer: XmlWriter<'a>,
}

impl<'a> Serializer<'a> {
    fn write_text(&mut self, text: &str) -> Result<(), SerializeError> {
        if text.is_empty() {
            Ok(())
        } else if text.contains(['<', '&']) && !text.contains("]]>") {
            self.writer.write_cdata_text(text)
        } else {
            self.writer.write_text(text)
        }
    }
}

impl<'a> Visitor<'a> for Serializer<'a> {
    type Error = SerializeError;

    fn order(&self) -> Order {
        Order::Schema
    }

    fn element(&mut self, element: &'a Element, _context: &Context) -> Result<Flow, Self::Error> {
        self.writer.start_element(element.name())?;
        for attr in Schema::get().attributes(element.id()) {
            if let Some(value) = element.attribute(*attr) {
                self.writer.write_attribute(attr.name(), value)?;
            }
        }
        for (name, value) in element.unknown_attributes().iter() {
            self.writer.write_attribute(name, value)?;
        }
        self.write_text(element.char_data())?;
        Ok(Flow::Descend)
    }

    fn exit_element(&mut self, _element: &'a Element, _context: &Context) -> Result<(), Self::Error> {
        self.writer.end_element()
    }

    fn field(&mut self, field: &'a Field, _context: &Context) -> Result<Flow, Self::Error> {
        self.writer.start_element(field.id().name())?;
        self.write_text(field.value())?;
        self.writer.end_element()?;
        Ok(Flow::Descend)
    }
}

/// Writes the element and everything within it as text.
///
/// Attributes the kind declares come first in their declared order, followed by any
/// others in the order they were set. Known children follow in schema order and unknown
/// children come last.
///
/// # Errors
/// If the writer is used incorrectly
pub fn serialize(element: &Element, options: &SerializeOptions) -> Result<String, SerializeError> {
    let indent = if options.pretty {
        Indent::Spaces(options.indent)
    } else {
        Indent::None
    };
    let mut serializer = Serializer {
        writer: XmlWriter::new(Options { indent }),
    };
    if options.declaration {
        serializer.writer.write_declaration()?;
    }
    let _ = serializer.start(element)?;
    serializer.writer.end_document()
}

#[cfg(test)]
mod test {
    use oxkml_collections::element::ElementId;

    use super::{serialize, SerializeOptions};
    use crate::element::Element;

    #[test]
    fn schema_order() {
        let mut placemark = Element::new(ElementId::Placemark);
        placemark.set_attribute("data-x", "1");
        placemark.set_attribute("id", "p");
        placemark.add_child(Element::new(ElementId::Point)).unwrap();
        placemark.add_child(Element::unknown("gx:balloonVisibility")).unwrap();
        placemark
            .set_field_text(ElementId::Visibility, "1")
            .unwrap();
        placemark.set_field_text(ElementId::Name, "a < b").unwrap();
        placemark
            .set_field_text(ElementId::Description, "")
            .unwrap();

        insta::assert_snapshot!(
            serialize(&placemark, &SerializeOptions::default()).unwrap(),
            @r#"<Placemark id="p" data-x="1"><name><![CDATA[a < b]]></name><visibility>1</visibility><description/><Point/><gx:balloonVisibility/></Placemark>"#
        );
        insta::assert_snapshot!(
            serialize(&placemark, &SerializeOptions::pretty().with_declaration(true))
                .unwrap()
                .trim_end(),
            @r#"
        <?xml version="1.0" encoding="utf-8"?>
        <Placemark id="p" data-x="1">
          <name><![CDATA[a < b]]></name>
          <visibility>1</visibility>
          <description/>
          <Point/>
          <gx:balloonVisibility/>
        </Placemark>
        "#
        );
    }

    #[test]
    fn escapes_without_cdata() {
        let mut snippet = Element::new(ElementId::Snippet);
        snippet.set_char_data("a ]]> b & c");
        snippet.set_attribute("maxLines", "2");
        assert_eq!(
            serialize(&snippet, &SerializeOptions::default()).unwrap(),
            r#"<Snippet maxLines="2">a ]]&gt; b &amp; c</Snippet>"#
        );
    }
}
