//! A streaming XML writer that writes into a `String`.
//!
//! Derived from the [xmlwriter](https://docs.rs/xmlwriter/latest/xmlwriter/index.html) crate,
//! with the following changes.
//!
//! - Errors instead of panicking
//! - Borrows element names for the lifetime of the tree being written
//! - Text is always written inline, so that indentation never becomes part of a value
//!
//! ```
//! use oxkml_ast::xmlwriter::{Indent, Options, XmlWriter};
//!
//! let mut w = XmlWriter::new(Options { indent: Indent::Spaces(2) });
//! w.start_element("Placemark").unwrap();
//! w.write_attribute("id", "home").unwrap();
//! w.start_element("name").unwrap();
//! w.write_text("Home & away").unwrap();
//! assert_eq!(
//!     w.end_document().unwrap(),
//!     "<Placemark id=\"home\">\n  <name>Home &amp; away</name>\n</Placemark>\n"
//! );
//! ```

use crate::error::SerializeError;

/// A result from writing part of a document.
pub type Result = std::result::Result<(), SerializeError>;

/// An XML node indention.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Indent {
    /// Disable indention and new lines.
    None,
    /// Indent with spaces.
    Spaces(u8),
}

/// An XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Set XML nodes indention.
    ///
    /// With `Indent::None`, `<kml><Folder/></kml>` is written on a single line.
    pub indent: Indent,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            indent: Indent::None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Empty,
    Document,
    Attributes,
}

#[derive(Clone, Debug)]
struct DepthData<'a> {
    element_name: &'a str,
    /// Whether the start tag was closed with `>`
    opened: bool,
    has_children: bool,
}

/// An XML writer.
#[derive(Clone, Debug)]
pub struct XmlWriter<'a> {
    buf: String,
    state: State,
    depth_stack: Vec<DepthData<'a>>,
    opt: Options,
}

impl<'a> XmlWriter<'a> {
    /// Creates a new `XmlWriter`.
    pub fn new(opt: Options) -> Self {
        XmlWriter {
            buf: String::new(),
            state: State::Empty,
            depth_stack: Vec::new(),
            opt,
        }
    }

    /// Writes an XML declaration.
    ///
    /// `<?xml version="1.0" encoding="utf-8"?>`
    ///
    /// # Errors
    ///
    /// - When called after anything else was written.
    pub fn write_declaration(&mut self) -> Result {
        if self.state != State::Empty {
            return Err(SerializeError::DeclarationAlreadyWritten);
        }

        self.buf
            .push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        self.state = State::Document;
        Ok(())
    }

    /// Starts writing a new element.
    ///
    /// This method writes only the `<tag-name` part.
    ///
    /// # Errors
    ///
    /// When in a bad state.
    pub fn start_element(&mut self, name: &'a str) -> Result {
        if self.state == State::Attributes {
            self.write_open_element();
        }
        if let Some(parent) = self.depth_stack.last_mut() {
            parent.has_children = true;
        }

        if self.state != State::Empty {
            self.write_new_line();
        }
        self.write_node_indent(self.depth_stack.len());

        self.buf.push('<');
        self.buf.push_str(name);
        self.depth_stack.push(DepthData {
            element_name: name,
            opened: false,
            has_children: false,
        });
        self.state = State::Attributes;
        Ok(())
    }

    /// Writes an attribute.
    ///
    /// Any occurrence of `&<>"` in the value will be escaped.
    ///
    /// # Errors
    ///
    /// - When called before `start_element()`.
    /// - When called after any content of the element was written.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> Result {
        if self.state != State::Attributes {
            return Err(SerializeError::AttributeWrittenBeforeElement);
        }

        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        write_escaped(&mut self.buf, value, true);
        self.buf.push('"');
        Ok(())
    }

    /// Writes text directly after the current position.
    ///
    /// `<>&` will be escaped.
    ///
    /// # Errors
    ///
    /// - When called before `start_element()`.
    pub fn write_text(&mut self, text: &str) -> Result {
        self.prepare_text()?;
        write_escaped(&mut self.buf, text, false);
        Ok(())
    }

    /// Writes text inside a `<![CDATA[ ... ]]>` node.
    ///
    /// # Errors
    ///
    /// - When called before `start_element()`.
    /// - When the text contains the literal `]]>`.
    pub fn write_cdata_text(&mut self, text: &str) -> Result {
        if text.contains("]]>") {
            return Err(SerializeError::BadCDATA);
        }
        self.prepare_text()?;
        self.buf.push_str("<![CDATA[");
        self.buf.push_str(text);
        self.buf.push_str("]]>");
        Ok(())
    }

    fn prepare_text(&mut self) -> Result {
        if self.depth_stack.is_empty() {
            return Err(SerializeError::TextBeforeElement);
        }
        if self.state == State::Attributes {
            self.write_open_element();
        }
        self.state = State::Document;
        Ok(())
    }

    /// Closes an open element.
    ///
    /// # Errors
    ///
    /// When no element is open.
    pub fn end_element(&mut self) -> Result {
        let Some(depth) = self.depth_stack.pop() else {
            return Err(SerializeError::ClosedUnopenedElement);
        };

        if depth.opened {
            if depth.has_children {
                self.write_new_line();
                self.write_node_indent(self.depth_stack.len());
            }
            self.buf.push_str("</");
            self.buf.push_str(depth.element_name);
            self.buf.push('>');
        } else {
            self.buf.push_str("/>");
        }

        self.state = State::Document;
        Ok(())
    }

    /// Closes all open elements and returns the written document.
    ///
    /// # Errors
    ///
    /// When in a bad state.
    pub fn end_document(mut self) -> std::result::Result<String, SerializeError> {
        while !self.depth_stack.is_empty() {
            self.end_element()?;
        }

        if self.state != State::Empty {
            self.write_new_line();
        }
        Ok(self.buf)
    }

    // Writes the end of the current opening element, so `>`.
    fn write_open_element(&mut self) {
        if let Some(depth) = self.depth_stack.last_mut() {
            depth.opened = true;
            self.buf.push('>');
            self.state = State::Document;
        }
    }

    fn write_node_indent(&mut self, depth: usize) {
        if let Indent::Spaces(n) = self.opt.indent {
            for _ in 0..depth * usize::from(n) {
                self.buf.push(' ');
            }
        }
    }

    fn write_new_line(&mut self) {
        if self.opt.indent != Indent::None {
            self.buf.push('\n');
        }
    }
}

fn write_escaped(buf: &mut String, s: &str, escape_quotes: bool) {
    for char in s.chars() {
        match char {
            '&' => buf.push_str("&amp;"),
            '>' => buf.push_str("&gt;"),
            '<' => buf.push_str("&lt;"),
            '"' if escape_quotes => buf.push_str("&quot;"),
            _ => buf.push(char),
        }
    }
}
