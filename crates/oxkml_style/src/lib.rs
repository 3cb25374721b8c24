//! Resolves the style a feature is drawn with, by merging its inline style selectors with
//! the shared styles it references.
//!
//! ```
//! use oxkml_ast::document::Document;
//! use oxkml_collections::{element::ElementId, value::StyleState};
//! use oxkml_style::resolve_style;
//!
//! let document = Document::parse(
//!     r##"<kml><Document>
//!         <Style id="thick"><LineStyle><width>4</width></LineStyle></Style>
//!         <Placemark id="trail"><styleUrl>#thick</styleUrl></Placemark>
//!     </Document></kml>"##,
//! )
//! .unwrap();
//! let trail = document.lookup_by_id("trail").unwrap();
//! let style = resolve_style(trail, &document, StyleState::Normal);
//! let width = style
//!     .find_child(ElementId::LineStyle)
//!     .and_then(|line_style| line_style.field::<f64>(ElementId::Width));
//! assert_eq!(width, Some(4.0));
//! ```
pub mod resolver;

pub use resolver::{resolve_style, StyleDiagnostic, StyleResolver};

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
