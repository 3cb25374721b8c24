//! The document tree for KML, with a streaming parser and a serializer.
//!
//! ```
//! use oxkml_ast::{document::Document, serialize::SerializeOptions};
//!
//! let document = Document::parse(
//!     "<kml><Placemark><visibility>0</visibility><name>A</name></Placemark></kml>",
//! )
//! .unwrap();
//! assert_eq!(
//!     document.serialize(&SerializeOptions::default()).unwrap(),
//!     r#"<?xml version="1.0" encoding="utf-8"?><kml><Placemark><name>A</name><visibility>0</visibility></Placemark></kml>"#,
//! );
//! ```
#[macro_use]
extern crate bitflags;

pub mod attribute;
pub mod document;
pub mod element;
pub mod error;
pub mod find;
pub mod view;
pub mod visitor;

#[cfg(feature = "parse")]
pub mod parse;

#[cfg(feature = "serialize")]
pub mod serialize;
#[cfg(feature = "serialize")]
pub mod xmlwriter;

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
