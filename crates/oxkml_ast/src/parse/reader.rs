//! Feeds a [`Builder`] with events from `quick-xml`.
//!
//! Entity references other than the five predefined by XML and character references are
//! errors. Entities declared in a `<!DOCTYPE>` are never expanded.
use std::borrow::Cow;

use oxkml_diagnostics::ParseError;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use smallvec::SmallVec;

use super::Builder;

type Attributes<'a> = SmallVec<[(Cow<'a, str>, Cow<'a, str>); 4]>;

fn utf8(bytes: &[u8], position: usize) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes)
        .map_err(|error| ParseError::malformed(format!("invalid UTF-8: {error}"), position))
}

/// Returns the offset of the `<` opening a tag read from `position`, which the tokenizer
/// may already have consumed while reading the text before it.
fn tag_start(source: &str, position: usize) -> usize {
    if source.as_bytes().get(position) == Some(&b'<') {
        position
    } else {
        position.saturating_sub(1)
    }
}

fn attributes<'a>(tag: &'a BytesStart<'a>, position: usize) -> Result<Attributes<'a>, ParseError> {
    tag.attributes()
        .map(|attribute| {
            let attribute = attribute.map_err(|error| ParseError::from((error, position)))?;
            let key = Cow::Borrowed(utf8(attribute.key.into_inner(), position)?);
            let value = attribute
                .unescape_value()
                .map_err(|error| ParseError::from((error, position)))?;
            Ok((key, value))
        })
        .collect()
}

/// Reads the source, feeding each tag and piece of text into the builder.
///
/// Comments, processing instructions, declarations and doctypes are skipped.
///
/// # Errors
/// If the source isn't well-formed XML, or the builder rejects an event
pub fn read(source: &str, builder: &mut Builder<'_>) -> Result<(), ParseError> {
    let mut reader = Reader::from_str(source);
    reader.check_end_names(true);

    loop {
        use Event::{CData, Comment, Decl, DocType, Empty, End, Eof, Start, Text, PI};
        let start = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|error| ParseError::from((error, reader.buffer_position())))?;
        let end = reader.buffer_position();

        match event {
            Start(tag) => {
                let start = tag_start(source, start);
                let name = utf8(tag.name().into_inner(), start)?;
                builder.start_element(name, &attributes(&tag, start)?, start..end)?;
            }
            Empty(tag) => {
                let start = tag_start(source, start);
                let name = utf8(tag.name().into_inner(), start)?;
                builder.start_element(name, &attributes(&tag, start)?, start..end)?;
                builder.end_element(name, start..end)?;
            }
            End(tag) => {
                let start = tag_start(source, start);
                let name = utf8(tag.name().into_inner(), start)?;
                builder.end_element(name, start..end)?;
            }
            Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|error| ParseError::from((error, start)))?;
                builder.char_data(&text, start)?;
            }
            CData(data) => builder.char_data(utf8(&data, start)?, start)?,
            Comment(_) | Decl(_) | PI(_) | DocType(_) => {}
            Eof => break,
        }
    }
    Ok(())
}
