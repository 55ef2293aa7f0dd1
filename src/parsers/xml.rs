//! XML streaming traversal.
//!
//! Events are copied from reader to writer unchanged except for text and
//! CDATA nodes, which run through the masking engine. Tags, attributes,
//! comments, and declarations survive byte-for-byte; whitespace inside text
//! nodes is kept (no trimming).

use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesText, Event};
use quick_xml::{Reader, Writer};
use rand::Rng;

use crate::errors::{MaskError, MaskResult};
use crate::masking::MaskingEngine;

/// Transform text nodes and CDATA sections in an XML document.
pub(crate) fn transform_xml<R: Rng>(
    content: &str,
    engine: &MaskingEngine,
    rng: &mut R,
) -> MaskResult<(String, usize)> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut count = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| MaskError::InvalidXml(e.to_string()))?;
                let (transformed, matched) = engine.transform_counted(&text, rng);
                count += matched;
                writer
                    .write_event(Event::Text(BytesText::new(&transformed)))
                    .map_err(|e| MaskError::InvalidXml(e.to_string()))?;
            }
            Ok(Event::CData(t)) => {
                let text = std::str::from_utf8(&t)
                    .map_err(|e| MaskError::InvalidXml(e.to_string()))?;
                let (transformed, matched) = engine.transform_counted(text, rng);
                count += matched;
                writer
                    .write_event(Event::CData(BytesCData::new(transformed)))
                    .map_err(|e| MaskError::InvalidXml(e.to_string()))?;
            }
            Ok(Event::Eof) => break,
            Ok(event) => {
                writer
                    .write_event(event)
                    .map_err(|e| MaskError::InvalidXml(e.to_string()))?;
            }
            Err(e) => return Err(MaskError::InvalidXml(e.to_string())),
        }
    }

    let bytes = writer.into_inner().into_inner();
    let out = String::from_utf8(bytes).map_err(|e| MaskError::InvalidXml(e.to_string()))?;
    Ok((out, count))
}
