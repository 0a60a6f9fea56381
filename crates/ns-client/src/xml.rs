//! Single-field extraction from API responses.
//!
//! Every call this client makes needs exactly one element out of a small
//! document, so there is no point deserializing the whole tree.

use crate::error::{NsClientError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Return the text of the first element named `field`, or `None` if the
/// document has no such element. Element names are matched exactly
/// (the API uses upper case).
pub fn extract_field(xml: &str, field: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let target = field.as_bytes();
    let mut inside = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if !inside && e.name().as_ref() == target => inside = true,
            Ok(Event::Empty(e)) if !inside && e.name().as_ref() == target => {
                return Ok(Some(String::new()));
            }
            Ok(Event::Text(t)) if inside => {
                let unescaped = t.unescape().map_err(|e| NsClientError::Xml(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(c)) if inside => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Ok(Event::End(e)) if inside && e.name().as_ref() == target => return Ok(Some(text)),
            Ok(Event::Eof) => {
                if inside {
                    return Err(NsClientError::Xml(format!("unterminated <{field}> element")));
                }
                return Ok(None);
            }
            Err(e) => {
                return Err(NsClientError::Xml(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }
}
